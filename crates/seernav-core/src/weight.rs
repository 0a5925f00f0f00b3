//! Task weight lookup
//!
//! A task's weight is derived from its own `task.json` descriptor and is the
//! same in every session. [`WeightLookup`] finds the first descriptor for a
//! task id across sessions (in session name order), weighs it once, and
//! caches the outcome for the rest of the aggregation pass.

use std::collections::HashMap;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::{Result, SeerError};
use crate::metrics::Weight;
use crate::record::{read_json_object, RawRecord, RecordOutcome, TASK_FILE};

/// Computes a weight from a parsed task descriptor
pub trait TaskWeigher {
    fn weigh(&self, task_id: &str, task: &RawRecord) -> Result<u64>;
}

/// Weight = total number of cells over every grid in the task's
/// `train` and `test` example pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct GridCellWeigher;

impl TaskWeigher for GridCellWeigher {
    fn weigh(&self, task_id: &str, task: &RawRecord) -> Result<u64> {
        let mut weight = 0;
        for set in ["train", "test"] {
            let pairs = task.get(set).and_then(Value::as_array).ok_or_else(|| {
                SeerError::invalid_value("task descriptor", format!("{task_id}: missing {set} pairs"))
            })?;

            for (i, pair) in pairs.iter().enumerate() {
                for side in ["input", "output"] {
                    // test outputs are withheld in some datasets
                    let Some(grid) = pair.get(side) else {
                        if side == "input" {
                            return Err(SeerError::invalid_value(
                                "task descriptor",
                                format!("{task_id}: {set}[{i}] has no input"),
                            ));
                        }
                        continue;
                    };
                    weight += grid_cells(grid).ok_or_else(|| {
                        SeerError::invalid_value(
                            "task grid",
                            format!("{task_id}: {set}[{i}].{side} is not a rectangular grid"),
                        )
                    })?;
                }
            }
        }
        Ok(weight)
    }
}

/// Cell count of a rectangular grid of integers
fn grid_cells(grid: &Value) -> Option<u64> {
    let rows = grid.as_array()?;
    let Some(first) = rows.first() else {
        return Some(0);
    };
    let width = first.as_array()?.len();

    for row in rows {
        let row = row.as_array()?;
        if row.len() != width || !row.iter().all(Value::is_u64) {
            return None;
        }
    }
    Some((rows.len() * width) as u64)
}

/// Cached first-match weight lookup over a fixed list of session directories
pub struct WeightLookup {
    sessions: Vec<PathBuf>,
    weigher: Box<dyn TaskWeigher>,
    enabled: bool,
    cache: HashMap<String, Weight>,
    descriptor_reads: usize,
}

impl WeightLookup {
    pub fn new(sessions: Vec<PathBuf>, weigher: Box<dyn TaskWeigher>) -> Self {
        WeightLookup {
            sessions,
            weigher,
            enabled: true,
            cache: HashMap::new(),
            descriptor_reads: 0,
        }
    }

    /// A lookup that never touches the filesystem and reports `Skipped`
    pub fn disabled() -> Self {
        WeightLookup {
            enabled: false,
            ..WeightLookup::new(Vec::new(), Box::new(GridCellWeigher))
        }
    }

    /// Number of descriptors read so far in this pass
    pub fn descriptor_reads(&self) -> usize {
        self.descriptor_reads
    }

    /// Weight of `task_id`, resolved at most once per lookup
    pub fn weight(&mut self, task_id: &str) -> Weight {
        if !self.enabled {
            return Weight::Skipped;
        }
        if let Some(weight) = self.cache.get(task_id) {
            return *weight;
        }

        let weight = self.resolve(task_id);
        self.cache.insert(task_id.to_string(), weight);
        weight
    }

    fn resolve(&mut self, task_id: &str) -> Weight {
        let Some(path) = self
            .sessions
            .iter()
            .map(|session| session.join(task_id).join(TASK_FILE))
            .find(|path| path.is_file())
        else {
            tracing::debug!(task = task_id, "No task descriptor in any session");
            return Weight::NotFound;
        };

        self.descriptor_reads += 1;
        match read_json_object(&path) {
            RecordOutcome::Found(task) => match self.weigher.weigh(task_id, &task) {
                Ok(weight) => Weight::Value(weight),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to weigh task");
                    Weight::Error
                }
            },
            // read_json_object already logged the cause
            RecordOutcome::Malformed(_) => Weight::Error,
            RecordOutcome::NotFound => Weight::NotFound,
        }
    }
}
