//! Fixture result trees for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn session(&self, name: &str, index: Option<Value>) -> PathBuf {
        let dir = self.root().join(name);
        fs::create_dir_all(&dir).unwrap();
        if let Some(index) = index {
            write_json(&dir.join("index.json"), &index);
        }
        dir
    }

    pub fn task(&self, session: &str, task: &str, index: Option<Value>) -> PathBuf {
        let dir = self.root().join(session).join(task);
        fs::create_dir_all(&dir).unwrap();
        if let Some(index) = index {
            write_json(&dir.join("index.json"), &index);
        }
        dir
    }

    /// Descriptor with a single train pair of `cells` x 1 grids (weight `2 * cells`)
    pub fn descriptor(&self, session: &str, task: &str, cells: usize) {
        let grid: Vec<Vec<u64>> = vec![vec![0]; cells];
        let dir = self.root().join(session).join(task);
        fs::create_dir_all(&dir).unwrap();
        write_json(
            &dir.join("task.json"),
            &json!({"train": [{"input": grid, "output": grid}], "test": []}),
        );
    }

    pub fn step(&self, session: &str, task: &str, step: &str, index: Option<Value>) -> PathBuf {
        let dir = self.root().join(session).join(task).join(step);
        fs::create_dir_all(&dir).unwrap();
        if let Some(index) = index {
            write_json(&dir.join("index.json"), &index);
        }
        dir
    }

    pub fn raw(&self, relative: &str, content: &str) {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}
