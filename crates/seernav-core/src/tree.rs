//! Result tree layout
//!
//! ```text
//! <root>/<session>/index.json
//! <root>/<session>/<task>/index.json
//! <root>/<session>/<task>/task.json
//! <root>/<session>/<task>/<step>/index.json
//! ```
//!
//! Only the root is checked structurally. Failing to list anything below it
//! is logged and treated as an empty directory so siblings keep scanning.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SeerError};

/// Handle on a sessions root directory
#[derive(Debug, Clone)]
pub struct ResultTree {
    root: PathBuf,
}

impl ResultTree {
    /// Open a sessions root, failing if it is missing or not a directory
    pub fn open(root: &Path) -> Result<Self> {
        if !root.exists() {
            return Err(SeerError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(SeerError::RootNotADirectory {
                path: root.to_path_buf(),
            });
        }
        Ok(ResultTree {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Display name of the root directory
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    /// Session directories in name order
    pub fn session_dirs(&self) -> Result<Vec<PathBuf>> {
        list_subdirs(&self.root)
    }

    /// Directory of a named session
    pub fn session_dir(&self, session: &str) -> Result<PathBuf> {
        let dir = self.root.join(session);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(SeerError::SessionNotFound {
                name: session.to_string(),
            })
        }
    }

    /// Directory of a task within a named session
    pub fn task_dir(&self, session: &str, task: &str) -> Result<PathBuf> {
        let dir = self.session_dir(session)?.join(task);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(SeerError::TaskNotFound {
                session: session.to_string(),
                task: task.to_string(),
            })
        }
    }
}

/// Immediate subdirectories of `dir`, sorted by name
pub fn list_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| SeerError::io_operation("list", dir.display(), e))?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// Like [`list_subdirs`], but a listing failure is logged and yields nothing
pub fn list_subdirs_lenient(dir: &Path) -> (Vec<PathBuf>, bool) {
    match list_subdirs(dir) {
        Ok(dirs) => (dirs, true),
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Failed to list directory");
            (Vec::new(), false)
        }
    }
}

/// Number of regular files directly inside `dir`
pub fn count_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}

/// Final path component as an owned string
pub fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
