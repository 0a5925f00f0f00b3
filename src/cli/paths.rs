//! Sessions root resolution

use std::env;
use std::path::PathBuf;

/// Resolve the sessions root: the explicit path, else the current directory
pub fn resolve_root_path(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}
