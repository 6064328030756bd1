//! Discovery module: Find the tq project root by walking up the directory tree

use std::path::{Path, PathBuf};

use crate::{CONFIG_FILE, Result, TqError};

/// Find the project root by walking up from the given path.
///
/// Returns the directory containing tq.json.
pub fn find_tq_root(start: &Path) -> Result<PathBuf> {
    let mut current = start.canonicalize()?;

    loop {
        if current.join(CONFIG_FILE).is_file() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return Err(TqError::NotInProject),
        }
    }
}

/// Get the config file path.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
