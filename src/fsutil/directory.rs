use std::fs;
use std::path::{Path, PathBuf};

use crate::util::errors::AppError;

/// Recursively walks a directory and returns every file below it, sorted.
///
/// Used to log what an extractor actually produced. Symlinks are listed as
/// entries and never followed, so the walk stays inside `path`.
///
/// # Arguments
///
/// * `path` - root directory to walk.
///
/// # Returns
///
/// * `Result<Vec<PathBuf>, AppError>` - all non-directory entries found, or the first read error.
pub fn walk_dir(path: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut stack = vec![path.to_path_buf()];
    let mut files = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = fs::read_dir(&dir).map_err(|e| AppError::ReadFile(dir.clone(), e))?;

        for entry in entries {
            let entry = entry.map_err(|e| AppError::ReadFile(dir.clone(), e))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| AppError::ReadFile(path.clone(), e))?;
            if file_type.is_dir() {
                stack.push(path);
            } else {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
