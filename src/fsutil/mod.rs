pub mod directory;
pub mod stage;

pub use directory::walk_dir;
pub use stage::{CaseLayout, FixtureSet, FixtureStager};

use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::Path;

use crate::util::errors::AppError;

/// Deletes `dir` recursively if it exists, then creates it empty.
///
/// # Errors
///
/// `AppError::RemoveDir` or `AppError::CreateDir` if either step fails.
pub fn recreate_dir(dir: &Path) -> Result<(), AppError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(AppError::RemoveDir(dir.to_path_buf(), e)),
    }
    fs::create_dir_all(dir).map_err(|e| AppError::CreateDir(dir.to_path_buf(), e))
}

/// Removes a file left over from a previous run, if any.
pub fn remove_stale_file(path: &Path) -> Result<(), AppError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::RemoveArchive(path.to_path_buf(), e)),
    }
}

/// Copies `src` to `dst`, keeping the contents, permissions and modification time.
pub fn copy_with_mtime(src: &Path, dst: &Path) -> Result<u64, AppError> {
    let copy_err = |e: io::Error| AppError::CopyFixture(src.to_path_buf(), e);

    let modified = fs::metadata(src).and_then(|m| m.modified()).map_err(copy_err)?;
    let bytes = fs::copy(src, dst).map_err(copy_err)?;

    File::options()
        .write(true)
        .open(dst)
        .and_then(|file| file.set_modified(modified))
        .map_err(copy_err)?;

    Ok(bytes)
}
