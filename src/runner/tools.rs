use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::runner::{os_args, run_command, CommandOutput};
use crate::util::errors::AppError;

/// The two operations a round-trip needs from the outside world.
pub trait ArchiveTool: Sync {
    /// Builds `archive` from the contents of `root`.
    fn pack(&self, archive: &Path, root: &Path) -> Result<(), AppError>;

    /// Unpacks `archive` into `dest`, which already exists and is empty.
    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), AppError>;
}

/// Packer and extractor executables invoked through [`run_command`].
///
/// * packer: `<packer> create <archive> -root <dir>`
/// * extractor: `<extractor> -b <archive> -extract_d / -e <dir>`
#[derive(Debug, Clone)]
pub struct ExternalTools {
    packer: PathBuf,
    extractor: PathBuf,
}

impl ExternalTools {
    pub fn new(packer: impl Into<PathBuf>, extractor: impl Into<PathBuf>) -> Self {
        Self {
            packer: packer.into(),
            extractor: extractor.into(),
        }
    }

    pub fn packer(&self) -> &Path {
        &self.packer
    }

    pub fn extractor(&self) -> &Path {
        &self.extractor
    }
}

impl ArchiveTool for ExternalTools {
    fn pack(&self, archive: &Path, root: &Path) -> Result<(), AppError> {
        let args = os_args([
            OsStr::new("create"),
            archive.as_os_str(),
            OsStr::new("-root"),
            root.as_os_str(),
        ]);
        let output = run_command(self.packer.as_os_str(), &args)?;
        warn_on_stderr("packer", &output);
        Ok(())
    }

    fn extract(&self, archive: &Path, dest: &Path) -> Result<(), AppError> {
        let args = os_args([
            OsStr::new("-b"),
            archive.as_os_str(),
            OsStr::new("-extract_d"),
            OsStr::new("/"),
            OsStr::new("-e"),
            dest.as_os_str(),
        ]);
        let output = run_command(self.extractor.as_os_str(), &args)?;
        warn_on_stderr("extractor", &output);
        Ok(())
    }
}

// Exit status decides success; stderr from a successful run is only reported
fn warn_on_stderr(tool: &str, output: &CommandOutput) {
    for line in output.stderr.lines().filter(|line| !line.trim().is_empty()) {
        warn!("{tool}: {line}");
    }
}
