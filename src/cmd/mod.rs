pub mod logging;
pub mod progress_bar;

use std::fs;
use std::path::PathBuf;

use byte_unit::{Byte, UnitType};
use clap::Parser;

use crate::fsutil::{FixtureSet, FixtureStager};
use crate::roundtrip::{default_suite, load_suite};
use crate::runner::ExternalTools;
use crate::util::errors::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "packcheck",
    version,
    about = "Verify that archives survive a pack, extract and repack round-trip",
    long_about = "Stages fixture sets, packs them with an external packer, extracts the archive \
                  with an external extractor, repacks the result and checks that both archives \
                  are byte-for-byte identical"
)]
pub struct Cli {
    /// Packer executable, called as `<packer> create <archive> -root <dir>`
    #[arg(long, env = "PACKCHECK_PACKER", default_value = "scs_packer")]
    pub packer: PathBuf,

    /// Extractor executable, called as `<extractor> -b <archive> -extract_d / -e <dir>`
    #[arg(long, env = "PACKCHECK_EXTRACTOR", default_value = "converter_pix")]
    pub extractor: PathBuf,

    /// Directory holding the fixture files named by the suite
    #[arg(long, short = 'f', default_value = "data")]
    pub fixtures: PathBuf,

    /// Directory receiving working directories and archives
    #[arg(long, short = 'w', default_value = "temp")]
    pub work_dir: PathBuf,

    /// JSON suite file replacing the built-in scenarios
    #[arg(long, short = 's')]
    pub suite: Option<PathBuf>,

    /// Extension given to packed archives
    #[arg(long, default_value = "scs")]
    pub archive_ext: String,

    /// Maximum number of cases run at once
    #[arg(long = "jobs", short = 'j', default_value_t = 1)]
    pub jobs: usize,

    /// Log file, truncated at the start of every run
    #[arg(long, default_value = "packcheck.log")]
    pub log_file: PathBuf,

    /// Log filter directive, e.g. `debug` or `packcheck=trace`
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

impl Cli {
    /// Fixture sets to run: the suite file when one is given, the built-in scenarios otherwise.
    pub fn fixture_sets(&self) -> Result<Vec<FixtureSet>, AppError> {
        match &self.suite {
            Some(path) => load_suite(path),
            None => Ok(default_suite()),
        }
    }

    /// Builds a stager on absolute paths, creating the work directory if needed.
    ///
    /// External tools receive absolute paths only, so both directories are
    /// resolved here once.
    pub fn stager(&self) -> Result<FixtureStager, AppError> {
        let fixture_dir = fs::canonicalize(&self.fixtures)
            .map_err(|_| AppError::FixtureDirNotExist(self.fixtures.clone()))?;

        fs::create_dir_all(&self.work_dir)
            .map_err(|e| AppError::CreateDir(self.work_dir.clone(), e))?;
        let work_root = fs::canonicalize(&self.work_dir)?;

        Ok(FixtureStager::new(fixture_dir, work_root, &self.archive_ext))
    }

    pub fn tools(&self) -> ExternalTools {
        ExternalTools::new(&self.packer, &self.extractor)
    }
}

/// Convert bytes into a more human readable form
pub fn format_bytes(bytes: u64) -> String {
    let unit = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Decimal);
    format!("{:.2} {}", unit.get_value(), unit.get_unit())
}
