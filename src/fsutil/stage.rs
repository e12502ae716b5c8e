use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::fsutil::{copy_with_mtime, recreate_dir, remove_stale_file};
use crate::util::errors::AppError;

const DIR_PREFIX: &str = "data_archive";
const EXTRACTED_SUFFIX: &str = "_extracted";

/// Ordered list of fixture file names making up one round-trip scenario.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FixtureSet {
    files: Vec<String>,
}

impl FixtureSet {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }
}

impl fmt::Display for FixtureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, file) in self.files.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{file}'")?;
        }
        write!(f, "]")
    }
}

/// Every on-disk path used by case number `number`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseLayout {
    pub number: u64,
    pub staging_dir: PathBuf,
    pub original_archive: PathBuf,
    pub extracted_dir: PathBuf,
    pub repacked_archive: PathBuf,
}

impl CaseLayout {
    pub fn new(work_root: &Path, number: u64, archive_ext: &str) -> Self {
        let stem = format!("{DIR_PREFIX}_{number}");
        let extracted = format!("{stem}{EXTRACTED_SUFFIX}");

        Self {
            number,
            staging_dir: work_root.join(&stem),
            original_archive: work_root.join(format!("{stem}.{archive_ext}")),
            extracted_dir: work_root.join(&extracted),
            repacked_archive: work_root.join(format!("{extracted}.{archive_ext}")),
        }
    }
}

/// Copies fixture sets out of the canonical fixture directory into numbered
/// working directories below `work_root`.
#[derive(Debug, Clone)]
pub struct FixtureStager {
    fixture_dir: PathBuf,
    work_root: PathBuf,
    archive_ext: String,
}

impl FixtureStager {
    pub fn new(
        fixture_dir: impl Into<PathBuf>,
        work_root: impl Into<PathBuf>,
        archive_ext: impl Into<String>,
    ) -> Self {
        Self {
            fixture_dir: fixture_dir.into(),
            work_root: work_root.into(),
            archive_ext: archive_ext.into(),
        }
    }

    pub fn fixture_dir(&self) -> &Path {
        &self.fixture_dir
    }

    pub fn work_root(&self) -> &Path {
        &self.work_root
    }

    pub fn layout(&self, number: u64) -> CaseLayout {
        CaseLayout::new(&self.work_root, number, &self.archive_ext)
    }

    /// Populates a fresh staging directory with the fixture set.
    ///
    /// The staging directory is wiped and recreated first, and archives left
    /// behind by an earlier run with the same number are removed. Each fixture
    /// is copied with its modification time preserved.
    ///
    /// # Errors
    ///
    /// * `AppError::FixtureNotExist` if a named fixture is not a file in the fixture directory.
    /// * `AppError::DuplicateFixture` if two fixtures share a file name.
    /// * `AppError::RemoveDir` / `AppError::CreateDir` / `AppError::RemoveArchive` if the
    ///   working area cannot be prepared.
    /// * `AppError::CopyFixture` if a copy fails.
    pub fn stage(&self, layout: &CaseLayout, fixtures: &FixtureSet) -> Result<(), AppError> {
        recreate_dir(&layout.staging_dir)?;
        remove_stale_file(&layout.original_archive)?;
        remove_stale_file(&layout.repacked_archive)?;

        let mut staged: HashMap<String, &str> = HashMap::new();
        for name in fixtures.files() {
            let src = self.fixture_dir.join(name);
            if !src.is_file() {
                return Err(AppError::FixtureNotExist(src));
            }

            // Fixtures land flat in the staging directory, like a plain copy into it
            let Some(file_name) = src.file_name() else {
                return Err(AppError::FixtureNotExist(src));
            };
            let flat = file_name.to_string_lossy().into_owned();
            if let Some(first) = staged.get(&flat) {
                return Err(AppError::DuplicateFixture(
                    first.to_string(),
                    name.clone(),
                    flat,
                ));
            }

            let dst = layout.staging_dir.join(file_name);
            let bytes = copy_with_mtime(&src, &dst)?;
            debug!("staged {} ({bytes} bytes)", dst.display());
            staged.insert(flat, name);
        }

        Ok(())
    }
}
