use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::cmd::format_bytes;
use crate::fsutil::{recreate_dir, walk_dir, CaseLayout, FixtureSet, FixtureStager};
use crate::runner::ArchiveTool;
use crate::util::digest::{digest_file, ContentDigest};
use crate::util::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Mismatch,
}

#[derive(Debug, Clone)]
pub struct ArchiveArtifact {
    pub path: PathBuf,
    pub digest: ContentDigest,
    pub size: u64,
}

impl ArchiveArtifact {
    fn inspect(path: &Path) -> Result<Self, AppError> {
        let digest = digest_file(path)?;
        let size = fs::metadata(path)
            .map_err(|e| AppError::ReadFile(path.to_path_buf(), e))?
            .len();

        Ok(Self {
            path: path.to_path_buf(),
            digest,
            size,
        })
    }
}

/// Result of a case that ran all five stages.
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub number: u64,
    pub fixtures: FixtureSet,
    pub original: ArchiveArtifact,
    pub repacked: ArchiveArtifact,
    pub verdict: Verdict,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Match
    }
}

/// Runs one round-trip: stage, pack, extract, repack, compare.
///
/// Every stage depends on the previous one succeeding. Staging, tool and
/// hashing failures are returned as `Err` and are meant to stop the whole
/// suite. A digest mismatch is not an error: it comes back as an `Ok` report
/// with `Verdict::Mismatch`.
///
/// # Arguments
///
/// * `stager` - provides the fixture directory and the case's working paths.
/// * `tools` - packer and extractor.
/// * `number` - unique case number for this run.
/// * `fixtures` - files to stage.
///
/// # Example
///
/// ```no_run
/// use packcheck::fsutil::{FixtureSet, FixtureStager};
/// use packcheck::roundtrip::run_case;
/// use packcheck::runner::ExternalTools;
///
/// let stager = FixtureStager::new("/data", "/temp", "scs");
/// let tools = ExternalTools::new("scs_packer", "converter_pix");
/// let set = FixtureSet::new(["dxt5_mips.tobj", "dxt5_mips.dds"]);
/// let report = run_case(&stager, &tools, 0, &set).unwrap();
/// assert!(report.passed());
/// ```
pub fn run_case<T: ArchiveTool + ?Sized>(
    stager: &FixtureStager,
    tools: &T,
    number: u64,
    fixtures: &FixtureSet,
) -> Result<CaseReport, AppError> {
    let layout = stager.layout(number);
    info!("case {number}: {fixtures}");

    // Stage
    stager.stage(&layout, fixtures)?;

    // Pack
    tools.pack(&layout.original_archive, &layout.staging_dir)?;

    // Extract
    recreate_dir(&layout.extracted_dir)?;
    tools.extract(&layout.original_archive, &layout.extracted_dir)?;
    log_extracted(&layout);

    // Repack
    tools.pack(&layout.repacked_archive, &layout.extracted_dir)?;

    // Compare
    let original = ArchiveArtifact::inspect(&layout.original_archive)?;
    let repacked = ArchiveArtifact::inspect(&layout.repacked_archive)?;
    debug!(
        "case {number}: {} {} ({})",
        original.digest,
        original.path.display(),
        format_bytes(original.size)
    );
    debug!(
        "case {number}: {} {} ({})",
        repacked.digest,
        repacked.path.display(),
        format_bytes(repacked.size)
    );

    let verdict = if original.digest == repacked.digest {
        info!("case {number}: archives match");
        Verdict::Match
    } else {
        warn!(
            "case {number}: archives are different {} != {}",
            original.path.display(),
            repacked.path.display()
        );
        Verdict::Mismatch
    };

    Ok(CaseReport {
        number,
        fixtures: fixtures.clone(),
        original,
        repacked,
        verdict,
    })
}

// A failed listing is logged and never aborts the case
fn log_extracted(layout: &CaseLayout) {
    let files = match walk_dir(&layout.extracted_dir) {
        Ok(files) => files,
        Err(e) => {
            warn!("case {}: could not list extracted files: {e}", layout.number);
            return;
        }
    };
    debug!("case {}: extracted {} files", layout.number, files.len());
    for file in files {
        if let Ok(relative) = file.strip_prefix(&layout.extracted_dir) {
            debug!("case {}:   {}", layout.number, relative.display());
        }
    }
}
