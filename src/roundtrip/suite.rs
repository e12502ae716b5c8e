use std::fmt;
use std::fs;
use std::path::Path;
use std::thread;

use colored::*;
use crossbeam::channel::{unbounded, Receiver};
use indicatif::ProgressBar;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Deserialize;
use tracing::info;

use crate::fsutil::{FixtureSet, FixtureStager};
use crate::roundtrip::case::{run_case, CaseReport};
use crate::roundtrip::sequence::CaseSequence;
use crate::runner::ArchiveTool;
use crate::util::errors::AppError;

/// Running pass/fail counters for a suite.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub total: usize,
    pub passed: usize,
}

impl Tally {
    pub fn record(&mut self, report: &CaseReport) {
        self.total += 1;
        if report.passed() {
            self.passed += 1;
        }
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tests passed: {} / {}", self.passed, self.total)
    }
}

#[derive(Deserialize)]
struct SuiteFile {
    cases: Vec<FixtureSet>,
}

/// The built-in texture object scenarios.
pub fn default_suite() -> Vec<FixtureSet> {
    vec![
        FixtureSet::new(["b8g8r8_nomips_3_3_2_2_2_0.tobj", "b8g8r8_nomips.dds"]),
        FixtureSet::new(["b8g8r8_mips_3_3_2_2_2_0.tobj", "b8g8r8_mips.dds"]),
        FixtureSet::new([
            "cubemap_dxt1_nomips.tobj",
            "cubemap_dxt1_nomips_b.dds",
            "cubemap_dxt1_nomips_s.dds",
        ]),
        FixtureSet::new(["dxt5_mips.tobj", "dxt5_mips.dds"]),
    ]
}

/// Reads a suite from a JSON file shaped like `{"cases": [["a.tobj", "a.dds"], ...]}`.
pub fn load_suite(path: &Path) -> Result<Vec<FixtureSet>, AppError> {
    let raw = fs::read_to_string(path).map_err(|e| AppError::SuiteFile(path.to_path_buf(), e))?;
    let suite: SuiteFile =
        serde_json::from_str(&raw).map_err(|e| AppError::SuiteParse(path.to_path_buf(), e))?;
    Ok(suite.cases)
}

/// Runs fixture sets as round-trip cases and tallies the outcome.
pub struct SuiteDriver<'a, T: ArchiveTool + ?Sized> {
    stager: &'a FixtureStager,
    tools: &'a T,
    sequence: CaseSequence,
    jobs: usize,
    progress_bar: Option<ProgressBar>,
}

impl<'a, T: ArchiveTool + ?Sized> SuiteDriver<'a, T> {
    pub fn new(stager: &'a FixtureStager, tools: &'a T) -> Self {
        Self {
            stager,
            tools,
            sequence: CaseSequence::new(),
            jobs: 1,
            progress_bar: None,
        }
    }

    /// Number of cases allowed to run at once. `0` and `1` both mean sequential.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn progress_bar(mut self, progress_bar: ProgressBar) -> Self {
        self.progress_bar = Some(progress_bar);
        self
    }

    /// Runs every fixture set in order and returns the tally.
    ///
    /// Case numbers are drawn from the driver's own sequence, so calling `run`
    /// twice, or listing the same fixture set twice, never reuses a working
    /// directory. Completed cases are handed to a reporter thread that prints
    /// mismatches as they arrive and keeps the counters.
    ///
    /// # Errors
    ///
    /// The first error returned by a case. With `jobs <= 1` no later case is
    /// started; with a worker pool, no further case is scheduled but cases
    /// already running may still finish.
    pub fn run(&self, sets: &[FixtureSet]) -> Result<Tally, AppError> {
        let (sender, receiver) = unbounded::<CaseReport>();
        let progress_bar = self.progress_bar.clone();
        let reporter = thread::spawn(move || reporter_thread(receiver, progress_bar));

        let numbered: Vec<(u64, &FixtureSet)> =
            sets.iter().map(|set| (self.sequence.next_number(), set)).collect();

        let run_one = |&(number, fixtures): &(u64, &FixtureSet)| -> Result<(), AppError> {
            let report = run_case(self.stager, self.tools, number, fixtures)?;
            sender.send(report).map_err(|_| AppError::ReporterClosed)
        };

        let result = if self.jobs <= 1 {
            numbered.iter().try_for_each(run_one)
        } else {
            info!("running {} cases on {} workers", numbered.len(), self.jobs);
            ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()
                .map_err(AppError::from)
                .and_then(|pool| pool.install(|| numbered.par_iter().try_for_each(run_one)))
        };

        // Close the channel so the reporter can finish
        drop(sender);
        let tally = reporter.join().map_err(|_| AppError::ReporterPanicked)?;
        result?;

        info!("{tally}");
        Ok(tally)
    }
}

fn reporter_thread(receiver: Receiver<CaseReport>, progress_bar: Option<ProgressBar>) -> Tally {
    let mut tally = Tally::default();

    for report in receiver.iter() {
        tally.record(&report);

        if !report.passed() {
            let line = format!(
                "{}: archives are different {} != {} {}",
                "ERROR".red(),
                report.original.path.display(),
                report.repacked.path.display(),
                report.fixtures
            );
            match progress_bar.as_ref() {
                Some(pb) => pb.suspend(|| println!("{line}")),
                None => println!("{line}"),
            }
        }

        if let Some(pb) = progress_bar.as_ref() {
            pb.inc(1);
        }
    }

    tally
}
