pub mod case;
pub mod sequence;
pub mod suite;

pub use case::{run_case, ArchiveArtifact, CaseReport, Verdict};
pub use sequence::CaseSequence;
pub use suite::{default_suite, load_suite, SuiteDriver, Tally};
