use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Fixture directory does not exist: `{0}`")]
    FixtureDirNotExist(PathBuf),

    #[error("Fixture does not exist: `{0}`")]
    FixtureNotExist(PathBuf),

    #[error("Fixtures `{0}` and `{1}` would both be staged as `{2}`")]
    DuplicateFixture(String, String, String),

    #[error("Failed to copy fixture `{0}`: {1}")]
    CopyFixture(PathBuf, #[source] io::Error),

    #[error("Error removing directory `{0}`: {1}")]
    RemoveDir(PathBuf, #[source] io::Error),

    #[error("Error creating directory `{0}`: {1}")]
    CreateDir(PathBuf, #[source] io::Error),

    #[error("Error removing stale archive `{0}`: {1}")]
    RemoveArchive(PathBuf, #[source] io::Error),

    #[error("Failed to read `{0}`: {1}")]
    ReadFile(PathBuf, #[source] io::Error),

    #[error("Failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed with {status}: {stderr}")]
    ToolFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to read suite file `{0}`: {1}")]
    SuiteFile(PathBuf, #[source] io::Error),

    #[error("Invalid suite file `{0}`: {1}")]
    SuiteParse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to open log file `{0}`: {1}")]
    LogFile(PathBuf, #[source] io::Error),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Result reporter stopped before the suite finished")]
    ReporterClosed,

    #[error("Result reporter thread panicked")]
    ReporterPanicked,
}
