pub mod tools;

pub use tools::{ArchiveTool, ExternalTools};

use std::ffi::{OsStr, OsString};
use std::process::Command;

use tracing::{debug, error, trace};

use crate::util::errors::AppError;

/// Captured output of a tool that exited successfully.
#[derive(Debug, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Renders a program and its arguments as a single space separated line.
pub fn command_line<S: AsRef<OsStr>>(program: &OsStr, args: &[S]) -> String {
    let mut line = program.to_string_lossy().into_owned();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.as_ref().to_string_lossy());
    }
    line
}

/// Runs an external executable and waits for it to finish.
///
/// The full command line is logged before the process is launched. Stdout and
/// stderr are captured and written to the log at `trace` level.
///
/// # Arguments
///
/// * `program` - executable name (looked up on `PATH`) or path.
/// * `args` - ordered argument list.
///
/// # Errors
///
/// * `AppError::Spawn` if the process cannot be launched.
/// * `AppError::ToolFailed` if it exits with a non-zero status.
///
/// # Example
///
/// ```no_run
/// use packcheck::runner::run_command;
/// use std::ffi::OsStr;
///
/// run_command(OsStr::new("scs_packer"), &["create", "/tmp/a.scs", "-root", "/tmp/a"]).unwrap();
/// ```
pub fn run_command<S: AsRef<OsStr>>(
    program: &OsStr,
    args: &[S],
) -> Result<CommandOutput, AppError> {
    let command = command_line(program, args);
    debug!("{command}");

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| AppError::Spawn {
            command: command.clone(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if !stdout.is_empty() {
        trace!(target: "packcheck::tool", "stdout: {}", stdout.trim_end());
    }
    if !stderr.is_empty() {
        trace!(target: "packcheck::tool", "stderr: {}", stderr.trim_end());
    }

    if !output.status.success() {
        error!("`{command}` failed with {}", output.status);
        return Err(AppError::ToolFailed {
            command,
            status: output.status,
            stderr: stderr.trim_end().to_string(),
        });
    }

    Ok(CommandOutput { stdout, stderr })
}

/// Builds an argument list from a mix of string literals and paths.
pub(crate) fn os_args<const N: usize>(args: [&OsStr; N]) -> Vec<OsString> {
    args.iter().map(|arg| arg.to_os_string()).collect()
}

#[cfg(test)]
mod tests;
