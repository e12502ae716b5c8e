use std::ffi::OsStr;

use crate::runner::{command_line, run_command};
use crate::util::errors::AppError;

#[test]
fn test_command_line_joins_program_and_args() {
    let line = command_line(
        OsStr::new("scs_packer"),
        &["create", "/w/data_archive_0.scs", "-root", "/w/data_archive_0"],
    );
    assert_eq!(
        line,
        "scs_packer create /w/data_archive_0.scs -root /w/data_archive_0"
    );
}

#[test]
fn test_command_line_without_args() {
    let args: [&str; 0] = [];
    assert_eq!(command_line(OsStr::new("converter_pix"), &args), "converter_pix");
}

#[test]
fn test_run_command_missing_executable() {
    let result = run_command(OsStr::new("packcheck-no-such-tool"), &["create"]);
    match result {
        Err(AppError::Spawn { command, .. }) => {
            assert_eq!(command, "packcheck-no-such-tool create")
        }
        other => panic!("expected Spawn error, got {other:?}"),
    }
}

#[cfg(unix)]
mod unix {
    use std::ffi::OsStr;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use tempfile::tempdir;

    use crate::runner::{run_command, ArchiveTool, ExternalTools};
    use crate::util::errors::AppError;

    fn write_script(path: &Path, body: &str) {
        fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_run_command_success_captures_output() {
        let output = run_command(OsStr::new("sh"), &["-c", "echo packed; echo warn >&2"]).unwrap();
        assert_eq!(output.stdout, "packed\n");
        assert_eq!(output.stderr, "warn\n");
    }

    #[test]
    fn test_run_command_non_zero_exit() {
        let result = run_command(OsStr::new("sh"), &["-c", "echo broken archive >&2; exit 3"]);
        match result {
            Err(AppError::ToolFailed {
                command,
                status,
                stderr,
            }) => {
                assert_eq!(command, "sh -c echo broken archive >&2; exit 3");
                assert_eq!(status.code(), Some(3));
                assert_eq!(stderr, "broken archive");
            }
            other => panic!("expected ToolFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_external_tools_argument_conventions() {
        let dir = tempdir().unwrap();
        let packer = dir.path().join("packer.sh");
        let extractor = dir.path().join("extractor.sh");
        let packer_log = dir.path().join("packer.args");
        let extractor_log = dir.path().join("extractor.args");

        write_script(
            &packer,
            &format!("echo \"$@\" > '{}'", packer_log.display()),
        );
        write_script(
            &extractor,
            &format!("echo \"$@\" > '{}'", extractor_log.display()),
        );

        let tools = ExternalTools::new(&packer, &extractor);
        tools
            .pack(Path::new("/w/data_archive_0.scs"), Path::new("/w/data_archive_0"))
            .unwrap();
        tools
            .extract(
                Path::new("/w/data_archive_0.scs"),
                Path::new("/w/data_archive_0_extracted"),
            )
            .unwrap();

        assert_eq!(
            fs::read_to_string(&packer_log).unwrap(),
            "create /w/data_archive_0.scs -root /w/data_archive_0\n"
        );
        assert_eq!(
            fs::read_to_string(&extractor_log).unwrap(),
            "-b /w/data_archive_0.scs -extract_d / -e /w/data_archive_0_extracted\n"
        );
    }

    #[test]
    fn test_external_tools_propagates_failure() {
        let dir = tempdir().unwrap();
        let packer = dir.path().join("packer.sh");
        write_script(&packer, "exit 1");

        let tools = ExternalTools::new(&packer, "unused");
        let result = tools.pack(Path::new("/w/a.scs"), Path::new("/w/a"));
        assert!(matches!(result, Err(AppError::ToolFailed { .. })));
    }
}
