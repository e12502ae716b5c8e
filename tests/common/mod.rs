#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::{tempdir, TempDir};

/// Deterministic packer: a GNU tar with normalised order, owners, modes and mtimes.
pub const TAR_PACKER: &str = r#"[ "$1" = create ] && [ "$3" = -root ] || exit 64
exec tar --sort=name --format=ustar --mtime=@0 --owner=0 --group=0 --numeric-owner \
    --mode=u=rwX,go=rX -C "$4" -cf "$2" ."#;

pub const TAR_EXTRACTOR: &str = r#"[ "$1" = -b ] && [ "$3" = -extract_d ] && [ "$5" = -e ] || exit 64
exec tar -xf "$2" -C "$6""#;

/// Extracts, then loses the last file in name order.
pub const LOSSY_EXTRACTOR: &str = r#"tar -xf "$2" -C "$6" || exit 1
last=$(ls "$6" | sort | tail -n 1)
rm -f "$6/$last""#;

/// Deterministic packer that also complains on stderr before succeeding.
pub const NOISY_PACKER: &str = r#"echo 'skipped 0 textures' >&2
exec tar --sort=name --format=ustar --mtime=@0 --owner=0 --group=0 --numeric-owner \
    --mode=u=rwX,go=rX -C "$4" -cf "$2" ."#;

pub const CRASHING_PACKER: &str = "echo 'packer: cannot open root' >&2\nexit 3";

pub const FIXTURES: [&str; 9] = [
    "b8g8r8_nomips_3_3_2_2_2_0.tobj",
    "b8g8r8_nomips.dds",
    "b8g8r8_mips_3_3_2_2_2_0.tobj",
    "b8g8r8_mips.dds",
    "cubemap_dxt1_nomips.tobj",
    "cubemap_dxt1_nomips_b.dds",
    "cubemap_dxt1_nomips_s.dds",
    "dxt5_mips.tobj",
    "dxt5_mips.dds",
];

pub struct Harness {
    pub temp: TempDir,
    pub fixtures: PathBuf,
    pub work: PathBuf,
    pub log: PathBuf,
}

impl Harness {
    pub fn new() -> Self {
        let temp = tempdir().unwrap();
        let fixtures = temp.path().join("data");
        let work = temp.path().join("temp");
        let log = temp.path().join("test.log.txt");

        fs::create_dir(&fixtures).unwrap();
        for (i, name) in FIXTURES.iter().enumerate() {
            let content: Vec<u8> = (0..(512 * (i + 1))).map(|b| (b * 31 + i) as u8).collect();
            fs::write(fixtures.join(name), content).unwrap();
        }

        Self {
            temp,
            fixtures,
            work,
            log,
        }
    }

    /// Writes an executable shell script and returns its path.
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.temp.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    pub fn case_dir(&self, number: u64) -> PathBuf {
        self.work.join(format!("data_archive_{number}"))
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
