use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

use crate::util::errors::AppError;

pub const BLOCK_SIZE: usize = 64 * 1024; // 64KB

/// SHA-256 of a file's bytes. Only ever compared for equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({self})")
    }
}

/// Calculates the digest of a file, reading it in `BLOCK_SIZE` blocks
///
/// # arguments
///
/// * 'path' - file to hash
///
/// # returns
///
/// The SHA-256 digest of the file contents, or `AppError::ReadFile` if the file
/// cannot be opened or read
///
/// # examples
///
/// ```no_run
/// use packcheck::util::digest::digest_file;
/// use std::path::Path;
///
/// let digest = digest_file(Path::new("data_archive_0.scs")).unwrap();
/// println!("{digest}");
/// ```
pub fn digest_file(path: &Path) -> Result<ContentDigest, AppError> {
    digest_file_with_block_size(path, BLOCK_SIZE)
}

/// Same as [`digest_file`] with an explicit read block size.
pub fn digest_file_with_block_size(
    path: &Path,
    block_size: usize,
) -> Result<ContentDigest, AppError> {
    let file = File::open(path).map_err(|e| AppError::ReadFile(path.to_path_buf(), e))?;
    digest_reader(BufReader::new(file), block_size)
        .map_err(|e| AppError::ReadFile(path.to_path_buf(), e))
}

/// Streams `reader` to exhaustion into a SHA-256 hasher, one block at a time.
///
/// Memory use is bounded by `block_size` regardless of the input length.
pub fn digest_reader<R: Read>(mut reader: R, block_size: usize) -> io::Result<ContentDigest> {
    let mut hasher = Sha256::new();
    let mut block = vec![0u8; block_size.max(1)];

    loop {
        let bytes_read = match reader.read(&mut block) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&block[..bytes_read]);
    }

    let mut hash_arr = [0u8; 32];
    hash_arr.copy_from_slice(&hasher.finalize());
    Ok(ContentDigest(hash_arr))
}
