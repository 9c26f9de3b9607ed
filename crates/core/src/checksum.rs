//! Content fingerprinting with CRC32C
//!
//! Files are fingerprinted with the Castagnoli CRC32 polynomial, the same
//! algorithm the remote store records per object, so a local checksum can be
//! compared against store metadata without downloading anything. This is a
//! change-detection fingerprint, not a cryptographic integrity guarantee.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::path::LocalFile;

/// CRC32C (Castagnoli) checksum of a file's full content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksum(pub u32);

impl std::fmt::Display for Checksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Read buffer size for streamed checksumming
const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the CRC32C checksum of a single file
pub fn checksum_file(path: &Path) -> std::io::Result<Checksum> {
    let mut file = File::open(path)?;
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut crc = 0u32;

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        crc = crc32c::crc32c_append(crc, &buffer[..bytes_read]);
    }

    Ok(Checksum(crc))
}

/// Compute checksums for every file, all-or-nothing
///
/// Read failures are collected across all files and returned as a single
/// aggregate error; no partial map is returned if any file fails.
pub fn fingerprint(files: Vec<LocalFile>) -> Result<HashMap<LocalFile, Checksum>> {
    let mut checksums = HashMap::with_capacity(files.len());
    let mut failures = Vec::new();

    for file in files {
        match checksum_file(&file.absolute) {
            Ok(checksum) => {
                checksums.insert(file, checksum);
            }
            Err(e) => failures.push(format!(
                "unable to generate checksum of file [{}]: {e}",
                file.absolute.display()
            )),
        }
    }

    if !failures.is_empty() {
        return Err(Error::Fingerprint(failures));
    }

    tracing::debug!(files = checksums.len(), "fingerprinted local files");
    Ok(checksums)
}
