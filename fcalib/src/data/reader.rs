//! Permissive text decoding of candidate files.
//!
//! Invalid UTF-8 sequences are replaced with U+FFFD rather than failing the
//! read. A file is only [`Unreadable`] when it cannot be opened, is larger
//! than the configured limit, or looks binary (a NUL byte near the start).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

/// Default upper bound on file size, in bytes.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 20 * 1024 * 1024;

/// Number of leading bytes inspected for NUL when sniffing binary content.
const BINARY_SNIFF_LEN: usize = 8 * 1024;

/// Why a file was skipped.
#[derive(Debug, Error)]
pub enum Unreadable {
    /// The file could not be opened or read
    #[error("cannot read: {0}")]
    Io(#[from] std::io::Error),

    /// The file exceeds the size limit
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    /// The file contains NUL bytes and is not treated as text
    #[error("binary content")]
    Binary,
}

/// Reads files as text, one file handle at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentReader {
    max_file_size: u64,
}

impl Default for ContentReader {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl ContentReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size limit in bytes.
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Read and decode `path`. The handle is closed before this returns.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<String, Unreadable> {
        let file = File::open(path.as_ref())?;

        let size = file.metadata()?.len();
        if size > self.max_file_size {
            return Err(Unreadable::TooLarge {
                size,
                limit: self.max_file_size,
            });
        }

        let mut bytes = Vec::with_capacity(size as usize);
        // The file may grow between stat and read.
        file.take(self.max_file_size.saturating_add(1))
            .read_to_end(&mut bytes)?;
        if bytes.len() as u64 > self.max_file_size {
            return Err(Unreadable::TooLarge {
                size: bytes.len() as u64,
                limit: self.max_file_size,
            });
        }

        decode(&bytes)
    }
}

/// Decode raw bytes as text, rejecting binary content.
pub fn decode(bytes: &[u8]) -> Result<String, Unreadable> {
    let head = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    if head.contains(&0) {
        return Err(Unreadable::Binary);
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}
