//! Input reading for the CLI.
//!
//! Buffers come from files or stdin. Large files are memory mapped rather
//! than read through a growing `Vec`.

// Memory mapping requires unsafe but is sound for read-only access
#![allow(unsafe_code)]

use crate::error::{IoError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Threshold for using memory mapping (1MB).
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Maximum file size to read into memory (256MB).
const MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Path name that stands for stdin.
pub const STDIN_PATH: &str = "-";

/// File reader that picks direct reads or memory mapping by size.
///
/// # Examples
///
/// ```no_run
/// use streamseg::io::FileReader;
///
/// let reader = FileReader::open("transcript.txt").unwrap();
/// let content = reader.read_to_string().unwrap();
/// ```
pub struct FileReader {
    file: File,
    size: u64,
    path: String,
}

impl FileReader {
    /// Opens a file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist, can't be opened, or is
    /// larger than the supported maximum.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        if !path_ref.exists() {
            return Err(IoError::FileNotFound { path: path_str }.into());
        }

        let file = File::open(path_ref).map_err(|e| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

        let size = file
            .metadata()
            .map_err(|e| IoError::ReadFailed {
                path: path_str.clone(),
                reason: e.to_string(),
            })?
            .len();

        if size > MAX_FILE_SIZE {
            return Err(IoError::ReadFailed {
                path: path_str,
                reason: format!("file too large: {size} bytes (max: {MAX_FILE_SIZE} bytes)"),
            }
            .into());
        }

        Ok(Self {
            file,
            size,
            path: path_str,
        })
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reads the whole file as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the content is not valid UTF-8.
    pub fn read_to_string(&self) -> Result<String> {
        if self.size >= MMAP_THRESHOLD {
            // Safety: the mapping is only read, and copied out before returning
            let mmap = unsafe {
                Mmap::map(&self.file).map_err(|e| IoError::MmapFailed {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })?
            };
            decode(&self.path, mmap.to_vec())
        } else {
            let mut file = &self.file;
            let mut bytes = Vec::with_capacity(usize::try_from(self.size).unwrap_or_default());
            file.read_to_end(&mut bytes)
                .map_err(|e| IoError::ReadFailed {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })?;
            decode(&self.path, bytes)
        }
    }
}

/// Reads a file to string.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    FileReader::open(path)?.read_to_string()
}

/// Reads all of `reader` as UTF-8, labelling errors with `name`.
///
/// # Errors
///
/// Returns an error if reading fails or the content is not valid UTF-8.
pub fn read_stream<R: Read>(mut reader: R, name: &str) -> Result<String> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| IoError::ReadFailed {
            path: name.to_string(),
            reason: e.to_string(),
        })?;
    decode(name, bytes)
}

/// Reads a buffer from `path`, or from stdin when the path is absent or `-`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not valid UTF-8.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != STDIN_PATH => read_file(p),
        _ => read_stream(std::io::stdin().lock(), STDIN_PATH),
    }
}

fn decode(path: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| {
        IoError::InvalidUtf8 {
            path: path.to_string(),
            offset: e.utf8_error().valid_up_to(),
        }
        .into()
    })
}
