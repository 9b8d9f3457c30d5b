//! Error types for bufcopy.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur during copy and compare operations, the [`Result`] type
//! alias, and the stable [`ErrorCode`] classification used by front ends.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Validation | [`Error::NotFound`], [`Error::UnsupportedEncoding`] |
//! | IO | [`Error::Io`] |
//!
//! Any failure while *opening* a source is narrowed to [`Error::NotFound`].
//! Failures on the destination side are not narrowed and surface as
//! [`Error::Io`]. A destination that was partially written before such a
//! failure is left in place.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for bufcopy operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// This helper function detects storage-full conditions across platforms.
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```
/// use std::io;
/// use bufcopy::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    // The raw OS error might be available even if kind() isn't StorageFull
    #[cfg(unix)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Stable, machine-readable classification of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A source or comparison path is not an openable file
    NotFound,
    /// The configured text encoding cannot be round-tripped
    UnsupportedEncoding,
    /// The destination ran out of space
    NoSpace,
    /// The operating system refused access
    PermissionDenied,
    /// Any other IO failure
    IoError,
    /// A post-copy comparison found differing content
    Mismatch,
    /// Invalid arguments supplied by the caller
    InvalidInput,
    /// Failure inside a front end, not in a copy operation
    Internal,
}

impl ErrorCode {
    /// The snake_case name of this code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::UnsupportedEncoding => "unsupported_encoding",
            Self::NoSpace => "no_space",
            Self::PermissionDenied => "permission_denied",
            Self::IoError => "io_error",
            Self::Mismatch => "mismatch",
            Self::InvalidInput => "invalid_input",
            Self::Internal => "internal",
        }
    }

    /// Classify a raw IO error.
    #[must_use]
    pub fn from_io(error: &io::Error) -> Self {
        if is_no_space_error(error) {
            return Self::NoSpace;
        }
        if error.kind() == io::ErrorKind::PermissionDenied {
            return Self::PermissionDenied;
        }
        Self::IoError
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during copy and compare operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The path does not resolve to an openable, existing file.
    ///
    /// The underlying IO failure is kept as the error source.
    #[error("File not found: {path}")]
    NotFound {
        /// Path that could not be opened
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Source and destination resolve to the same file.
    ///
    /// Reported before the destination is created, so the file is left intact.
    #[error("Source and destination are the same file: {path}")]
    SameFile {
        /// Destination path that aliases the source
        path: PathBuf,
    },

    /// The encoding cannot be used to read and write text
    #[error("Unsupported text encoding: {0}")]
    UnsupportedEncoding(&'static str),

    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Stable code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::SameFile { .. } => ErrorCode::InvalidInput,
            Self::UnsupportedEncoding(_) => ErrorCode::UnsupportedEncoding,
            Self::Io(error) => ErrorCode::from_io(error),
        }
    }
}
