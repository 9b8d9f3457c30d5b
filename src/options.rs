//! Configuration options for copy operations.
//!
//! This module provides [`CopyOptions`] for tuning the copy variants,
//! [`Strategy`] for naming a variant at runtime, and [`LineEnding`] for the
//! terminator written by the line-based copy.
//!
//! # Example
//!
//! ```
//! use bufcopy::{CopyOptions, LineEnding};
//!
//! let options = CopyOptions::default()
//!     .with_block_size(4096)
//!     .with_line_ending(LineEnding::Lf)
//!     .with_fsync();
//! assert_eq!(options.block_size, 4096);
//! ```

use crate::copy;
use crate::error::Result;
use encoding_rs::Encoding;
use std::path::Path;

/// Default block size for [`Strategy::Block`], in bytes.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Default writer buffer size for [`Strategy::Buffered`], in bytes.
pub const DEFAULT_WRITE_BUFFER_SIZE: usize = 8 * 1024;

/// Line terminator written after every line by the line-based copy.
///
/// Reading always accepts `\n`, `\r\n` and a lone `\r`, regardless of
/// this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LineEnding {
    /// The host convention: `\r\n` on Windows, `\n` elsewhere (default).
    #[default]
    Native,
    /// Always `\n`.
    Lf,
    /// Always `\r\n`.
    CrLf,
}

impl LineEnding {
    /// The terminator bytes. Every supported encoding is ASCII-compatible,
    /// so these are valid in any of them.
    #[must_use]
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Lf => b"\n",
            Self::CrLf => b"\r\n",
            Self::Native => {
                if cfg!(windows) {
                    b"\r\n"
                } else {
                    b"\n"
                }
            }
        }
    }
}

/// The copy variants, one per buffering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Strategy {
    /// Whole file in one exactly-sized buffer ([`copy_whole`](crate::copy_whole)).
    #[default]
    Whole,
    /// Buffered reader and writer ([`copy_buffered`](crate::copy_buffered)).
    Buffered,
    /// Staged through an in-memory cursor ([`copy_staged`](crate::copy_staged)).
    Staged,
    /// Staged through a text decode and re-encode ([`copy_staged_text`](crate::copy_staged_text)).
    StagedText,
    /// One byte per read and write ([`copy_byte_by_byte`](crate::copy_byte_by_byte)).
    #[cfg_attr(feature = "serde", serde(rename = "byte"))]
    ByteByByte,
    /// Staged in memory, then written one byte at a time
    /// ([`copy_staged_byte_by_byte`](crate::copy_staged_byte_by_byte)).
    #[cfg_attr(feature = "serde", serde(rename = "staged-byte"))]
    StagedByteByByte,
    /// Fixed-size blocks ([`copy_block`](crate::copy_block)).
    Block,
    /// Line at a time through the text encoding ([`copy_lines`](crate::copy_lines)).
    Lines,
}

impl Strategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Strategy; 8] = [
        Self::Whole,
        Self::Buffered,
        Self::Staged,
        Self::StagedText,
        Self::ByteByByte,
        Self::StagedByteByByte,
        Self::Block,
        Self::Lines,
    ];

    /// Run the copy variant this strategy names.
    ///
    /// Returns the count the variant reports: lines for [`Strategy::Lines`],
    /// bytes for everything else.
    pub fn run(self, src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
        match self {
            Self::Whole => copy::copy_whole(src, dst, options),
            Self::Buffered => copy::copy_buffered(src, dst, options),
            Self::Staged => copy::copy_staged(src, dst, options),
            Self::StagedText => copy::copy_staged_text(src, dst, options),
            Self::ByteByByte => copy::copy_byte_by_byte(src, dst, options),
            Self::StagedByteByByte => copy::copy_staged_byte_by_byte(src, dst, options),
            Self::Block => copy::copy_block(src, dst, options),
            Self::Lines => copy::copy_lines(src, dst, options),
        }
    }

    /// Whether [`Strategy::run`] returns a line count rather than a byte count.
    #[must_use]
    pub fn counts_lines(self) -> bool {
        matches!(self, Self::Lines)
    }

    /// Whether the destination is guaranteed byte-identical to the source.
    #[must_use]
    pub fn is_byte_exact(self) -> bool {
        !matches!(self, Self::Lines | Self::StagedText)
    }

    /// The kebab-case name used on the command line and by serde.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Whole => "whole",
            Self::Buffered => "buffered",
            Self::Staged => "staged",
            Self::StagedText => "staged-text",
            Self::ByteByByte => "byte",
            Self::StagedByteByByte => "staged-byte",
            Self::Block => "block",
            Self::Lines => "lines",
        }
    }
}

/// Options for copy operations.
///
/// Use [`Default::default()`] to get the documented behavior, then
/// customize using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `block_size` | 1024 | Block size for the block copy |
/// | `write_buffer_size` | 8 KiB | Writer buffer for the buffered copy |
/// | `encoding` | UTF-8 | Text encoding for line and staged text copies |
/// | `line_ending` | `Native` | Terminator written by the line copy |
/// | `fsync` | `false` | Sync destination to disk before returning |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyOptions {
    /// Size of each block written by the block copy (default: 1024)
    pub block_size: usize,

    /// Capacity of the writer buffer used by the buffered copy (default: 8 KiB)
    pub write_buffer_size: usize,

    /// Text encoding used to decode and re-encode text (default: UTF-8)
    ///
    /// Held constant across read and write. Content that is not valid in
    /// this encoding is replaced, and a warning is emitted.
    pub encoding: &'static Encoding,

    /// Terminator written after each line by the line copy
    pub line_ending: LineEnding,

    /// Whether to sync the destination to disk before returning (default: false)
    pub fsync: bool,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            write_buffer_size: DEFAULT_WRITE_BUFFER_SIZE,
            encoding: encoding_rs::UTF_8,
            line_ending: LineEnding::Native,
            fsync: false,
            warn_handler: None,
        }
    }
}

impl CopyOptions {
    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Set the block size
    ///
    /// Value is clamped to at least 1 so the block loop always advances.
    #[must_use]
    pub fn with_block_size(mut self, size: usize) -> Self {
        self.block_size = size.max(1);
        self
    }

    /// Set the writer buffer size for the buffered copy
    ///
    /// Value is clamped to at least 1.
    #[must_use]
    pub fn with_write_buffer_size(mut self, size: usize) -> Self {
        self.write_buffer_size = size.max(1);
        self
    }

    /// Set the text encoding
    #[must_use]
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the line terminator written by the line copy
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Sync the destination to disk before returning
    #[must_use]
    pub fn with_fsync(mut self) -> Self {
        self.fsync = true;
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }
}
