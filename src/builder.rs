//! Builder API for ergonomic copying operations.
//!
//! The builder pattern provides a fluent interface for picking a copy
//! strategy, configuring it, and optionally verifying the result. This is
//! often more convenient than calling the strategy functions with a
//! hand-built [`CopyOptions`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use bufcopy::CopyBuilder;
//!
//! // Whole-file copy with defaults
//! let report = CopyBuilder::new("src.bin", "dst.bin").run()?;
//! println!("Copied {} bytes", report.count);
//! # Ok::<(), bufcopy::Error>(())
//! ```
//!
//! ## Block Copy with Verification
//!
//! ```no_run
//! use bufcopy::{CopyBuilder, Strategy};
//!
//! let report = CopyBuilder::new("src.bin", "dst.bin")
//!     .strategy(Strategy::Block)
//!     .block_size(4096)
//!     .verify()
//!     .run()?;
//! assert_eq!(report.verified, Some(true));
//! # Ok::<(), bufcopy::Error>(())
//! ```

use crate::compare::files_equal;
use crate::error::Result;
use crate::options::{CopyOptions, LineEnding, Strategy};
use encoding_rs::Encoding;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Outcome of a [`CopyBuilder::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    /// Strategy that performed the copy
    pub strategy: Strategy,
    /// Count returned by the strategy: lines for [`Strategy::Lines`], bytes otherwise
    pub count: u64,
    /// Wall-clock time spent copying (verification excluded)
    pub duration: Duration,
    /// Result of the post-copy comparison, if one was requested and the
    /// strategy is byte-exact
    pub verified: Option<bool>,
}

impl CopyReport {
    /// Unit of [`CopyReport::count`], `"lines"` or `"bytes"`.
    #[must_use]
    pub fn unit(&self) -> &'static str {
        if self.strategy.counts_lines() {
            "lines"
        } else {
            "bytes"
        }
    }
}

/// A builder for configuring and executing a single copy.
///
/// # Example
///
/// ```no_run
/// use bufcopy::{CopyBuilder, LineEnding, Strategy};
///
/// let report = CopyBuilder::new("notes.txt", "notes-unix.txt")
///     .strategy(Strategy::Lines)
///     .line_ending(LineEnding::Lf)
///     .run()?;
/// println!("{} lines", report.count);
/// # Ok::<(), bufcopy::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    strategy: Strategy,
    verify: bool,
    options: CopyOptions,
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Uses [`Strategy::Whole`] and default options.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            strategy: Strategy::default(),
            verify: false,
            options: CopyOptions::default(),
        }
    }

    /// Select the copy strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the block size used by [`Strategy::Block`].
    ///
    /// Value is clamped to at least 1.
    #[must_use]
    pub fn block_size(mut self, size: usize) -> Self {
        self.options = self.options.with_block_size(size);
        self
    }

    /// Set the writer buffer size used by [`Strategy::Buffered`].
    #[must_use]
    pub fn write_buffer_size(mut self, size: usize) -> Self {
        self.options = self.options.with_write_buffer_size(size);
        self
    }

    /// Set the text encoding used by [`Strategy::Lines`] and [`Strategy::StagedText`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bufcopy::{CopyBuilder, Strategy};
    ///
    /// let report = CopyBuilder::new("legacy.txt", "copy.txt")
    ///     .strategy(Strategy::Lines)
    ///     .encoding(encoding_rs::WINDOWS_1252)
    ///     .run()?;
    /// # Ok::<(), bufcopy::Error>(())
    /// ```
    #[must_use]
    pub fn encoding(mut self, encoding: &'static Encoding) -> Self {
        self.options = self.options.with_encoding(encoding);
        self
    }

    /// Set the terminator written by [`Strategy::Lines`].
    #[must_use]
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.options = self.options.with_line_ending(line_ending);
        self
    }

    /// Sync the destination to disk before returning.
    #[must_use]
    pub fn fsync(mut self) -> Self {
        self.options = self.options.with_fsync();
        self
    }

    /// Compare source and destination after a byte-exact copy.
    ///
    /// The outcome lands in [`CopyReport::verified`]. Text strategies are
    /// not compared, since they may legitimately change bytes.
    #[must_use]
    pub fn verify(mut self) -> Self {
        self.verify = true;
        self
    }

    /// Set a custom warning handler.
    ///
    /// Called for lossy text conversions instead of logging them.
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Get a reference to the current options.
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Execute the copy.
    ///
    /// # Errors
    ///
    /// Returns whatever the selected strategy returns, plus any error
    /// raised while verifying.
    pub fn run(self) -> Result<CopyReport> {
        let start = Instant::now();
        let count = self.strategy.run(&self.src, &self.dst, &self.options)?;
        let duration = start.elapsed();

        let verified = if self.verify && self.strategy.is_byte_exact() {
            Some(files_equal(&self.src, &self.dst)?)
        } else {
            None
        };

        Ok(CopyReport {
            strategy: self.strategy,
            count,
            duration,
            verified,
        })
    }
}
