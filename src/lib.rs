//! # bufcopy
//!
//! Byte-accurate file copy and comparison, one function per buffering
//! strategy.
//!
//! ## Strategies
//!
//! | Function | Strategy | Returns |
//! |----------|----------|---------|
//! | [`copy_whole`] | whole file in one exactly-sized buffer | bytes |
//! | [`copy_buffered`] | buffered reader and writer | bytes |
//! | [`copy_staged`] | staged through an in-memory cursor | bytes |
//! | [`copy_staged_text`] | decoded, re-encoded, then staged | bytes written |
//! | [`copy_byte_by_byte`] | one byte per read and write | bytes |
//! | [`copy_staged_byte_by_byte`] | staged, then one byte per write | bytes |
//! | [`copy_block`] | fixed-size blocks (default 1024) | bytes |
//! | [`copy_lines`] | line at a time through a text encoding | lines |
//!
//! [`files_equal`] compares two files byte for byte.
//!
//! ## Guarantees
//!
//! - The source is opened before the destination. A source that cannot be
//!   opened fails with [`Error::NotFound`] and the destination is not touched.
//! - A destination that is the source file itself, through any path, fails
//!   with [`Error::SameFile`] before anything is written.
//! - The destination is opened once, created if missing and truncated if
//!   present, so no bytes of an older, longer file survive.
//! - Byte strategies write exactly the bytes they read and return that
//!   count. Repeating a copy yields the same destination.
//! - Handles and buffers live only for the duration of the call.
//! - Destination failures surface as [`Error::Io`]; a partially written
//!   destination is left in place.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bufcopy::{CopyOptions, copy_block, files_equal};
//! use std::path::Path;
//!
//! let options = CopyOptions::default().with_block_size(4096);
//! let bytes = copy_block(Path::new("in.bin"), Path::new("out.bin"), &options)?;
//! assert!(files_equal(Path::new("in.bin"), Path::new("out.bin"))?);
//! println!("copied {bytes} bytes");
//! # Ok::<(), bufcopy::Error>(())
//! ```
//!
//! ## Text Encoding
//!
//! [`copy_lines`] and [`copy_staged_text`] decode and re-encode with
//! [`CopyOptions::encoding`], UTF-8 unless configured otherwise. The
//! encoding is fixed per call rather than taken from the host locale.
//! Only ASCII-compatible encodings are accepted.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`CopyOptions`] and [`Strategy`] |
//! | `full` | Enable all optional features |

mod builder;
mod compare;
mod copy;
mod error;
mod options;

pub use builder::{CopyBuilder, CopyReport};
pub use compare::files_equal;
pub use copy::{
    copy_block, copy_buffered, copy_byte_by_byte, copy_lines, copy_staged,
    copy_staged_byte_by_byte, copy_staged_text, copy_whole,
};
pub use error::{Error, ErrorCode, Result, is_no_space_error};
pub use options::{
    CopyOptions, DEFAULT_BLOCK_SIZE, DEFAULT_WRITE_BUFFER_SIZE, LineEnding, Strategy,
};
