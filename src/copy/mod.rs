//! Copy variants.
//!
//! One function per buffering strategy. Each opens the source before the
//! destination, so a missing source never touches the destination, and
//! each opens the destination exactly once with truncate semantics.

mod bytes;
mod text;
pub(crate) mod utils;

// Re-export public API
pub use bytes::{
    copy_block, copy_buffered, copy_byte_by_byte, copy_staged, copy_staged_byte_by_byte,
    copy_whole,
};
pub use text::{copy_lines, copy_staged_text};
