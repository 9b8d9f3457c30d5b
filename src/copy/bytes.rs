//! Byte-exact copy variants.
//!
//! Every function here produces a destination that is byte-identical to
//! the source and returns the number of bytes transferred. They differ only
//! in how the bytes move between the two handles.

use crate::error::Result;
use crate::options::CopyOptions;
use std::io::{self, BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;

use super::utils::{
    create_destination, fill_block, finish_destination, open_copy_source, read_exactly_sized,
};

/// Copy a file through one buffer holding the whole source.
///
/// The buffer is allocated for the source's length, filled by a single
/// read-to-end, then written out in full.
///
/// # Errors
///
/// - [`Error::NotFound`](crate::Error::NotFound) if the source cannot be opened
/// - [`Error::SameFile`](crate::Error::SameFile) if the destination is the source
/// - [`Error::Io`](crate::Error::Io) if reading or any destination operation fails
pub fn copy_whole(src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    let (mut src_file, len) = open_copy_source(src, dst)?;
    let buf = read_exactly_sized(&mut src_file, len)?;

    let mut dst_file = create_destination(dst)?;
    dst_file.write_all(&buf)?;
    finish_destination(&dst_file, options)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(src = %src.display(), dst = %dst.display(), bytes = buf.len(), "whole copy");

    Ok(buf.len() as u64)
}

/// Copy a file through buffered reader and writer layers.
///
/// The read side is buffered by the full source length, the write side by
/// [`CopyOptions::write_buffer_size`]. The output is identical to
/// [`copy_whole`].
///
/// # Errors
///
/// Same as [`copy_whole`]. A failing final flush is reported rather than
/// swallowed on drop.
pub fn copy_buffered(src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    let (src_file, len) = open_copy_source(src, dst)?;
    let capacity = usize::try_from(len).unwrap_or(usize::MAX).max(1);
    let mut reader = BufReader::with_capacity(capacity, src_file);

    let mut buf = Vec::with_capacity(capacity);
    reader.read_to_end(&mut buf)?;
    drop(reader);

    let mut writer = BufWriter::with_capacity(options.write_buffer_size, create_destination(dst)?);
    writer.write_all(&buf)?;
    let dst_file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    finish_destination(&dst_file, options)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        src = %src.display(),
        dst = %dst.display(),
        bytes = buf.len(),
        write_buffer = options.write_buffer_size,
        "buffered copy"
    );

    Ok(buf.len() as u64)
}

/// Copy a file by staging its content in an in-memory cursor.
///
/// The source is read in full, wrapped in a [`Cursor`], and the cursor is
/// drained into the destination.
///
/// # Errors
///
/// Same as [`copy_whole`].
pub fn copy_staged(src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    let (mut src_file, len) = open_copy_source(src, dst)?;
    let mut stage = Cursor::new(read_exactly_sized(&mut src_file, len)?);
    drop(src_file);

    let mut dst_file = create_destination(dst)?;
    let copied = io::copy(&mut stage, &mut dst_file)?;
    finish_destination(&dst_file, options)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(src = %src.display(), dst = %dst.display(), bytes = copied, "staged copy");

    Ok(copied)
}

/// Copy a file one byte at a time.
///
/// Both handles are unbuffered, so every byte costs one read and one write
/// call. The destination is opened once for the whole transfer.
///
/// # Errors
///
/// Same as [`copy_whole`].
pub fn copy_byte_by_byte(src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    let (src_file, _) = open_copy_source(src, dst)?;
    let mut dst_file = create_destination(dst)?;

    let copied = write_each_byte(src_file.bytes(), &mut dst_file)?;
    finish_destination(&dst_file, options)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(src = %src.display(), dst = %dst.display(), bytes = copied, "byte-by-byte copy");

    Ok(copied)
}

/// Copy a file by staging it in memory, then writing one byte at a time.
///
/// # Errors
///
/// Same as [`copy_whole`].
pub fn copy_staged_byte_by_byte(src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    let (mut src_file, len) = open_copy_source(src, dst)?;
    let stage = Cursor::new(read_exactly_sized(&mut src_file, len)?);
    drop(src_file);

    let mut dst_file = create_destination(dst)?;
    let copied = write_each_byte(stage.bytes(), &mut dst_file)?;
    finish_destination(&dst_file, options)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        src = %src.display(),
        dst = %dst.display(),
        bytes = copied,
        "staged byte-by-byte copy"
    );

    Ok(copied)
}

/// Copy a file in blocks of [`CopyOptions::block_size`] bytes.
///
/// Each block is filled completely before it is written; only the final
/// block may be shorter. An exact multiple of the block size ends without
/// an empty block, and an empty source writes nothing.
///
/// # Errors
///
/// Same as [`copy_whole`].
pub fn copy_block(src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    let (mut src_file, _) = open_copy_source(src, dst)?;
    let mut dst_file = create_destination(dst)?;

    let mut block = vec![0u8; options.block_size.max(1)];
    let mut copied: u64 = 0;

    loop {
        let n = fill_block(&mut src_file, &mut block)?;
        if n == 0 {
            break;
        }
        dst_file.write_all(&block[..n])?;
        copied += n as u64;
        if n < block.len() {
            break;
        }
    }
    finish_destination(&dst_file, options)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        src = %src.display(),
        dst = %dst.display(),
        bytes = copied,
        blocks = copied.div_ceil(block.len() as u64),
        block_size = block.len(),
        "block copy"
    );

    Ok(copied)
}

fn write_each_byte<I, W>(bytes: I, dst: &mut W) -> io::Result<u64>
where
    I: Iterator<Item = io::Result<u8>>,
    W: Write,
{
    let mut copied: u64 = 0;
    for byte in bytes {
        dst.write_all(&[byte?])?;
        copied += 1;
    }
    Ok(copied)
}

// =============================================================================
// Tests
// =============================================================================
