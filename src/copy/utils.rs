//! Utility functions shared by the copy variants.
//!
//! Opening the source narrows every failure to [`Error::NotFound`];
//! opening the destination always truncates. Both handles are plain
//! [`File`] values, so they are closed when the calling variant returns,
//! on the error path as much as on success.

use crate::error::{Error, Result};
use crate::options::CopyOptions;
use encoding_rs::Encoding;
use std::fs::{self, File, Metadata};
use std::io::{self, Read};
use std::path::Path;

// =============================================================================
// Handles
// =============================================================================

/// Open `path` for reading and return it with its length in bytes.
///
/// Any failure, including `path` naming a directory, is reported as
/// [`Error::NotFound`] carrying the original error.
pub(crate) fn open_source(path: &Path) -> Result<(File, u64)> {
    let (file, meta) = open_source_file(path)?;
    Ok((file, meta.len()))
}

/// Open the source of a copy into `dst`.
///
/// Same as [`open_source`], and additionally fails with [`Error::SameFile`]
/// when `dst` already exists as the same file as `src`, through the same
/// path or another one. Checked before the destination is created.
pub(crate) fn open_copy_source(src: &Path, dst: &Path) -> Result<(File, u64)> {
    let (file, meta) = open_source_file(src)?;
    if is_same_file(src, &meta, dst) {
        return Err(Error::SameFile {
            path: dst.to_path_buf(),
        });
    }
    Ok((file, meta.len()))
}

fn open_source_file(path: &Path) -> Result<(File, Metadata)> {
    let not_found = |source| Error::NotFound {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(not_found)?;
    let meta = file.metadata().map_err(not_found)?;
    if meta.is_dir() {
        return Err(not_found(io::Error::new(
            io::ErrorKind::IsADirectory,
            "source is a directory",
        )));
    }

    Ok((file, meta))
}

/// Whether `dst` names the file whose metadata is `src_meta`.
///
/// A destination that cannot be inspected is treated as distinct; creating
/// it reports the real failure.
#[cfg(unix)]
fn is_same_file(_src: &Path, src_meta: &Metadata, dst: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    fs::metadata(dst)
        .is_ok_and(|dst_meta| dst_meta.dev() == src_meta.dev() && dst_meta.ino() == src_meta.ino())
}

#[cfg(not(unix))]
fn is_same_file(src: &Path, _src_meta: &Metadata, dst: &Path) -> bool {
    match (fs::canonicalize(src), fs::canonicalize(dst)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Create `path`, truncating any previous content.
///
/// Failures are not narrowed: they surface as [`Error::Io`].
pub(crate) fn create_destination(path: &Path) -> Result<File> {
    Ok(File::create(path)?)
}

/// Apply the post-write options to a fully written destination.
pub(crate) fn finish_destination(file: &File, options: &CopyOptions) -> Result<()> {
    if options.fsync {
        file.sync_all()?;
    }
    Ok(())
}

// =============================================================================
// Reading
// =============================================================================

/// Read from `reader` until `buf` is full or the stream ends.
///
/// Returns the number of bytes placed in `buf`; anything less than
/// `buf.len()` means end of stream. Interrupted reads are retried.
pub(crate) fn fill_block<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Read the whole of `file` into a buffer allocated for `len` bytes.
pub(crate) fn read_exactly_sized(file: &mut File, len: u64) -> Result<Vec<u8>> {
    let capacity = usize::try_from(len).map_err(|_| {
        io::Error::new(
            io::ErrorKind::OutOfMemory,
            "source does not fit in memory",
        )
    })?;
    let mut buf = Vec::with_capacity(capacity);
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

// =============================================================================
// Text
// =============================================================================

/// Reject encodings that cannot carry text through a read and write.
///
/// The line splitter works on raw `\n`/`\r` bytes, so only ASCII-compatible
/// encodings that also encode to themselves are accepted.
pub(crate) fn check_text_encoding(encoding: &'static Encoding) -> Result<()> {
    if !encoding.is_ascii_compatible() || encoding.output_encoding() != encoding {
        return Err(Error::UnsupportedEncoding(encoding.name()));
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
