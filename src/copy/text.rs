//! Text copy variants.
//!
//! Both functions decode the source with [`CopyOptions::encoding`] and
//! encode the result back with the same encoding, so the destination is
//! byte-identical only when the source is valid in that encoding. Invalid
//! input is replaced rather than rejected, and a warning is emitted
//! through [`CopyOptions::warn_handler`] (or `tracing`).
//!
//! # Line rules
//!
//! - `\n`, `\r\n` and a lone `\r` each end a line.
//! - A terminator ends a line, it never starts one: `"a\nb\n"` and `"a\nb"`
//!   are both two lines, `"a\n\n"` is `"a"` followed by `""`.
//! - An empty source has no lines.
//! - Every line written, the last one included, is followed by
//!   [`CopyOptions::line_ending`].
//! - A byte order mark of the configured encoding is dropped from the
//!   start of the source before lines are split, so a source holding only
//!   a BOM has no lines.

use crate::error::Result;
use crate::options::CopyOptions;
use encoding_rs::Encoding;
use std::io::{self, BufRead, BufReader, BufWriter, Cursor, Write};
use std::path::Path;

use super::utils::{
    check_text_encoding, create_destination, finish_destination, open_copy_source,
    read_exactly_sized,
};

/// Copy a text file line by line, returning the number of lines written.
///
/// # Errors
///
/// - [`Error::UnsupportedEncoding`](crate::Error::UnsupportedEncoding) if the
///   encoding is not ASCII-compatible (checked before anything is opened)
/// - [`Error::NotFound`](crate::Error::NotFound) if the source cannot be opened
/// - [`Error::SameFile`](crate::Error::SameFile) if the destination is the source
/// - [`Error::Io`](crate::Error::Io) if reading or any destination operation fails
pub fn copy_lines(src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    let encoding = options.encoding;
    check_text_encoding(encoding)?;

    let (src_file, _) = open_copy_source(src, dst)?;
    let mut reader = BufReader::new(src_file);
    let mut writer = BufWriter::new(create_destination(dst)?);
    let terminator = options.line_ending.as_bytes();
    skip_bom(&mut reader, encoding)?;

    let mut raw = Vec::new();
    let mut lines: u64 = 0;
    let mut lossy_lines: u64 = 0;

    while read_line_bytes(&mut reader, &mut raw)? {
        let (text, malformed) = encoding.decode_without_bom_handling(&raw);
        let (encoded, _, unmappable) = encoding.encode(&text);
        if malformed || unmappable {
            lossy_lines += 1;
        }

        writer.write_all(&encoded)?;
        writer.write_all(terminator)?;
        lines += 1;
    }

    let dst_file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    finish_destination(&dst_file, options)?;

    if lossy_lines > 0 {
        options.warn(&format!(
            "{lossy_lines} line(s) of {} are not valid {}; invalid sequences were replaced",
            src.display(),
            encoding.name()
        ));
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        src = %src.display(),
        dst = %dst.display(),
        lines,
        encoding = encoding.name(),
        "line copy"
    );

    Ok(lines)
}

/// Copy a file by decoding it to text, re-encoding it, and staging the
/// encoded bytes in memory before writing them.
///
/// Returns the number of bytes written to the destination, which differs
/// from the source length whenever a BOM was dropped or invalid input was
/// replaced.
///
/// # Errors
///
/// Same as [`copy_lines`].
pub fn copy_staged_text(src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    let encoding = options.encoding;
    check_text_encoding(encoding)?;

    let (mut src_file, len) = open_copy_source(src, dst)?;
    let raw = read_exactly_sized(&mut src_file, len)?;
    drop(src_file);

    let (text, malformed) = encoding.decode_with_bom_removal(&raw);
    let (encoded, _, unmappable) = encoding.encode(&text);
    if malformed || unmappable {
        options.warn(&format!(
            "{} is not valid {}; invalid sequences were replaced",
            src.display(),
            encoding.name()
        ));
    }

    let mut stage = Cursor::new(&encoded[..]);
    let mut dst_file = create_destination(dst)?;
    let written = io::copy(&mut stage, &mut dst_file)?;
    finish_destination(&dst_file, options)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        src = %src.display(),
        dst = %dst.display(),
        bytes_read = raw.len(),
        bytes_written = written,
        encoding = encoding.name(),
        "staged text copy"
    );

    Ok(written)
}

/// Consume a byte order mark of `encoding` at the start of `reader`.
///
/// Done before any line is read, so a source holding only a BOM has no
/// lines.
fn skip_bom<R: BufRead>(reader: &mut R, encoding: &'static Encoding) -> io::Result<()> {
    let bom = Encoding::for_bom(reader.fill_buf()?).filter(|&(found, _)| found == encoding);
    if let Some((_, len)) = bom {
        reader.consume(len);
    }
    Ok(())
}

/// Read the next line into `line`, without its terminator.
///
/// Returns `false` at end of stream, when no further line exists.
fn read_line_bytes<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<bool> {
    line.clear();
    let mut started = false;

    loop {
        let available = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(started);
        }
        started = true;

        match available.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) => {
                let terminator = available[i];
                line.extend_from_slice(&available[..i]);
                reader.consume(i + 1);
                if terminator == b'\r' && reader.fill_buf()?.first() == Some(&b'\n') {
                    reader.consume(1);
                }
                return Ok(true);
            }
            None => {
                let n = available.len();
                line.extend_from_slice(available);
                reader.consume(n);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
