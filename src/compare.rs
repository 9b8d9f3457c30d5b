//! Content comparison.

use crate::copy::utils::{fill_block, open_source};
use crate::error::Result;
use std::path::Path;

/// Chunk size used when reading both files during a comparison.
const COMPARE_CHUNK_SIZE: usize = 64 * 1024;

/// Check whether two files hold exactly the same bytes.
///
/// Both paths are validated before any content is read. Files of different
/// lengths compare unequal without reading content; otherwise both files
/// are read in lockstep chunks from independent handles and the comparison
/// stops at the first chunk that differs.
///
/// # Errors
///
/// - [`Error::NotFound`](crate::Error::NotFound) if either path is not an
///   existing, openable file
/// - [`Error::Io`](crate::Error::Io) if reading fails
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// if bufcopy::files_equal(Path::new("a.bin"), Path::new("b.bin"))? {
///     println!("identical");
/// }
/// # Ok::<(), bufcopy::Error>(())
/// ```
pub fn files_equal(a: &Path, b: &Path) -> Result<bool> {
    let (mut file_a, len_a) = open_source(a)?;
    let (mut file_b, len_b) = open_source(b)?;

    if len_a != len_b {
        #[cfg(feature = "tracing")]
        tracing::debug!(a = %a.display(), b = %b.display(), len_a, len_b, "length mismatch");
        return Ok(false);
    }

    let chunk = COMPARE_CHUNK_SIZE.min(usize::try_from(len_a).unwrap_or(usize::MAX).max(1));
    let mut buf_a = vec![0u8; chunk];
    let mut buf_b = vec![0u8; chunk];

    loop {
        let n_a = fill_block(&mut file_a, &mut buf_a)?;
        let n_b = fill_block(&mut file_b, &mut buf_b)?;

        // Lengths can still diverge if a file changes underneath us
        if n_a != n_b || buf_a[..n_a] != buf_b[..n_b] {
            #[cfg(feature = "tracing")]
            tracing::debug!(a = %a.display(), b = %b.display(), "content mismatch");
            return Ok(false);
        }
        if n_a < chunk {
            return Ok(true);
        }
    }
}
