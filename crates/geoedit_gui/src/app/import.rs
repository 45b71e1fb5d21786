//! Local GeoJSON file loading.

use std::fs;
use std::io;
use std::path::Path;

/// Files larger than this are refused before reading.
pub(crate) const MAX_IMPORT_BYTES: u64 = 64 * 1024 * 1024;

/// Read an import file as UTF-8 text.
///
/// # Errors
/// Propagates I/O errors; oversized files fail with [`io::ErrorKind::InvalidData`].
pub(crate) fn read_import_file(path: &Path) -> io::Result<String> {
    let len = fs::metadata(path)?.len();
    if len > MAX_IMPORT_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("file is {} bytes, limit is {}", len, MAX_IMPORT_BYTES),
        ));
    }
    fs::read_to_string(path)
}
