//! File-size queries for the `{file_size}` token.

use std::io;
use std::path::Path;

/// Reports the on-disk size of a document.
///
/// Implementors return errors instead of blocking or panicking; callers fall
/// back to the in-memory buffer length.
pub trait FileSizeProbe: Send + Sync {
    fn file_size(&self, path: &Path) -> io::Result<u64>;
}

/// Reads the size from filesystem metadata.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFileSizeProbe;

impl FileSizeProbe for FsFileSizeProbe {
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        fs_err::metadata(path).map(|meta| meta.len())
    }
}
