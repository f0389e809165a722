//! File Access Wrappers
//!
//! Decouples the dictzip and index readers from the underlying storage medium. A
//! [`ByteRange`](struct.ByteRange.html) memory-maps a file and exposes its contents as an
//! immutable, contiguous slice with a stable address for the lifetime of the dictionary handle.
use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::Path;

/// An immutable, memory-mapped view of a file's contents.
///
/// Zero-length files are handled without mapping them, since `mmap(2)` rejects a zero-length
/// mapping on most platforms.
pub struct ByteRange {
    mmap: Option<Mmap>,
}

impl ByteRange {
    /// Opens `path` read-only and maps its entire contents into memory.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(Self { mmap: None });
        }

        // Safe because this handle never exposes a mutable view and the file is never
        // reopened for writing for the lifetime of the mapping.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self { mmap: Some(mmap) })
    }

    pub fn as_bytes(&self) -> &[u8] {
        match &self.mmap {
            Some(mmap) => mmap,
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}
