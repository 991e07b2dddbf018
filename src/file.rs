//! Read-only blob content streams
//!
//! A [`BlobReader`] holds the full content of one blob, materialized from
//! the object database at open time. It supports reading and seeking; every
//! write attempt fails with `ErrorKind::Unsupported` and leaves the read
//! position untouched.

use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};

/// a seekable, read-only stream over one blob's bytes
///
/// The buffer is owned exclusively by the reader; dropping the reader drops
/// the bytes. Nothing is shared with the repository the blob came from.
#[derive(Debug)]
pub struct BlobReader {
    cursor: Cursor<Vec<u8>>,
}

impl BlobReader {
    /// wrap already-fetched blob content
    pub fn new(content: Vec<u8>) -> Self {
        Self {
            cursor: Cursor::new(content),
        }
    }

    /// total content length in bytes
    pub fn len(&self) -> u64 {
        self.cursor.get_ref().len() as u64
    }

    /// check if the blob is empty
    pub fn is_empty(&self) -> bool {
        self.cursor.get_ref().is_empty()
    }

    /// current read position
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// streams can always be read
    pub fn readable(&self) -> bool {
        true
    }

    /// streams can never be written
    pub fn writable(&self) -> bool {
        false
    }

    /// consume the reader and return the underlying bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.cursor.into_inner()
    }
}

impl Read for BlobReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Seek for BlobReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl Write for BlobReader {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "blob streams are read-only",
        ))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "blob streams are read-only",
        ))
    }
}
