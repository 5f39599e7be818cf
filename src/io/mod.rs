//! Positioned little-endian reads over a seekable byte stream.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read, Seek, SeekFrom};

/// Little-endian reader over any seekable byte source.
///
/// All fixed-width reads happen at the stream's current position and
/// advance it. A read that runs past end-of-stream yields `0` instead of
/// failing; validating what was read is the caller's job.
#[derive(Debug)]
pub struct ByteReader<R> {
    inner: R,
}

impl<R: Read + Seek> ByteReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read a little-endian `u16` at the current position, or `0` at EOF.
    pub fn read_u16(&mut self) -> io::Result<u16> {
        match self.inner.read_u16::<LittleEndian>() {
            Ok(value) => Ok(value),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(0),
            Err(e) => Err(e),
        }
    }

    /// Read a little-endian `u32` at the current position, or `0` at EOF.
    pub fn read_u32(&mut self) -> io::Result<u32> {
        match self.inner.read_u32::<LittleEndian>() {
            Ok(value) => Ok(value),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(0),
            Err(e) => Err(e),
        }
    }

    /// Read exactly `len` bytes at the current position.
    pub fn read_bytes(&mut self, len: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read exactly `len` bytes starting at `offset`.
    pub fn read_bytes_at(&mut self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        self.seek_to(offset)?;
        self.read_bytes(len)
    }

    /// Move the cursor to an absolute offset.
    pub fn seek_to(&mut self, offset: u64) -> io::Result<u64> {
        self.inner.seek(SeekFrom::Start(offset))
    }

    /// Advance the cursor by `n` bytes without reading.
    pub fn skip(&mut self, n: u64) -> io::Result<u64> {
        self.inner.seek(SeekFrom::Current(n as i64))
    }

    /// Total length of the stream. Leaves the cursor at the end.
    pub fn len(&mut self) -> io::Result<u64> {
        self.inner.seek(SeekFrom::End(0))
    }

    /// Consume the reader, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}
