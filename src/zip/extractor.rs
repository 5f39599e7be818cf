//! Archive handle and entry extraction.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use flate2::{Decompress, FlushDecompress, Status};
use tracing::debug;

use crate::error::{Error, Result};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipEntry};

/// An open ZIP archive: the stream plus the entry index built from its
/// central directory.
///
/// The index is immutable for the handle's lifetime. Extraction takes
/// `&mut self` because every call repositions the single stream cursor;
/// a handle is not meant to be shared across threads without external
/// serialization. Dropping the handle closes the stream and frees the
/// index.
#[derive(Debug)]
pub struct ZipArchive<R> {
    parser: ZipParser<R>,
    entries: Vec<ZipEntry>,
}

impl ZipArchive<File> {
    /// Open an archive file and index its contents.
    ///
    /// # Errors
    ///
    /// [`Error::Open`] when the file cannot be opened, otherwise any of
    /// the parse failures of [`ZipArchive::new`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file)
    }
}

impl<R: Read + Seek> ZipArchive<R> {
    /// Index an archive from any seekable byte source.
    ///
    /// Locates the end-of-central-directory record, then walks the
    /// central directory to build the entry index.
    pub fn new(inner: R) -> Result<Self> {
        let mut parser = ZipParser::new(inner)?;
        let eocd_offset = parser.find_eocd()?;
        let entries = parser.read_central_directory(eocd_offset)?;
        debug!(entries = entries.len(), "archive opened");
        Ok(Self { parser, entries })
    }

    /// All entries, in central directory order.
    pub fn entries(&self) -> &[ZipEntry] {
        &self.entries
    }

    /// Look up an entry by name without extracting it.
    ///
    /// Names compare ASCII case-insensitively, the way the archive is
    /// addressed by asset paths.
    pub fn entry(&self, name: &str) -> Option<&ZipEntry> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Extract an entry's uncompressed bytes.
    ///
    /// Reads the payload via the entry's local file header and inflates
    /// it if it was stored with the deflate method. The returned buffer
    /// is owned by the caller; the archive keeps no reference to it.
    ///
    /// # Errors
    ///
    /// [`Error::EntryNotFound`] for an unknown name, plus the local
    /// header and codec failures described in [`ZipParser`] and
    /// [`Error`]. A failed extraction never returns partial data.
    pub fn extract(&mut self, name: &str) -> Result<Vec<u8>> {
        let entry = self
            .entry(name)
            .cloned()
            .ok_or_else(|| Error::EntryNotFound {
                name: name.to_string(),
            })?;

        debug!(
            name = %entry.name,
            compressed_size = entry.compressed_size,
            uncompressed_size = entry.uncompressed_size,
            "extracting entry"
        );

        let (method, payload) = self.parser.read_local_payload(&entry)?;
        match method {
            CompressionMethod::Stored => Ok(payload),
            CompressionMethod::Deflate => inflate_raw(&payload, entry.uncompressed_size),
            CompressionMethod::Unknown(method) => Err(Error::UnsupportedMethod { method }),
        }
    }

    /// Consume the handle, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.parser.into_inner()
    }
}

/// Inflate a raw deflate stream (no zlib wrapper) of known output size.
///
/// All input is consumed and the declared output size produced in a
/// single finish call; anything short of a clean stream end is a codec
/// failure.
fn inflate_raw(payload: &[u8], uncompressed_size: u32) -> Result<Vec<u8>> {
    let mut inflater = Decompress::new(false);
    let mut out = Vec::with_capacity(uncompressed_size as usize);

    let status = inflater.decompress_vec(payload, &mut out, FlushDecompress::Finish)?;
    if status != Status::StreamEnd {
        return Err(Error::InflateIncomplete {
            written: inflater.total_out(),
            expected: uncompressed_size,
        });
    }

    Ok(out)
}
