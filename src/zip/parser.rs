//! Low-level ZIP archive parser.
//!
//! ZIP archives are read from the end: the End of Central Directory
//! (EOCD) record sits in the file's trailer, possibly pushed back by an
//! archive comment of up to 65535 bytes. The parser scans backward for
//! the EOCD signature, then walks the central directory it points at to
//! index every entry, and finally follows per-entry offsets into local
//! file headers when a payload is requested.

use std::io::{Read, Seek};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::io::ByteReader;

use super::structures::*;

/// Bytes fetched per backward scan step while searching for the EOCD.
const SCAN_WINDOW: usize = 512;

/// Streaming parser over a seekable archive source.
///
/// Holds the single shared cursor for the archive; all operations seek
/// before reading, so callers must serialize access.
#[derive(Debug)]
pub struct ZipParser<R> {
    reader: ByteReader<R>,
    /// Total size of the archive in bytes.
    size: u64,
}

impl<R: Read + Seek> ZipParser<R> {
    pub fn new(inner: R) -> Result<Self> {
        let mut reader = ByteReader::new(inner);
        let size = reader.len()?;
        Ok(Self { reader, size })
    }

    /// Find the absolute offset of the EOCD signature.
    ///
    /// Scans backward from the end of the file in fixed-size windows,
    /// keeping a 4-byte overlap between windows so a signature straddling
    /// a window boundary is never missed. The search covers at most the
    /// maximum plausible trailer: a 65535-byte comment plus the 22-byte
    /// EOCD record itself.
    ///
    /// # Errors
    ///
    /// [`Error::EocdNotFound`] when the search range is exhausted, meaning
    /// the input is not a usable ZIP archive.
    pub fn find_eocd(&mut self) -> Result<u64> {
        let max_back = self.size.min(MAX_COMMENT_SIZE + EOCD_SIZE);
        let mut back = max_back.min(SCAN_WINDOW as u64);

        loop {
            let start = self.size - back;
            let len = back.min(SCAN_WINDOW as u64) as usize;
            let window = self.reader.read_bytes_at(start, len)?;

            // Scan high to low so the match closest to the file end wins.
            if window.len() >= 4 {
                for i in (0..=window.len() - 4).rev() {
                    if window[i..i + 4] == EOCD_SIGNATURE_BYTES {
                        let offset = start + i as u64;
                        debug!(offset, "found end of central directory");
                        return Ok(offset);
                    }
                }
            }

            if back >= max_back {
                break;
            }
            back = max_back.min(back + (SCAN_WINDOW as u64 - 4));
        }

        Err(Error::EocdNotFound)
    }

    /// Read the EOCD record and walk the central directory it points at.
    ///
    /// The returned index preserves central directory order. Record
    /// lengths declared inside each entry (name, extra field, comment)
    /// are trusted to keep the cursor aligned to the next record; the
    /// declared directory byte size is not cross-checked.
    ///
    /// # Errors
    ///
    /// Signature mismatches surface as
    /// [`Error::EocdSignature`] / [`Error::CentralDirectorySignature`];
    /// a directory declaring zero entries is [`Error::EmptyArchive`].
    pub fn read_central_directory(&mut self, eocd_offset: u64) -> Result<Vec<ZipEntry>> {
        let eocd = self.read_eocd(eocd_offset)?;
        if eocd.total_entries == 0 {
            return Err(Error::EmptyArchive);
        }

        debug!(
            entries = eocd.total_entries,
            cd_offset = eocd.cd_offset,
            cd_size = eocd.cd_size,
            "reading central directory"
        );

        let mut entries = Vec::with_capacity(eocd.total_entries as usize);
        self.reader.seek_to(u64::from(eocd.cd_offset))?;
        for _ in 0..eocd.total_entries {
            entries.push(self.read_entry()?);
        }

        Ok(entries)
    }

    fn read_eocd(&mut self, offset: u64) -> Result<EndOfCentralDirectory> {
        self.reader.seek_to(offset)?;

        let sig = self.reader.read_u32()?;
        if sig != EOCD_SIGNATURE {
            return Err(Error::EocdSignature { found: sig });
        }

        Ok(EndOfCentralDirectory {
            disk_number: self.reader.read_u16()?,
            disk_with_cd: self.reader.read_u16()?,
            disk_entries: self.reader.read_u16()?,
            total_entries: self.reader.read_u16()?,
            cd_size: self.reader.read_u32()?,
            cd_offset: self.reader.read_u32()?,
        })
    }

    /// Read one central directory record at the current cursor position.
    fn read_entry(&mut self) -> Result<ZipEntry> {
        let sig = self.reader.read_u32()?;
        if sig != CENTRAL_DIRECTORY_SIGNATURE {
            return Err(Error::CentralDirectorySignature { found: sig });
        }

        // version made by/needed, flags, method, mod time/date, crc-32
        self.reader.skip(16)?;
        let compressed_size = self.reader.read_u32()?;
        let uncompressed_size = self.reader.read_u32()?;
        let name_len = self.reader.read_u16()?;
        let extra_len = self.reader.read_u16()?;
        let comment_len = self.reader.read_u16()?;
        // disk number start, internal/external attributes
        self.reader.skip(8)?;
        let local_header_offset = self.reader.read_u32()?;

        let name_bytes = self.reader.read_bytes(name_len as usize)?;
        let name = String::from_utf8_lossy(&name_bytes).into_owned();

        // extra field and comment carry nothing we index
        self.reader
            .skip(u64::from(extra_len) + u64::from(comment_len))?;

        trace!(
            name = %name,
            compressed_size, uncompressed_size, local_header_offset, "indexed entry"
        );

        Ok(ZipEntry {
            name,
            compressed_size,
            uncompressed_size,
            local_header_offset,
        })
    }

    /// Read an entry's raw payload via its local file header.
    ///
    /// Seeks to the entry's local header, validates it, and returns the
    /// compression method declared there together with exactly
    /// `compressed_size` payload bytes. The local header's own size and
    /// name fields are skipped; the central directory's values are
    /// authoritative and already held in `entry`.
    ///
    /// # Errors
    ///
    /// [`Error::LocalHeaderSignature`] on a bad magic and
    /// [`Error::EncryptedEntry`] when the encryption flag bit is set.
    pub fn read_local_payload(&mut self, entry: &ZipEntry) -> Result<(CompressionMethod, Vec<u8>)> {
        self.reader.seek_to(u64::from(entry.local_header_offset))?;

        let sig = self.reader.read_u32()?;
        if sig != LOCAL_FILE_SIGNATURE {
            return Err(Error::LocalHeaderSignature { found: sig });
        }

        // version needed to extract
        self.reader.skip(2)?;
        let flags = self.reader.read_u16()?;
        if flags & ENCRYPTED_FLAG != 0 {
            return Err(Error::EncryptedEntry {
                name: entry.name.clone(),
            });
        }

        let method = self.reader.read_u16()?;
        // mod time/date, crc-32, local copies of compressed/uncompressed size
        self.reader.skip(16)?;
        let name_len = self.reader.read_u16()?;
        let extra_len = self.reader.read_u16()?;
        self.reader.skip(u64::from(name_len) + u64::from(extra_len))?;

        let payload = self.reader.read_bytes(entry.compressed_size as usize)?;
        Ok((CompressionMethod::from_u16(method), payload))
    }

    /// Consume the parser, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zip::testutil::{build, stored};
    use std::io::Cursor;

    fn parse(archive: Vec<u8>) -> Result<Vec<ZipEntry>> {
        let mut parser = ZipParser::new(Cursor::new(archive))?;
        let eocd_offset = parser.find_eocd()?;
        parser.read_central_directory(eocd_offset)
    }

    #[test]
    fn finds_eocd_without_comment() {
        let archive = build(&[stored("a.txt", b"hello")], b"");
        let expected = archive.len() as u64 - EOCD_SIZE;
        let mut parser = ZipParser::new(Cursor::new(archive)).unwrap();
        assert_eq!(parser.find_eocd().unwrap(), expected);
    }

    #[test]
    fn finds_eocd_with_short_comment() {
        let archive = build(&[stored("a.txt", b"hello")], &[b' '; 100]);
        let expected = archive.len() as u64 - EOCD_SIZE - 100;
        let mut parser = ZipParser::new(Cursor::new(archive)).unwrap();
        assert_eq!(parser.find_eocd().unwrap(), expected);
    }

    #[test]
    fn finds_eocd_with_comment_spanning_scan_windows() {
        // 2000 bytes pushes the record across several 512-byte windows
        let archive = build(&[stored("a.txt", b"hello")], &vec![0u8; 2000]);
        let expected = archive.len() as u64 - EOCD_SIZE - 2000;
        let mut parser = ZipParser::new(Cursor::new(archive)).unwrap();
        assert_eq!(parser.find_eocd().unwrap(), expected);
    }

    #[test]
    fn finds_eocd_with_maximum_comment() {
        let archive = build(&[stored("a.txt", b"hello")], &vec![b'x'; 65535]);
        let expected = archive.len() as u64 - EOCD_SIZE - 65535;
        let mut parser = ZipParser::new(Cursor::new(archive)).unwrap();
        assert_eq!(parser.find_eocd().unwrap(), expected);
    }

    #[test]
    fn rejects_stream_without_eocd() {
        let mut parser = ZipParser::new(Cursor::new(vec![0u8; 4096])).unwrap();
        assert!(matches!(parser.find_eocd(), Err(Error::EocdNotFound)));
    }

    #[test]
    fn rejects_tiny_stream() {
        let mut parser = ZipParser::new(Cursor::new(b"PK".to_vec())).unwrap();
        assert!(matches!(parser.find_eocd(), Err(Error::EocdNotFound)));
    }

    #[test]
    fn indexes_entries_in_directory_order() {
        let archive = build(
            &[
                stored("first.bin", b"0123456789"),
                stored("dir/second.bin", b"abc"),
            ],
            b"",
        );
        let entries = parse(archive).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "first.bin");
        assert_eq!(entries[0].compressed_size, 10);
        assert_eq!(entries[0].uncompressed_size, 10);
        assert_eq!(entries[0].local_header_offset, 0);
        assert_eq!(entries[1].name, "dir/second.bin");
        assert_eq!(entries[1].compressed_size, 3);
    }

    #[test]
    fn rejects_zero_entry_directory() {
        let archive = build(&[], b"");
        assert!(matches!(parse(archive), Err(Error::EmptyArchive)));
    }

    #[test]
    fn rejects_corrupt_central_directory_signature() {
        let mut archive = build(&[stored("a.txt", b"hello")], b"");
        // the central directory starts right after the one local entry
        let cd_offset = archive
            .windows(4)
            .position(|w| w == b"PK\x01\x02")
            .unwrap();
        archive[cd_offset] = b'Q';
        assert!(matches!(
            parse(archive),
            Err(Error::CentralDirectorySignature { .. })
        ));
    }
}
