//! ZIP format constants and entry metadata.

/// End of Central Directory signature (`PK\x05\x06`) as read little-endian.
pub const EOCD_SIGNATURE: u32 = 0x0605_4b50;

/// EOCD signature as raw bytes, for window scanning.
pub const EOCD_SIGNATURE_BYTES: [u8; 4] = *b"PK\x05\x06";

/// Fixed size of the EOCD record without its trailing comment.
pub const EOCD_SIZE: u64 = 22;

/// Central Directory File Header signature (`PK\x01\x02`).
pub const CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0201_4b50;

/// Local File Header signature (`PK\x03\x04`).
pub const LOCAL_FILE_SIGNATURE: u32 = 0x0403_4b50;

/// General purpose flag bit 0: entry payload is encrypted.
pub const ENCRYPTED_FLAG: u16 = 0x0001;

/// Maximum trailing comment length allowed by the format.
pub const MAX_COMMENT_SIZE: u64 = 65535;

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Unknown(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            _ => CompressionMethod::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
            CompressionMethod::Unknown(v) => *v,
        }
    }
}

/// End of Central Directory record fields, minus signature and comment.
#[derive(Debug, Clone, Copy)]
pub struct EndOfCentralDirectory {
    pub disk_number: u16,
    pub disk_with_cd: u16,
    pub disk_entries: u16,
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
}

/// One archive member, as indexed from the central directory.
///
/// The sizes are the central directory's values. They are authoritative
/// over the copies in the entry's local file header and are not verified
/// against actual decompressed output.
#[derive(Debug, Clone)]
pub struct ZipEntry {
    /// Archive-internal path. Lookup is ASCII case-insensitive.
    pub name: String,
    /// Size of the raw payload following the local file header.
    pub compressed_size: u32,
    /// Declared size of the payload after decompression.
    pub uncompressed_size: u32,
    /// Byte offset of this entry's local file header.
    pub local_header_offset: u32,
}
