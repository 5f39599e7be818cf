//! ZIP archive parsing and extraction.
//!
//! ## Architecture
//!
//! - [`structures`]: format constants and entry metadata
//! - [`parser`]: EOCD location, central directory walk, local header reads
//! - [`extractor`]: the archive handle and decompression dispatch
//!
//! ## ZIP format overview
//!
//! A ZIP file lays out each entry's local file header and payload first,
//! followed by the central directory (the authoritative per-entry
//! metadata table) and an End of Central Directory (EOCD) record at the
//! very end, possibly trailed by an archive comment. Reading therefore
//! starts from the end: find the EOCD, walk the central directory to
//! build the index, then follow per-entry offsets back to the payloads.
//!
//! ## Supported features
//!
//! - STORED (no compression) and DEFLATE methods
//! - Trailing archive comments up to the format's 65535-byte maximum
//!
//! ## Limitations
//!
//! - No encryption support (encrypted entries are detected and rejected)
//! - No multi-disk archives, no ZIP64
//! - Entries are fully materialized in memory

mod extractor;
mod parser;
mod structures;

pub use extractor::ZipArchive;
pub use parser::ZipParser;
pub use structures::*;
