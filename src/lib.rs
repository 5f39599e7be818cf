//! # zipasset
//!
//! A minimal synchronous ZIP reader for bundled asset archives.
//!
//! This library opens a seekable ZIP archive, indexes its entries from
//! the central directory, and extracts a named entry's uncompressed
//! bytes, transparently inflating raw-DEFLATE payloads. It is designed
//! as the asset-loading substrate of a larger application: archives are
//! trusted bundles shipped with the host, so parsing is fail-fast and
//! every failure surfaces as a typed [`Error`] the caller can decide to
//! abort on.
//!
//! ## Features
//!
//! - Locate the end-of-central-directory record behind trailing
//!   comments up to 65535 bytes
//! - STORED (uncompressed) and DEFLATE compression methods
//! - Case-insensitive entry lookup by archive-internal path
//!
//! ## Example
//!
//! ```no_run
//! use zipasset::ZipArchive;
//!
//! fn main() -> zipasset::Result<()> {
//!     let mut archive = ZipArchive::open("assets.zip")?;
//!
//!     // List all entries in the archive
//!     for entry in archive.entries() {
//!         println!("{} ({} bytes)", entry.name, entry.uncompressed_size);
//!     }
//!
//!     // Extract one entry's uncompressed bytes
//!     let data = archive.extract("sprites/player.bmp")?;
//!     assert!(!data.is_empty());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod io;
pub mod zip;

pub use error::{Error, Result};
pub use io::ByteReader;
pub use zip::{CompressionMethod, ZipArchive, ZipEntry, ZipParser};
