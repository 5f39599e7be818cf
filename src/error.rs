//! Error types for `zipasset`

use std::path::PathBuf;

use thiserror::Error;

/// Alias for `Result` with the crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for archive operations.
///
/// Every condition here is unrecoverable for the archive it occurred on:
/// a failed extraction never returns a partially filled buffer. Whether
/// the process should abort is the caller's decision.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    /// The archive file could not be opened.
    #[error("cannot open archive {path}: {source}")]
    Open {
        /// Path passed to [`ZipArchive::open`](crate::ZipArchive::open).
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// I/O error while reading the archive.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No end-of-central-directory record within the trailer search range.
    #[error("no end of central directory record found")]
    EocdNotFound,

    /// The bytes at the located trailer offset are not an EOCD record.
    #[error("wrong end of central directory signature (0x{found:08x})")]
    EocdSignature {
        /// The signature value that was read.
        found: u32,
    },

    /// A central directory record does not start with the expected magic.
    #[error("wrong central directory signature (0x{found:08x})")]
    CentralDirectorySignature {
        /// The signature value that was read.
        found: u32,
    },

    /// An entry's local file header does not start with the expected magic.
    #[error("wrong local file header signature (0x{found:08x})")]
    LocalHeaderSignature {
        /// The signature value that was read.
        found: u32,
    },

    /// The central directory declares zero entries.
    #[error("no entries in central directory")]
    EmptyArchive,

    /// The entry's general purpose flags have the encryption bit set.
    #[error("entry {name} is encrypted")]
    EncryptedEntry {
        /// Name of the encrypted entry.
        name: String,
    },

    /// The entry uses a compression method other than stored or deflate.
    #[error("unsupported compression method {method}")]
    UnsupportedMethod {
        /// The method value from the local file header.
        method: u16,
    },

    /// No entry with the requested name exists in the archive.
    #[error("entry not found in archive: {name}")]
    EntryNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The deflate stream reported an error during inflation.
    #[error("inflate error: {0}")]
    Inflate(#[from] flate2::DecompressError),

    /// The deflate stream did not reach a clean end after consuming all input.
    #[error("inflate stopped early: {written} of {expected} bytes written")]
    InflateIncomplete {
        /// Bytes produced before the stream stalled.
        written: u64,
        /// The declared uncompressed size.
        expected: u32,
    },
}
