use std::io;

/// Error type threaded through the whole crate.
///
/// "Not found"-style outcomes (a missing word, an exhausted cursor) are modeled as `Option`
/// on the relevant methods, not as a variant here.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    /// Failed to map a file, or the mapped bytes are not a valid dictzip/gzip header.
    #[error("invalid dictzip header: {0}")]
    InvalidFileFormat(String),

    /// A line in the index did not have the expected `headword \t offset \t length` shape.
    #[error("line {0}: not enough <tab>-separated columns found, expected 3")]
    MissingColumnInIndex(usize),

    /// A base64 field in the index contained a byte outside `A-Za-z0-9+/`, or overran the
    /// accepted field width.
    #[error("invalid character '{0}' found on line {1} at position {2}")]
    InvalidCharacter(char, usize, usize),

    /// Underlying DEFLATE stream did not decompress cleanly.
    #[error("failed to decompress chunk {0}")]
    DecompressFailed(u64),

    #[error(transparent)]
    Io(#[from] io::Error),
}
