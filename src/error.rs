//! Error types for the Huffman codec.

use thiserror::Error;

/// Error variants for compression and decompression.
#[derive(Debug, Error)]
pub enum Error {
    /// The input cannot be modelled (e.g. an empty frequency table handed
    /// to the tree builder, or a count too large for the container).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The container bytes do not describe a valid compressed stream.
    #[error("corrupt container: {0}")]
    CorruptContainer(String),

    /// A symbol has no entry in the code table.
    #[error("no code for symbol 0x{symbol:02x}")]
    Encoding {
        /// The symbol that could not be encoded.
        symbol: u8,
    },

    /// An I/O error occurred while reading or writing data.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        Error::CorruptContainer(msg.into())
    }
}

/// A specialized Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
