//! Error types for tagwire.

use thiserror::Error;

/// Main error type for all encode and decode operations.
#[derive(Debug, Error)]
pub enum TagwireError {
    /// Encoder input is neither an integer nor a text value.
    #[error("Unsupported type in message: {0}")]
    UnsupportedType(String),

    /// Text content exceeds 255 bytes.
    #[error("String too long: {len} bytes (max 255)")]
    StringTooLong {
        /// Byte length of the rejected text.
        len: usize,
    },

    /// Integer decimal text exceeds 10 bytes, or a decoded integer frame
    /// declares more than 10 content bytes.
    #[error("Number too long: {len} bytes (max 10)")]
    NumberTooLong {
        /// Byte length of the rejected decimal text.
        len: usize,
    },

    /// Tag byte matches neither defined tag.
    #[error("Unknown tag: {0:#04x}")]
    UnknownTag(u8),

    /// Fewer content bytes available than the length byte declares.
    #[error("Truncated frame: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes the frame declared.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// Integer content bytes are not valid decimal text.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Underlying byte source failed for a reason other than end of stream.
    #[error("Source error: {0}")]
    Source(#[from] std::io::Error),
}

/// Result type alias using TagwireError.
pub type Result<T> = std::result::Result<T, TagwireError>;
