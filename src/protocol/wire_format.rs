//! Wire format constants and tag classification.
//!
//! Every value travels as one frame:
//! ```text
//! ┌────────┬────────┬──────────────────┐
//! │ Tag    │ Length │ Content          │
//! │ 1 byte │ 1 byte │ Length bytes     │
//! └────────┴────────┴──────────────────┘
//! ```
//!
//! A message is zero or more frames back to back, with no outer length
//! or terminator.

use crate::error::{Result, TagwireError};

/// Tag byte for integer frames (content is decimal ASCII text).
pub const TAG_INTEGER: u8 = 0x01;

/// Tag byte for text frames (content is raw bytes).
pub const TAG_TEXT: u8 = 0x02;

/// Maximum text content length in bytes.
pub const MAX_TEXT_LEN: usize = 255;

/// Maximum integer decimal text length in bytes (sign included).
pub const MAX_INTEGER_LEN: usize = 10;

/// Tag + length byte preceding every frame's content.
pub const FRAME_OVERHEAD: usize = 2;

/// Frame kind identified by the tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Signed decimal integer.
    Integer,
    /// Raw text bytes.
    Text,
}

impl Tag {
    /// Classify a tag byte.
    ///
    /// # Example
    ///
    /// ```
    /// use tagwire::protocol::{Tag, TAG_TEXT};
    ///
    /// assert_eq!(Tag::from_byte(TAG_TEXT).unwrap(), Tag::Text);
    /// assert!(Tag::from_byte(0x7F).is_err());
    /// ```
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            TAG_INTEGER => Ok(Tag::Integer),
            TAG_TEXT => Ok(Tag::Text),
            other => Err(TagwireError::UnknownTag(other)),
        }
    }

    /// Wire byte for this tag.
    #[inline]
    pub fn as_byte(self) -> u8 {
        match self {
            Tag::Integer => TAG_INTEGER,
            Tag::Text => TAG_TEXT,
        }
    }

    /// Largest content length a frame of this kind may declare.
    #[inline]
    pub fn max_content_len(self) -> usize {
        match self {
            Tag::Integer => MAX_INTEGER_LEN,
            Tag::Text => MAX_TEXT_LEN,
        }
    }

    /// Check a declared content length against this tag's bound.
    pub fn validate_len(self, len: usize) -> Result<()> {
        if len <= self.max_content_len() {
            return Ok(());
        }
        Err(match self {
            Tag::Integer => TagwireError::NumberTooLong { len },
            Tag::Text => TagwireError::StringTooLong { len },
        })
    }
}

impl TryFrom<u8> for Tag {
    type Error = TagwireError;

    fn try_from(byte: u8) -> Result<Self> {
        Tag::from_byte(byte)
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> u8 {
        tag.as_byte()
    }
}
