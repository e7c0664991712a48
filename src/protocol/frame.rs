//! Frame struct: one tag + length + content unit on the wire.
//!
//! # Example
//!
//! ```
//! use tagwire::protocol::{Frame, Tag};
//! use tagwire::Value;
//!
//! let frame = Frame::from_value(&Value::from("hi")).unwrap();
//! assert_eq!(frame.tag(), Tag::Text);
//! assert_eq!(frame.to_vec(), vec![0x02, 2, b'h', b'i']);
//! assert_eq!(frame.into_value().unwrap(), Value::from("hi"));
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use super::wire_format::{Tag, FRAME_OVERHEAD};
use crate::codec::{IntegerCodec, TextCodec};
use crate::error::Result;
use crate::value::Value;

/// A complete, validated frame.
///
/// The content length always fits the tag's bound, so the length byte is
/// derived from `content.len()` and never stored separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    tag: Tag,
    content: Bytes,
}

impl Frame {
    /// Create a frame, checking the content length against the tag's bound.
    pub fn new(tag: Tag, content: Bytes) -> Result<Self> {
        tag.validate_len(content.len())?;
        Ok(Self { tag, content })
    }

    /// Build the frame that encodes `value`.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Integer(i) => {
                let text = IntegerCodec::render(*i)?;
                Ok(Self {
                    tag: Tag::Integer,
                    content: Bytes::from(text),
                })
            }
            Value::Text(b) => {
                TextCodec::check_len(b)?;
                Ok(Self {
                    tag: Tag::Text,
                    content: b.clone(),
                })
            }
        }
    }

    /// Interpret the content according to the tag.
    pub fn into_value(self) -> Result<Value> {
        match self.tag {
            Tag::Integer => IntegerCodec::parse(&self.content).map(Value::Integer),
            Tag::Text => Ok(Value::Text(self.content)),
        }
    }

    /// Frame kind.
    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Content bytes.
    #[inline]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content length, the value carried in the length byte.
    #[inline]
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Total encoded size, tag and length byte included.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.content.len()
    }

    /// Append the wire form of this frame to `buf`.
    ///
    /// This is the only place the tag, length and content bytes are laid out.
    pub fn encode_into(&self, buf: &mut BytesMut) {
        buf.reserve(self.encoded_len());
        buf.put_u8(self.tag.as_byte());
        buf.put_u8(self.content.len() as u8);
        buf.put_slice(&self.content);
    }

    /// Wire form of this frame as a fresh vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.to_vec()
    }
}

/// Build a complete frame as a single byte vector.
///
/// # Errors
///
/// Returns `NumberTooLong` or `StringTooLong` if `content` exceeds the
/// tag's bound.
pub fn build_frame(tag: Tag, content: &[u8]) -> Result<Vec<u8>> {
    Ok(Frame::new(tag, Bytes::copy_from_slice(content))?.to_vec())
}
