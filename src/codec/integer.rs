//! Integer codec: signed integers as decimal ASCII text.
//!
//! ```text
//! 42   >  "42"
//! -1   >  "-1"
//! ```
//!
//! The rendered text has an optional leading `-`, no `+`, and no grouping.
//! It may occupy at most [`MAX_INTEGER_LEN`] bytes.

use crate::error::{Result, TagwireError};
use crate::protocol::MAX_INTEGER_LEN;
use crate::source::ByteSource;

/// Codec for integer frame content.
pub struct IntegerCodec;

impl IntegerCodec {
    /// Render an integer as decimal text, enforcing the length bound.
    ///
    /// # Example
    ///
    /// ```
    /// use tagwire::codec::IntegerCodec;
    ///
    /// assert_eq!(IntegerCodec::render(-999999999).unwrap(), "-999999999");
    /// assert!(IntegerCodec::render(99999999999).is_err());
    /// ```
    pub fn render(value: i64) -> Result<String> {
        let text = value.to_string();
        if text.len() > MAX_INTEGER_LEN {
            return Err(TagwireError::NumberTooLong { len: text.len() });
        }
        Ok(text)
    }

    /// Parse decimal content: optional leading `-`, then one or more digits.
    pub fn parse(content: &[u8]) -> Result<i64> {
        if content.len() > MAX_INTEGER_LEN {
            return Err(TagwireError::NumberTooLong { len: content.len() });
        }

        let digits = content.strip_prefix(b"-").unwrap_or(content);
        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(TagwireError::Parse(format!(
                "invalid decimal text {:?}",
                String::from_utf8_lossy(content)
            )));
        }

        // At most ten ASCII bytes, so this always fits in an i64.
        std::str::from_utf8(content)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| {
                TagwireError::Parse(format!(
                    "invalid decimal text {:?}",
                    String::from_utf8_lossy(content)
                ))
            })
    }

    /// Read a length byte and its content from `source`, then parse it.
    ///
    /// A missing length byte counts as truncation: the tag already
    /// promised a frame.
    pub fn decode<S: ByteSource>(source: &mut S) -> Result<i64> {
        let len = read_len(source)?;
        if len > MAX_INTEGER_LEN {
            return Err(TagwireError::NumberTooLong { len });
        }

        let mut content = [0u8; MAX_INTEGER_LEN];
        source.read_exact_into(&mut content[..len])?;
        Self::parse(&content[..len])
    }
}

/// Read the length byte that follows a tag.
pub(crate) fn read_len<S: ByteSource>(source: &mut S) -> Result<usize> {
    match source.read_byte()? {
        Some(len) => Ok(len as usize),
        None => Err(TagwireError::Truncated {
            expected: 1,
            actual: 0,
        }),
    }
}
