//! Decoder: byte source to message.
//!
//! A loop over two states:
//! - read a tag byte; a clean end of stream here completes the message
//! - dispatch on the tag and read one frame
//!
//! Any error aborts the whole call. Values decoded before the error are
//! dropped, never returned.
//!
//! # Example
//!
//! ```
//! use tagwire::{unmarshal_slice, Value};
//!
//! let msg = unmarshal_slice(&[0x01, 1, b'1', 0x02, 2, b'h', b'i']).unwrap();
//! assert_eq!(msg, vec![Value::from(1), Value::from("hi")]);
//! ```

use crate::codec::{IntegerCodec, TextCodec};
use crate::error::Result;
use crate::protocol::Tag;
use crate::source::{ByteSource, SliceSource};
use crate::value::{Message, Value};

/// Reads values one frame at a time from a [`ByteSource`].
///
/// Usable as an iterator when values should be handled as they arrive;
/// iteration ends at a clean end of stream or after the first error.
#[derive(Debug)]
pub struct Decoder<S> {
    source: S,
    done: bool,
}

impl<S: ByteSource> Decoder<S> {
    /// Create a decoder over `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            done: false,
        }
    }

    /// Decode the next value.
    ///
    /// Returns `Ok(None)` when the source ends cleanly on a frame boundary.
    pub fn next_value(&mut self) -> Result<Option<Value>> {
        let Some(byte) = self.source.read_byte()? else {
            return Ok(None);
        };

        let value = match Tag::from_byte(byte)? {
            Tag::Integer => Value::Integer(IntegerCodec::decode(&mut self.source)?),
            Tag::Text => Value::Text(TextCodec::decode(&mut self.source)?),
        };

        tracing::trace!(value = %value, "decoded frame");
        Ok(Some(value))
    }

    /// Decode every remaining value until the source ends.
    pub fn decode_all(&mut self) -> Result<Message> {
        let mut values = Vec::new();
        loop {
            match self.next_value() {
                Ok(Some(value)) => values.push(value),
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!(decoded = values.len(), error = %e, "decode failed");
                    self.done = true;
                    return Err(e);
                }
            }
        }
        self.done = true;
        tracing::debug!(values = values.len(), "message decoded");
        Ok(values)
    }

    /// Unwrap, returning the source.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: ByteSource> Iterator for Decoder<S> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_value() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode a complete message from `source`.
///
/// End of stream at a tag boundary is the only successful termination.
pub fn unmarshal<S: ByteSource>(source: S) -> Result<Message> {
    Decoder::new(source).decode_all()
}

/// Decode a complete message from an in-memory buffer.
pub fn unmarshal_slice(data: &[u8]) -> Result<Message> {
    unmarshal(SliceSource::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagwireError;
    use crate::protocol::{TAG_INTEGER, TAG_TEXT};
    use crate::source::ReaderSource;
    use std::io::{self, Read};

    /// Yields `data` once, then fails every later read.
    struct FailAfter {
        data: Option<Vec<u8>>,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.take() {
                Some(data) => {
                    buf[..data.len()].copy_from_slice(&data);
                    Ok(data.len())
                }
                None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed")),
            }
        }
    }

    fn sample_bytes() -> Vec<u8> {
        vec![TAG_INTEGER, 1, b'1', TAG_TEXT, 2, b'h', b'i', TAG_INTEGER, 1, b'2']
    }

    #[test]
    fn test_unmarshal_sample() {
        let got = unmarshal_slice(&sample_bytes()).unwrap();
        assert_eq!(got, vec![Value::from(1), Value::from("hi"), Value::from(2)]);
    }

    #[test]
    fn test_unmarshal_empty() {
        assert!(unmarshal_slice(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_unmarshal_prefix_on_frame_boundary() {
        let got = unmarshal_slice(&sample_bytes()[..3]).unwrap();
        assert_eq!(got, vec![Value::from(1)]);
    }

    #[test]
    fn test_unmarshal_unknown_tag() {
        assert!(matches!(
            unmarshal_slice(&[0x03, 1, b'1']),
            Err(TagwireError::UnknownTag(0x03))
        ));
    }

    #[test]
    fn test_unmarshal_unknown_tag_after_good_frames() {
        let mut bytes = sample_bytes();
        bytes.push(0xFF);
        assert!(matches!(
            unmarshal_slice(&bytes),
            Err(TagwireError::UnknownTag(0xFF))
        ));
    }

    #[test]
    fn test_unmarshal_truncated_content() {
        assert!(matches!(
            unmarshal_slice(&[TAG_INTEGER, 1]),
            Err(TagwireError::Truncated { expected: 1, actual: 0 })
        ));
        assert!(matches!(
            unmarshal_slice(&[TAG_TEXT, 5, b'a', b'b']),
            Err(TagwireError::Truncated { expected: 5, actual: 2 })
        ));
    }

    #[test]
    fn test_unmarshal_tag_without_length() {
        assert!(matches!(
            unmarshal_slice(&[TAG_TEXT]),
            Err(TagwireError::Truncated { .. })
        ));
    }

    #[test]
    fn test_unmarshal_integer_length_over_bound() {
        let mut bytes = vec![TAG_INTEGER, 11];
        bytes.extend_from_slice(b"12345678901");
        assert!(matches!(
            unmarshal_slice(&bytes),
            Err(TagwireError::NumberTooLong { len: 11 })
        ));
    }

    #[test]
    fn test_unmarshal_parse_error() {
        assert!(matches!(
            unmarshal_slice(&[TAG_INTEGER, 2, b'x', b'1']),
            Err(TagwireError::Parse(_))
        ));
        assert!(matches!(
            unmarshal_slice(&[TAG_INTEGER, 0]),
            Err(TagwireError::Parse(_))
        ));
    }

    #[test]
    fn test_unmarshal_empty_text() {
        assert_eq!(unmarshal_slice(&[TAG_TEXT, 0]).unwrap(), vec![Value::from("")]);
    }

    #[test]
    fn test_unmarshal_from_reader() {
        let reader = std::io::Cursor::new(sample_bytes());
        let got = unmarshal(ReaderSource::new(reader)).unwrap();
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn test_unmarshal_source_error_discards_values() {
        // One complete frame, then the source fails instead of ending.
        let reader = FailAfter {
            data: Some(vec![TAG_INTEGER, 1, b'5']),
        };
        let result = unmarshal(ReaderSource::new(reader));
        match result {
            Err(TagwireError::Source(e)) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected Source error, got {:?}", other),
        }
    }

    #[test]
    fn test_decoder_iterator() {
        let bytes = sample_bytes();
        let values: Vec<Value> = Decoder::new(SliceSource::new(&bytes))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_decoder_iterator_stops_after_error() {
        let bytes = [TAG_INTEGER, 1, b'7', 0x09, TAG_INTEGER, 1, b'8'];
        let mut dec = Decoder::new(SliceSource::new(&bytes));
        assert_eq!(dec.next().unwrap().unwrap(), Value::Integer(7));
        assert!(matches!(dec.next(), Some(Err(TagwireError::UnknownTag(0x09)))));
        assert!(dec.next().is_none());
    }

    #[test]
    fn test_decoder_leaves_source_after_message() {
        let bytes = sample_bytes();
        let mut src = SliceSource::new(&bytes);
        unmarshal(&mut src).unwrap();
        assert_eq!(src.remaining(), 0);
    }
}
