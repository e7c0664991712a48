//! Frame buffer for accumulating partial reads.
//!
//! Uses `bytes::BytesMut` for buffer management.
//! Implements a state machine for handling fragmented frames:
//! - `WaitingForTag`: need one byte to classify the next frame
//! - `WaitingForLength`: tag known, need the length byte
//! - `WaitingForContent`: length known, need N more content bytes
//!
//! # Example
//!
//! ```
//! use tagwire::protocol::FrameBuffer;
//! use tagwire::Value;
//!
//! let mut buffer = FrameBuffer::new();
//!
//! // Data arrives in arbitrary chunks
//! assert!(buffer.push(&[0x02, 2, b'h']).unwrap().is_empty());
//! let values = buffer.push(&[b'i', 0x01, 1, b'7']).unwrap();
//!
//! assert_eq!(values, vec![Value::from("hi"), Value::from(7)]);
//! buffer.finish().unwrap();
//! ```

use bytes::BytesMut;

use super::wire_format::Tag;
use super::Frame;
use crate::error::{Result, TagwireError};
use crate::value::Value;

/// Default buffer capacity: one maximal text frame (257 bytes) rounded up to a power of two.
pub const DEFAULT_BUFFER_CAPACITY: usize = 512;

/// State machine for frame parsing.
#[derive(Debug, Clone, Copy)]
enum State {
    /// Waiting for the next tag byte.
    WaitingForTag,
    /// Tag parsed, waiting for the length byte.
    WaitingForLength { tag: Tag },
    /// Length parsed, waiting for content bytes.
    WaitingForContent { tag: Tag, len: usize },
}

/// Buffer for accumulating incoming bytes and extracting complete values.
///
/// Validation matches the blocking decoder: unknown tags, oversized
/// integer lengths and malformed decimal text are rejected as soon as
/// the offending byte arrives. After an error the buffer is cleared.
pub struct FrameBuffer {
    /// Accumulated bytes not yet consumed.
    buffer: BytesMut,
    /// Current parsing state.
    state: State,
}

impl FrameBuffer {
    /// Create a new frame buffer with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY)
    }

    /// Create a new frame buffer with a custom initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
            state: State::WaitingForTag,
        }
    }

    /// Push data into the buffer and extract all complete values.
    ///
    /// Partial frames are kept for the next push.
    ///
    /// # Errors
    ///
    /// Returns the first protocol violation found; the buffer is then reset.
    pub fn push(&mut self, data: &[u8]) -> Result<Vec<Value>> {
        self.buffer.extend_from_slice(data);

        let mut values = Vec::new();
        loop {
            match self.try_extract_one() {
                Ok(Some(value)) => values.push(value),
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!(error = %e, "frame buffer reset after error");
                    self.clear();
                    return Err(e);
                }
            }
        }

        Ok(values)
    }

    /// Try to extract a single value.
    ///
    /// Returns:
    /// - `Ok(Some(value))` if a complete frame was consumed
    /// - `Ok(None)` if more data is needed
    /// - `Err(...)` on a protocol violation
    fn try_extract_one(&mut self) -> Result<Option<Value>> {
        loop {
            match self.state {
                State::WaitingForTag => {
                    if self.buffer.is_empty() {
                        return Ok(None);
                    }
                    let tag = Tag::from_byte(self.buffer[0])?;
                    let _ = self.buffer.split_to(1);
                    self.state = State::WaitingForLength { tag };
                }

                State::WaitingForLength { tag } => {
                    if self.buffer.is_empty() {
                        return Ok(None);
                    }
                    let len = self.buffer[0] as usize;
                    // Text accepts the full byte range; only integers can fail here.
                    tag.validate_len(len)?;
                    let _ = self.buffer.split_to(1);
                    self.state = State::WaitingForContent { tag, len };
                }

                State::WaitingForContent { tag, len } => {
                    if self.buffer.len() < len {
                        return Ok(None);
                    }
                    let content = self.buffer.split_to(len).freeze();
                    self.state = State::WaitingForTag;

                    let value = Frame::new(tag, content)?.into_value()?;
                    tracing::trace!(value = %value, "extracted frame");
                    return Ok(Some(value));
                }
            }
        }
    }

    /// Confirm the input ended on a frame boundary.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if a frame was started but not completed.
    pub fn finish(&self) -> Result<()> {
        match self.state {
            State::WaitingForTag => Ok(()),
            State::WaitingForLength { .. } => Err(TagwireError::Truncated {
                expected: 1,
                actual: 0,
            }),
            State::WaitingForContent { len, .. } => Err(TagwireError::Truncated {
                expected: len,
                actual: self.buffer.len(),
            }),
        }
    }

    /// Get the number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Check if the buffer sits on a frame boundary.
    pub fn is_at_boundary(&self) -> bool {
        matches!(self.state, State::WaitingForTag)
    }

    /// Clear the buffer and reset state.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.state = State::WaitingForTag;
    }

    /// Get the current state for debugging.
    #[cfg(test)]
    fn state_name(&self) -> &'static str {
        match &self.state {
            State::WaitingForTag => "WaitingForTag",
            State::WaitingForLength { .. } => "WaitingForLength",
            State::WaitingForContent { .. } => "WaitingForContent",
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{build_frame, FRAME_OVERHEAD, MAX_TEXT_LEN, TAG_INTEGER, TAG_TEXT};

    #[test]
    fn test_default_capacity_holds_max_frame() {
        assert!(DEFAULT_BUFFER_CAPACITY >= FRAME_OVERHEAD + MAX_TEXT_LEN);
        assert!(DEFAULT_BUFFER_CAPACITY.is_power_of_two());

        let mut buffer = FrameBuffer::new();
        let frame_bytes = build_frame(Tag::Text, &[b'x'; MAX_TEXT_LEN]).unwrap();
        assert_eq!(frame_bytes.len(), 257);
        assert_eq!(buffer.push(&frame_bytes).unwrap().len(), 1);
    }

    #[test]
    fn test_single_complete_frame() {
        let mut buffer = FrameBuffer::new();
        let values = buffer.push(&build_frame(Tag::Text, b"hello").unwrap()).unwrap();

        assert_eq!(values, vec![Value::from("hello")]);
        assert!(buffer.is_empty());
        assert!(buffer.is_at_boundary());
    }

    #[test]
    fn test_multiple_frames_in_one_push() {
        let mut buffer = FrameBuffer::new();

        let mut combined = build_frame(Tag::Integer, b"1").unwrap();
        combined.extend(build_frame(Tag::Text, b"second").unwrap());
        combined.extend(build_frame(Tag::Integer, b"-3").unwrap());

        let values = buffer.push(&combined).unwrap();

        assert_eq!(
            values,
            vec![Value::from(1), Value::from("second"), Value::from(-3)]
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_fragmented_header() {
        let mut buffer = FrameBuffer::new();
        let frame_bytes = build_frame(Tag::Text, b"test").unwrap();

        assert!(buffer.push(&frame_bytes[..1]).unwrap().is_empty());
        assert_eq!(buffer.state_name(), "WaitingForLength");

        assert!(buffer.push(&frame_bytes[1..2]).unwrap().is_empty());
        assert_eq!(buffer.state_name(), "WaitingForContent");

        let values = buffer.push(&frame_bytes[2..]).unwrap();
        assert_eq!(values, vec![Value::from("test")]);
        assert_eq!(buffer.state_name(), "WaitingForTag");
    }

    #[test]
    fn test_fragmented_content() {
        let mut buffer = FrameBuffer::new();
        let content = b"this is a longer payload that will be fragmented";
        let frame_bytes = build_frame(Tag::Text, content).unwrap();

        assert!(buffer.push(&frame_bytes[..12]).unwrap().is_empty());
        assert_eq!(buffer.state_name(), "WaitingForContent");
        assert_eq!(buffer.len(), 10);

        let values = buffer.push(&frame_bytes[12..]).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].as_bytes(), Some(&content[..]));
    }

    #[test]
    fn test_empty_text() {
        let mut buffer = FrameBuffer::new();
        let values = buffer.push(&[TAG_TEXT, 0]).unwrap();
        assert_eq!(values, vec![Value::from("")]);
    }

    #[test]
    fn test_max_text() {
        let mut buffer = FrameBuffer::with_capacity(16);
        let content = vec![0xABu8; 255];
        let values = buffer.push(&build_frame(Tag::Text, &content).unwrap()).unwrap();
        assert_eq!(values[0].as_bytes(), Some(&content[..]));
    }

    #[test]
    fn test_unknown_tag_resets() {
        let mut buffer = FrameBuffer::new();
        let result = buffer.push(&[TAG_INTEGER, 1, b'5', 0x07, 9, 9]);

        assert!(matches!(result, Err(TagwireError::UnknownTag(0x07))));
        assert!(buffer.is_empty());
        assert!(buffer.is_at_boundary());
    }

    #[test]
    fn test_integer_length_over_bound_rejected_early() {
        let mut buffer = FrameBuffer::new();
        let result = buffer.push(&[TAG_INTEGER, 11]);
        assert!(matches!(result, Err(TagwireError::NumberTooLong { len: 11 })));
    }

    #[test]
    fn test_integer_parse_error() {
        let mut buffer = FrameBuffer::new();
        let result = buffer.push(&[TAG_INTEGER, 3, b'1', b'+', b'2']);
        assert!(matches!(result, Err(TagwireError::Parse(_))));
    }

    #[test]
    fn test_finish_mid_frame() {
        let mut buffer = FrameBuffer::new();
        buffer.push(&[TAG_TEXT, 4, b'a']).unwrap();
        assert!(matches!(
            buffer.finish(),
            Err(TagwireError::Truncated { expected: 4, actual: 1 })
        ));

        let mut buffer = FrameBuffer::new();
        buffer.push(&[TAG_INTEGER]).unwrap();
        assert!(matches!(buffer.finish(), Err(TagwireError::Truncated { .. })));
    }

    #[test]
    fn test_finish_on_boundary() {
        let buffer = FrameBuffer::new();
        assert!(buffer.finish().is_ok());
    }

    #[test]
    fn test_clear_resets_state() {
        let mut buffer = FrameBuffer::new();
        buffer.push(&[TAG_TEXT, 5, b'a', b'b']).unwrap();

        assert_eq!(buffer.state_name(), "WaitingForContent");
        assert_eq!(buffer.len(), 2);

        buffer.clear();

        assert_eq!(buffer.state_name(), "WaitingForTag");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_byte_at_a_time() {
        let mut buffer = FrameBuffer::new();
        let mut bytes = build_frame(Tag::Integer, b"2018").unwrap();
        bytes.extend(build_frame(Tag::Text, b"hi").unwrap());

        let mut all_values = Vec::new();
        for byte in &bytes {
            all_values.extend(buffer.push(&[*byte]).unwrap());
        }

        assert_eq!(all_values, vec![Value::from(2018), Value::from("hi")]);
        assert!(buffer.finish().is_ok());
    }
}
