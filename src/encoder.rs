//! Encoder: message to byte buffer.
//!
//! Each value becomes one frame, appended in input order. Encoding is
//! deterministic and all-or-nothing: the first value that cannot be
//! encoded aborts the call and no partial output is returned.
//!
//! # Example
//!
//! ```
//! use tagwire::{marshal, Value};
//!
//! let bytes = marshal(&[Value::from(1)]).unwrap();
//! assert_eq!(&bytes[..], &[0x01, 1, b'1']);
//! ```

use bytes::{Bytes, BytesMut};

use crate::error::Result;
use crate::protocol::Frame;
use crate::value::{message_from_json, Value};

/// Default initial buffer capacity.
pub const DEFAULT_ENCODER_CAPACITY: usize = 1024;

/// Accumulates frames into a single buffer.
#[derive(Debug)]
pub struct Encoder {
    buf: BytesMut,
    count: usize,
}

impl Encoder {
    /// Create an encoder with the default capacity (1KB).
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ENCODER_CAPACITY)
    }

    /// Create an encoder with a custom initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            count: 0,
        }
    }

    /// Append one value as a frame.
    ///
    /// On error the buffer is left exactly as it was before the call.
    pub fn encode_value(&mut self, value: &Value) -> Result<()> {
        let frame = Frame::from_value(value).map_err(|e| {
            tracing::debug!(index = self.count, error = %e, "encode failed");
            e
        })?;

        frame.encode_into(&mut self.buf);
        self.count += 1;
        tracing::trace!(value = %value, bytes = frame.encoded_len(), "encoded frame");
        Ok(())
    }

    /// Append every value in order, stopping at the first failure.
    pub fn encode_all<'a, I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        for value in values {
            self.encode_value(value)?;
        }
        Ok(())
    }

    /// Number of frames written.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.count
    }

    /// Number of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finish encoding and take the buffer.
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a message into a byte buffer.
///
/// An empty message yields an empty buffer.
///
/// # Example
///
/// ```
/// use tagwire::{marshal, Value};
///
/// let msg = vec![Value::from("ID"), Value::from(10856)];
/// let bytes = marshal(&msg).unwrap();
/// assert_eq!(&bytes[..], b"\x02\x02ID\x01\x0510856");
/// ```
pub fn marshal(values: &[Value]) -> Result<Bytes> {
    let mut encoder = Encoder::new();
    encoder.encode_all(values)?;
    tracing::debug!(
        values = encoder.frame_count(),
        bytes = encoder.len(),
        "message encoded"
    );
    Ok(encoder.finish())
}

/// Encode an untyped JSON array.
///
/// Elements must be JSON integers or strings; anything else fails with
/// `UnsupportedType`. `null` encodes as an empty message.
pub fn marshal_json(json: &serde_json::Value) -> Result<Bytes> {
    let msg = message_from_json(json)?;
    marshal(&msg)
}

/// Exact encoded size of a message, failing like [`marshal`] would.
pub fn encoded_len(values: &[Value]) -> Result<usize> {
    values
        .iter()
        .map(|v| Frame::from_value(v).map(|f| f.encoded_len()))
        .sum()
}
