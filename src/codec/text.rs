//! Text codec: raw bytes behind a one-byte length.
//!
//! ```text
//! "hello"  >  [5, 'h', 'e', 'l', 'l', 'o']
//! ```

use bytes::Bytes;

use super::integer::read_len;
use crate::error::{Result, TagwireError};
use crate::protocol::MAX_TEXT_LEN;
use crate::source::ByteSource;

/// Codec for text frame content. Bytes are copied verbatim, no escaping.
pub struct TextCodec;

impl TextCodec {
    /// Check `data` fits in a single frame.
    #[inline]
    pub fn check_len(data: &[u8]) -> Result<()> {
        if data.len() > MAX_TEXT_LEN {
            return Err(TagwireError::StringTooLong { len: data.len() });
        }
        Ok(())
    }

    /// Read a length byte and exactly that many content bytes.
    ///
    /// Every length byte value (0-255) is valid.
    pub fn decode<S: ByteSource>(source: &mut S) -> Result<Bytes> {
        let len = read_len(source)?;
        let mut content = vec![0u8; len];
        source.read_exact_into(&mut content)?;
        Ok(Bytes::from(content))
    }
}
