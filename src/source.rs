//! Byte sources the decoder reads from.
//!
//! The decoder needs exactly two capabilities:
//! - read one byte, or learn that the stream has ended
//! - read exactly N bytes, or fail
//!
//! [`SliceSource`] serves in-memory buffers. [`ReaderSource`] adapts any
//! [`std::io::Read`] and keeps reading until a request is completely
//! filled, so sources that return short reads (pipes, sockets, chunked
//! streams) are handled correctly.
//!
//! # Example
//!
//! ```
//! use tagwire::source::{ByteSource, SliceSource};
//!
//! let mut src = SliceSource::new(&[1, 2, 3]);
//! assert_eq!(src.read_byte().unwrap(), Some(1));
//!
//! let mut rest = [0u8; 2];
//! src.read_exact_into(&mut rest).unwrap();
//! assert_eq!(rest, [2, 3]);
//! assert_eq!(src.read_byte().unwrap(), None);
//! ```

use std::io::{ErrorKind, Read};

use crate::error::{Result, TagwireError};

/// Minimal byte input capability.
pub trait ByteSource {
    /// Read one byte. `Ok(None)` signals a clean end of stream.
    fn read_byte(&mut self) -> Result<Option<u8>>;

    /// Fill `buf` completely.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if the stream ends before `buf` is full, or
    /// `Source` if the underlying source fails.
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<()>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn read_byte(&mut self) -> Result<Option<u8>> {
        (**self).read_byte()
    }

    #[inline]
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_exact_into(buf)
    }
}

/// Byte source over an in-memory slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Create a source positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.data.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }

    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<()> {
        let available = self.remaining();
        if available < buf.len() {
            // Consume what is left so the source reflects the failed read.
            self.pos = self.data.len();
            return Err(TagwireError::Truncated {
                expected: buf.len(),
                actual: available,
            });
        }
        buf.copy_from_slice(&self.data[self.pos..self.pos + buf.len()]);
        self.pos += buf.len();
        Ok(())
    }
}

/// Byte source adapting a [`std::io::Read`].
///
/// No internal buffering; wrap the reader in a `BufReader` if per-byte
/// reads are expensive.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Get a reference to the wrapped reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwrap, returning the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(TagwireError::Source(e)),
            }
        }
    }

    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(TagwireError::Truncated {
                        expected: buf.len(),
                        actual: filled,
                    })
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(TagwireError::Source(e)),
            }
        }
        Ok(())
    }
}
