//! Codec module - per-type content encoding shared by encoder and decoder.
//!
//! - [`IntegerCodec`] - signed integer as decimal ASCII text (max 10 bytes)
//! - [`TextCodec`] - raw text bytes (max 255 bytes)
//!
//! Encoding produces frame content only; [`Frame`](crate::protocol::Frame)
//! lays out the tag and length byte. Decoding reads the length byte and
//! content that follow a tag.
//!
//! # Design
//!
//! Codecs are marker structs with static methods rather than trait objects,
//! so dispatch on [`Value`](crate::Value) stays a plain `match`.
//!
//! # Example
//!
//! ```
//! use tagwire::codec::{IntegerCodec, TextCodec};
//! use tagwire::source::SliceSource;
//!
//! assert_eq!(IntegerCodec::render(42).unwrap(), "42");
//!
//! let text = TextCodec::decode(&mut SliceSource::new(b"\x02hi")).unwrap();
//! assert_eq!(&text[..], b"hi");
//! ```

mod integer;
mod text;

pub use integer::IntegerCodec;
pub use text::TextCodec;
