//! # tagwire
//!
//! Compact binary codec for sequences of integers and short strings.
//!
//! Each value is written as one tag-length-content frame:
//!
//! ```text
//! "hello"  >  [0x02, 5, 'h', 'e', 'l', 'l', 'o']
//! 42       >  [0x01, 2, '4', '2']
//! ```
//!
//! A message is the concatenation of its frames; it ends where the
//! underlying byte source ends.
//!
//! ## Example
//!
//! ```
//! use tagwire::{marshal, unmarshal_slice, Value};
//!
//! let msg = vec![Value::from("ID"), Value::from(10856), Value::from("year"), Value::from(2018)];
//! let bytes = marshal(&msg).unwrap();
//! assert_eq!(unmarshal_slice(&bytes).unwrap(), msg);
//! ```

pub mod codec;
pub mod error;
pub mod protocol;
pub mod source;

mod decoder;
mod encoder;
mod value;

pub use decoder::{unmarshal, unmarshal_slice, Decoder};
pub use encoder::{encoded_len, marshal, marshal_json, Encoder, DEFAULT_ENCODER_CAPACITY};
pub use error::{Result, TagwireError};
pub use value::{message_from_json, message_to_json, Message, Value};
