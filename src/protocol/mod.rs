//! Protocol module - wire format, framing, and frame types.
//!
//! This module implements the tag-length-content wire format:
//! - Tag constants and length bounds
//! - Frame struct with typed accessors
//! - Frame buffer for decoding chunked input

mod frame;
mod frame_buffer;
mod wire_format;

pub use frame::{build_frame, Frame};
pub use frame_buffer::{FrameBuffer, DEFAULT_BUFFER_CAPACITY};
pub use wire_format::{Tag, FRAME_OVERHEAD, MAX_INTEGER_LEN, MAX_TEXT_LEN, TAG_INTEGER, TAG_TEXT};
