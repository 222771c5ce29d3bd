//! Common utilities module
//!
//! This module contains the error type, the decoded image model, the byte
//! cursor and the timing helpers shared by both codecs.

pub mod cursor;
pub mod error;
pub mod reader;
pub mod timing;
pub mod types;

pub use cursor::{ByteCursor, Region};
pub use error::{CodecError, Result};
pub use reader::ImageDecoder;
pub use timing::PipelineTimings;
pub use types::{COLOR_PLANES, ChannelLayout, HobjImage, Image, OmaImage};
