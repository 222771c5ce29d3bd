//! OMA2 reading and writing module
//!
//! Handles both generations of the OMA2 container: the tagged layout and
//! the older positional one.

mod decoder;
mod encoder;
pub mod header;
pub mod types;
mod writer;


pub use decoder::{OmaDecoder, OmaFrame};
pub use encoder::{StandardOmaWriter, encode_oma};
pub use header::{LegacyHeader, OmaHeader, TaggedHeader};
pub use types::{ConversionConfig, ConversionConfigBuilder, OmaVariant};
pub use writer::OmaWriter;
