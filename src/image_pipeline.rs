//! Image codec module
//!
//! This module reads HOBJ camera frames, reads and writes both OMA2
//! layouts, and orchestrates HOBJ to OMA2 conversion.

pub mod common;
pub mod conversions;
pub mod files;
pub mod hobj;
pub mod oma;

pub use common::{
    ChannelLayout,
    CodecError,
    HobjImage,
    Image,
    ImageDecoder,
    OmaImage,
    PipelineTimings,
    Result,
};

pub use hobj::{
    HobjDecoder,
    HobjHeader,
};

pub use oma::{
    ConversionConfig,
    ConversionConfigBuilder,
    OmaDecoder,
    OmaFrame,
    OmaHeader,
    OmaVariant,
    OmaWriter,
    StandardOmaWriter,
    encode_oma,
};

pub use files::{
    oma_output_path,
    read_hobj,
    read_oma,
    read_oma_frame,
    write_oma,
};

pub use conversions::{
    HobjToOmaPipeline,
};
