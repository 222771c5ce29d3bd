//! Readers and writers for the HOBJ and OMA2 image containers produced by
//! the ACME combustion imaging cameras.

pub mod image_pipeline;
pub mod logger;
