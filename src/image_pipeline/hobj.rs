//! HOBJ reading module
//!
//! Decodes the raw monochrome frames written by the ACME imaging cameras.
//! Demosaicing of the returned Bayer data is left to the caller.

mod decoder;


pub use decoder::{HOBJ_HEADER_LEN, HobjDecoder, HobjHeader};
