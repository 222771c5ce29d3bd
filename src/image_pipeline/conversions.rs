//! Pipeline conversions module
//!
//! This module contains orchestration logic for format conversions.

mod hobj_to_oma;

#[cfg(test)]
mod tests;

pub use hobj_to_oma::HobjToOmaPipeline;
