use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::types::Image;

/// Decodes a whole in-memory file into an image.
pub trait ImageDecoder {
    type Sample;

    fn decode(&self, data: &[u8]) -> Result<Image<Self::Sample>>;
}
