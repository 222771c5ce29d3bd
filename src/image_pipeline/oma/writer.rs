use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::types::OmaImage;
use crate::image_pipeline::oma::types::ConversionConfig;

pub trait OmaWriter {
    fn write_oma(&self, image: &OmaImage, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}
