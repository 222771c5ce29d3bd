use byteorder::LittleEndian;
use tracing::debug;

use crate::image_pipeline::common::cursor::ByteCursor;
use crate::image_pipeline::common::error::{CodecError, Result};
use crate::image_pipeline::common::reader::ImageDecoder;
use crate::image_pipeline::common::types::{COLOR_PLANES, OmaImage};
use crate::image_pipeline::oma::header::OmaHeader;

/// A decoded OMA2 file: the parsed header alongside the image.
#[derive(Debug, Clone, PartialEq)]
pub struct OmaFrame {
    pub header: OmaHeader,
    pub image: OmaImage,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OmaDecoder;

impl OmaDecoder {
    /// Decodes a complete OMA2 file, keeping the header.
    ///
    /// The payload is `rows * cols` little-endian `f32` in both layouts.
    /// When the tagged header sets the color flag, the stored rows hold the
    /// red, green and blue planes stacked top to bottom, and the result is a
    /// `rows / 3 x cols x 3` image.
    pub fn decode_frame(&self, data: &[u8]) -> Result<OmaFrame> {
        debug!("Decoding OMA2 file, {} bytes", data.len());

        let mut cursor = ByteCursor::new(data);
        let header = OmaHeader::parse(&mut cursor)?;
        let (rows, cols) = header.geometry()?;
        let is_color = header.is_color();

        debug!(
            variant = ?header.variant(),
            rows,
            cols,
            is_color,
            payload_offset = cursor.position(),
            "OMA2 header parsed"
        );

        if is_color && rows % COLOR_PLANES as u32 != 0 {
            return Err(CodecError::NotDivisibleByThree { rows });
        }

        let npixels = rows as usize * cols as usize;
        cursor.enter_payload();
        let samples = cursor.read_f32_vec::<LittleEndian>(npixels)?;

        let image = if is_color {
            OmaImage::from_stacked_planes(rows, cols, samples)?
        } else {
            OmaImage::mono(rows, cols, samples)?
        };

        Ok(OmaFrame { header, image })
    }
}

impl ImageDecoder for OmaDecoder {
    type Sample = f32;

    fn decode(&self, data: &[u8]) -> Result<OmaImage> {
        Ok(self.decode_frame(data)?.image)
    }
}
