//! HOBJ frame decoder.
//!
//! HOBJ files carry raw monochrome sensor frames from the ACME color cameras.
//! The first 84 bytes hold a header whose multi-byte fields are big-endian;
//! the pixel block that follows is little-endian `i16`.

use byteorder::{BigEndian, LittleEndian};
use tracing::debug;

use crate::image_pipeline::common::cursor::ByteCursor;
use crate::image_pipeline::common::error::{CodecError, Result};
use crate::image_pipeline::common::reader::ImageDecoder;
use crate::image_pipeline::common::types::HobjImage;

/// Size of the fixed header prefix.
pub const HOBJ_HEADER_LEN: usize = 84;

const NPIXELS_OFFSET: usize = 72;
const ROWS_OFFSET: usize = 80;

/// Per-row bytes between the header and the pixel block.
const ROW_PREAMBLE_BYTES: usize = 6;
/// Fixed bytes after the per-row preamble.
const PAYLOAD_PAD_BYTES: usize = 17;

/// Geometry fields pulled from the 84-byte header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HobjHeader {
    pub npixels: i32,
    pub rows_minus1: i16,
    pub cols_minus1: i16,
}

impl HobjHeader {
    pub fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let header = cursor.take(HOBJ_HEADER_LEN)?;

        let mut fields = ByteCursor::new(header);
        fields.seek(NPIXELS_OFFSET)?;
        let npixels = fields.read_i32::<BigEndian>()?;
        fields.seek(ROWS_OFFSET)?;
        let rows_minus1 = fields.read_i16::<BigEndian>()?;
        let cols_minus1 = fields.read_i16::<BigEndian>()?;

        Ok(Self {
            npixels,
            rows_minus1,
            cols_minus1,
        })
    }

    pub fn rows(&self) -> i64 {
        self.rows_minus1 as i64 + 1
    }

    pub fn cols(&self) -> i64 {
        self.cols_minus1 as i64 + 1
    }

    /// Absolute offset of the first pixel.
    pub fn payload_offset(&self) -> usize {
        HOBJ_HEADER_LEN + self.rows() as usize * ROW_PREAMBLE_BYTES + PAYLOAD_PAD_BYTES
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HobjDecoder;

impl ImageDecoder for HobjDecoder {
    type Sample = i16;

    /// Decodes a complete HOBJ file held in memory.
    ///
    /// The header's pixel count is not trusted: when it disagrees with
    /// `rows * cols` the decode fails with [`CodecError::ShapeMismatch`]
    /// instead of reshaping whatever was read.
    fn decode(&self, data: &[u8]) -> Result<HobjImage> {
        debug!("Decoding HOBJ frame, {} bytes", data.len());

        let mut cursor = ByteCursor::new(data);
        let header = HobjHeader::parse(&mut cursor)?;
        let (rows, cols) = (header.rows(), header.cols());

        debug!(
            "HOBJ header: {}x{} (rows x cols), {} pixels",
            rows, cols, header.npixels
        );

        if rows <= 0 || cols <= 0 {
            return Err(CodecError::InvalidDimensions(rows, cols));
        }
        let npixels = usize::try_from(header.npixels).map_err(|_| CodecError::InvalidLength {
            field: "npixels",
            value: header.npixels as i64,
        })?;

        cursor.seek(header.payload_offset())?;
        cursor.enter_payload();
        let samples = cursor.read_i16_vec::<LittleEndian>(npixels)?;

        HobjImage::mono(rows as u32, cols as u32, samples)
    }
}
