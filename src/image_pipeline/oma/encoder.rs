use std::io::Write;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use rand::RngCore;
use tracing::debug;

use crate::image_pipeline::common::error::{CodecError, Result};
use crate::image_pipeline::common::types::OmaImage;
use crate::image_pipeline::oma::header::{
    LEGACY_BYTE_ORDER_WORD, LEGACY_COLS_WORD, LEGACY_HEADER_WORDS, LEGACY_LITTLE_ENDIAN,
    LEGACY_OFFSET_TABLE_LEN, LEGACY_PAYLOAD_OFFSET, LEGACY_ROWS_WORD, OMA2_TAG_TEXT, RULER_LEN,
    SPEC_COLS, SPEC_IS_COLOR, SPEC_ROWS, SPEC_TEMPLATE, TAG_AREA_LEN, VALUES_LEN,
};
use crate::image_pipeline::oma::types::{ConversionConfig, OmaVariant};
use crate::image_pipeline::oma::writer::OmaWriter;

pub struct StandardOmaWriter;

impl OmaWriter for StandardOmaWriter {
    fn write_oma(&self, image: &OmaImage, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        let buffer = encode_oma(image, config.variant)?;
        output.write_all(&buffer)?;
        debug!("OMA2 encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

/// Serializes an image into a complete OMA2 byte stream.
///
/// Color images are written as one plane of `3 * rows` rows (red, green,
/// blue stacked). Only the tagged layout records that the frame is color; a
/// legacy file of a color image reads back as the stacked mono plane.
pub fn encode_oma(image: &OmaImage, variant: OmaVariant) -> Result<Vec<u8>> {
    let (rows, stacked) = image.stack_planes();
    let cols = image.cols();

    debug!(
        ?variant,
        rows,
        cols,
        is_color = image.is_color(),
        "Encoding OMA2 image"
    );

    let mut buffer = match variant {
        OmaVariant::Tagged => tagged_header(rows, cols, image.is_color())?,
        OmaVariant::Legacy => legacy_header(rows, cols)?,
    };

    let payload_start = buffer.len();
    buffer.resize(payload_start + stacked.len() * 4, 0);
    LittleEndian::write_f32_into(&stacked, &mut buffer[payload_start..]);

    Ok(buffer)
}

fn tagged_header(rows: u32, cols: u32, is_color: bool) -> Result<Vec<u8>> {
    let (rows, cols) = match (i32::try_from(rows), i32::try_from(cols)) {
        (Ok(r), Ok(c)) => (r, c),
        _ => {
            return Err(CodecError::UnsupportedVariant(format!(
                "tagged OMA2 cannot store {rows}x{cols}"
            )));
        }
    };

    let mut specs = SPEC_TEMPLATE;
    specs[SPEC_ROWS] = rows;
    specs[SPEC_COLS] = cols;
    specs[SPEC_IS_COLOR] = is_color as i32;

    let mut ruler = [0u8; RULER_LEN];
    rand::thread_rng().fill_bytes(&mut ruler);

    let mut buffer = Vec::with_capacity(TAG_AREA_LEN + 4 * (3 + specs.len() + VALUES_LEN + 4) + RULER_LEN);
    buffer.extend_from_slice(OMA2_TAG_TEXT);
    buffer.resize(TAG_AREA_LEN, 0);

    buffer.write_i32::<LittleEndian>(specs.len() as i32)?;
    buffer.write_i32::<LittleEndian>(VALUES_LEN as i32)?;
    buffer.write_i32::<LittleEndian>(RULER_LEN as i32)?;
    for spec in specs {
        buffer.write_i32::<LittleEndian>(spec)?;
    }
    for _ in 0..VALUES_LEN {
        buffer.write_f32::<LittleEndian>(0.0)?;
    }
    buffer.extend_from_slice(&ruler);

    // error, is_big_endian, comment size, extra size
    for _ in 0..4 {
        buffer.write_i32::<LittleEndian>(0)?;
    }

    Ok(buffer)
}

fn legacy_header(rows: u32, cols: u32) -> Result<Vec<u8>> {
    // legacy readers take these words as signed
    let limit = i16::MAX as u32;
    if rows > limit || cols > limit {
        return Err(CodecError::UnsupportedVariant(format!(
            "legacy OMA2 cannot store {rows}x{cols}, limit is {limit}"
        )));
    }

    let mut words = [0u16; LEGACY_HEADER_WORDS];
    words[LEGACY_COLS_WORD] = cols as u16;
    words[LEGACY_ROWS_WORD] = rows as u16;
    words[LEGACY_BYTE_ORDER_WORD] = LEGACY_LITTLE_ENDIAN;

    let mut buffer = Vec::with_capacity(LEGACY_PAYLOAD_OFFSET);
    for word in words {
        buffer.write_u16::<LittleEndian>(word)?;
    }
    for _ in 0..LEGACY_OFFSET_TABLE_LEN {
        buffer.write_f32::<LittleEndian>(0.0)?;
    }

    Ok(buffer)
}
