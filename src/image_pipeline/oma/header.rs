//! OMA2 header layouts.
//!
//! Two generations of the format exist. Newer files start with the text
//! `"OMA2 Binary Data"` inside a 30-byte tag area, followed by
//! length-prefixed blocks (specs, values, ruler, trailer, comment, extra).
//! Older files have no tag: geometry sits at fixed positions in a block of
//! 256 words, followed by an 80-entry offset table.

use byteorder::LittleEndian;
use tracing::{debug, warn};

use crate::image_pipeline::common::cursor::ByteCursor;
use crate::image_pipeline::common::error::{CodecError, Result};
use crate::image_pipeline::oma::types::OmaVariant;

/// Magic text identifying the tagged layout.
pub const OMA2_TAG: &[u8] = b"OMA2 Binary Data";
/// Tag text written by the encoder, versioned.
pub const OMA2_TAG_TEXT: &[u8] = b"OMA2 Binary Data 1.0";
/// Tag area length; the tag text is NUL padded to this size.
pub const TAG_AREA_LEN: usize = 30;

pub const SPEC_ROWS: usize = 0;
pub const SPEC_COLS: usize = 1;
pub const SPEC_IS_COLOR: usize = 8;
/// Smallest specs array that still carries the color flag.
pub const MIN_SPECS: usize = SPEC_IS_COLOR + 1;

/// Specs written for new files; slots 0, 1 and 8 are overwritten per image.
/// The remaining values are what downstream OMA2 tools expect to find.
pub const SPEC_TEMPLATE: [i32; 32] = [
    0, 0, 0, 0, 1, 1, 117315, 600, 1, 1, 0, 117315, 600, 117314, 26, 121200, 33, 0, 2, 0, 1, 0,
    2, 0, 16, 0, 0, 0, 0, 0, 2791529, 0,
];
pub const VALUES_LEN: usize = 16;
pub const RULER_LEN: usize = 16;

pub const LEGACY_HEADER_WORDS: usize = 256;
pub const LEGACY_OFFSET_TABLE_LEN: usize = 80;
pub const LEGACY_COLS_WORD: usize = 7;
pub const LEGACY_ROWS_WORD: usize = 8;
pub const LEGACY_BYTE_ORDER_WORD: usize = 226;
/// Byte-order marker meaning little-endian data.
pub const LEGACY_LITTLE_ENDIAN: u16 = 32639;
/// First payload byte of a legacy file.
pub const LEGACY_PAYLOAD_OFFSET: usize = LEGACY_HEADER_WORDS * 2 + LEGACY_OFFSET_TABLE_LEN * 4;

/// Header of a tagged (self-describing) OMA2 file.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedHeader {
    pub specs: Vec<i32>,
    pub values: Vec<f32>,
    pub ruler: Vec<u8>,
    pub error: i32,
    pub is_big_endian: i32,
    pub comment: Vec<u8>,
    pub extra: Vec<u8>,
}

impl TaggedHeader {
    fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        // the tag area is skipped even when the file is shorter than 30 bytes;
        // the next read then reports the truncation
        cursor.seek(TAG_AREA_LEN.min(cursor.len()))?;

        let nspecs = read_len(cursor, "nspecs")?;
        let nvalues = read_len(cursor, "nvalues")?;
        let nrulerchars = read_len(cursor, "nrulerchars")?;
        debug!(nspecs, nvalues, nrulerchars, "Tagged OMA2 block sizes");

        if nspecs < MIN_SPECS {
            return Err(CodecError::MissingSpecs {
                nspecs,
                required: MIN_SPECS,
            });
        }

        let specs = cursor.read_i32_vec::<LittleEndian>(nspecs)?;
        let values = cursor.read_f32_vec::<LittleEndian>(nvalues)?;
        let ruler = cursor.take(nrulerchars)?.to_vec();

        let error = cursor.read_i32::<LittleEndian>()?;
        let is_big_endian = cursor.read_i32::<LittleEndian>()?;
        let comment_size = cursor.read_i32::<LittleEndian>()?;
        let extra_size = cursor.read_i32::<LittleEndian>()?;

        let comment = read_optional_block(cursor, comment_size)?;
        let extra = read_optional_block(cursor, extra_size)?;

        if is_big_endian != 0 {
            warn!(is_big_endian, "Tagged OMA2 header flags big-endian data, reading little-endian anyway");
        }

        Ok(Self {
            specs,
            values,
            ruler,
            error,
            is_big_endian,
            comment,
            extra,
        })
    }

    pub fn spec(&self, index: usize) -> Option<i32> {
        self.specs.get(index).copied()
    }

    pub fn rows(&self) -> Option<i32> {
        self.spec(SPEC_ROWS)
    }

    pub fn cols(&self) -> Option<i32> {
        self.spec(SPEC_COLS)
    }

    /// A specs array too short to hold the flag reads as mono.
    pub fn is_color(&self) -> bool {
        self.spec(SPEC_IS_COLOR).is_some_and(|flag| flag != 0)
    }
}

/// Header of an untagged, positional OMA2 file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyHeader {
    pub cols: i16,
    pub rows: i16,
}

impl LegacyHeader {
    fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        cursor.seek(LEGACY_COLS_WORD * 2)?;
        // cols comes first here, unlike the tagged specs array
        let cols = cursor.read_i16::<LittleEndian>()?;
        let rows = cursor.read_i16::<LittleEndian>()?;
        cursor.seek(LEGACY_PAYLOAD_OFFSET)?;
        Ok(Self { cols, rows })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OmaHeader {
    Tagged(TaggedHeader),
    Legacy(LegacyHeader),
}

impl OmaHeader {
    /// Returns true when the tag text appears anywhere in `prefix`.
    pub fn has_tag(prefix: &[u8]) -> bool {
        prefix.windows(OMA2_TAG.len()).any(|w| w == OMA2_TAG)
    }

    /// Detects the layout from the first 30 bytes and parses the header,
    /// leaving the cursor on the first payload byte.
    pub fn parse(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        if Self::has_tag(cursor.peek_up_to(TAG_AREA_LEN)) {
            Ok(OmaHeader::Tagged(TaggedHeader::parse(cursor)?))
        } else {
            Ok(OmaHeader::Legacy(LegacyHeader::parse(cursor)?))
        }
    }

    pub fn variant(&self) -> OmaVariant {
        match self {
            OmaHeader::Tagged(_) => OmaVariant::Tagged,
            OmaHeader::Legacy(_) => OmaVariant::Legacy,
        }
    }

    /// Stored `(rows, cols)`. For color frames `rows` covers all three planes.
    pub fn geometry(&self) -> Result<(u32, u32)> {
        let (rows, cols) = match self {
            OmaHeader::Tagged(h) => match (h.rows(), h.cols()) {
                (Some(rows), Some(cols)) if h.specs.len() >= MIN_SPECS => (rows as i64, cols as i64),
                _ => {
                    return Err(CodecError::MissingSpecs {
                        nspecs: h.specs.len(),
                        required: MIN_SPECS,
                    });
                }
            },
            OmaHeader::Legacy(h) => (h.rows as i64, h.cols as i64),
        };
        if rows <= 0 || cols <= 0 {
            return Err(CodecError::InvalidDimensions(rows, cols));
        }
        Ok((rows as u32, cols as u32))
    }

    /// Legacy files never mark color.
    pub fn is_color(&self) -> bool {
        match self {
            OmaHeader::Tagged(h) => h.is_color(),
            OmaHeader::Legacy(_) => false,
        }
    }
}

fn read_len(cursor: &mut ByteCursor<'_>, field: &'static str) -> Result<usize> {
    let value = cursor.read_i32::<LittleEndian>()?;
    usize::try_from(value).map_err(|_| CodecError::InvalidLength {
        field,
        value: value as i64,
    })
}

/// Reads a size-prefixed block; non-positive sizes mean the block is absent.
fn read_optional_block(cursor: &mut ByteCursor<'_>, size: i32) -> Result<Vec<u8>> {
    if size <= 0 {
        return Ok(Vec::new());
    }
    Ok(cursor.take(size as usize)?.to_vec())
}
