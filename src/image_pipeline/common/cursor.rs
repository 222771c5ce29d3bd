//! Typed cursor over an in-memory byte source.
//!
//! Every read advances by the width of the field it decodes and names its
//! byte order explicitly, so header layouts read as a sequence of typed
//! fields instead of offset arithmetic. A short read reports
//! [`CodecError::TruncatedHeader`] or [`CodecError::TruncatedPayload`]
//! depending on which region the cursor is currently in.

use byteorder::ByteOrder;

use crate::image_pipeline::common::error::{CodecError, Result};

/// Which part of the file the cursor is reading; selects the error kind for short reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Header,
    Payload,
}

#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    region: Region,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            region: Region::Header,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Switches short-read reporting to the pixel payload.
    pub fn enter_payload(&mut self) {
        self.region = Region::Payload;
    }

    /// Moves to an absolute offset. Seeking exactly to the end is allowed.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(CodecError::SeekOutOfRange {
                offset,
                len: self.data.len(),
            });
        }
        self.pos = offset;
        Ok(())
    }

    /// Returns up to `n` bytes from the current position without advancing.
    pub fn peek_up_to(&self, n: usize) -> &'a [u8] {
        let end = self.pos.saturating_add(n).min(self.data.len());
        &self.data[self.pos..end]
    }

    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(self.short(n));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Like [`take`](Self::take) for `count` fields of `width` bytes each.
    pub fn take_fields(&mut self, count: usize, width: usize) -> Result<&'a [u8]> {
        let n = count.checked_mul(width).ok_or_else(|| self.short(usize::MAX))?;
        self.take(n)
    }

    pub fn read_i16<B: ByteOrder>(&mut self) -> Result<i16> {
        Ok(B::read_i16(self.take(2)?))
    }

    pub fn read_u16<B: ByteOrder>(&mut self) -> Result<u16> {
        Ok(B::read_u16(self.take(2)?))
    }

    pub fn read_i32<B: ByteOrder>(&mut self) -> Result<i32> {
        Ok(B::read_i32(self.take(4)?))
    }

    pub fn read_f32<B: ByteOrder>(&mut self) -> Result<f32> {
        Ok(B::read_f32(self.take(4)?))
    }

    pub fn read_i16_vec<B: ByteOrder>(&mut self, count: usize) -> Result<Vec<i16>> {
        let bytes = self.take_fields(count, 2)?;
        let mut out = vec![0i16; count];
        B::read_i16_into(bytes, &mut out);
        Ok(out)
    }

    pub fn read_i32_vec<B: ByteOrder>(&mut self, count: usize) -> Result<Vec<i32>> {
        let bytes = self.take_fields(count, 4)?;
        let mut out = vec![0i32; count];
        B::read_i32_into(bytes, &mut out);
        Ok(out)
    }

    pub fn read_f32_vec<B: ByteOrder>(&mut self, count: usize) -> Result<Vec<f32>> {
        let bytes = self.take_fields(count, 4)?;
        let mut out = vec![0f32; count];
        B::read_f32_into(bytes, &mut out);
        Ok(out)
    }

    fn short(&self, needed: usize) -> CodecError {
        let (offset, available) = (self.pos, self.remaining());
        match self.region {
            Region::Header => CodecError::TruncatedHeader {
                offset,
                needed,
                available,
            },
            Region::Payload => CodecError::TruncatedPayload {
                offset,
                needed,
                available,
            },
        }
    }
}
