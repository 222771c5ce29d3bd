//! Decoded image types shared by the HOBJ and OMA2 codecs

use crate::image_pipeline::common::error::{CodecError, Result};

/// Number of planes in a color frame (red, green, blue).
pub const COLOR_PLANES: usize = 3;

/// How samples are laid out per pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    /// One sample per pixel
    Mono,
    /// Three samples per pixel, interleaved [R, G, B, R, G, B, ...]
    Color,
}

impl ChannelLayout {
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Color => COLOR_PLANES,
        }
    }

    pub fn is_color(self) -> bool {
        matches!(self, ChannelLayout::Color)
    }
}

/// A decoded frame, row-major with the channel index innermost.
///
/// `T` is `i16` for HOBJ frames and `f32` for OMA2 frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    rows: u32,
    cols: u32,
    layout: ChannelLayout,
    samples: Vec<T>,
}

/// Raw sensor frame as stored in a HOBJ file
pub type HobjImage = Image<i16>;

/// Floating point frame as stored in an OMA2 file
pub type OmaImage = Image<f32>;

impl<T> Image<T> {
    /// Builds an image, checking that the sample count matches the geometry.
    pub fn new(rows: u32, cols: u32, layout: ChannelLayout, samples: Vec<T>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(CodecError::InvalidDimensions(rows as i64, cols as i64));
        }
        let expected = sample_count(rows, cols, layout)?;
        if samples.len() != expected {
            return Err(CodecError::ShapeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            layout,
            samples,
        })
    }

    pub fn mono(rows: u32, cols: u32, samples: Vec<T>) -> Result<Self> {
        Self::new(rows, cols, ChannelLayout::Mono, samples)
    }

    pub fn color(rows: u32, cols: u32, samples: Vec<T>) -> Result<Self> {
        Self::new(rows, cols, ChannelLayout::Color, samples)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn is_color(&self) -> bool {
        self.layout.is_color()
    }

    /// Logical shape: `[rows, cols]` or `[rows, cols, 3]`.
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = vec![self.rows as usize, self.cols as usize];
        if self.is_color() {
            shape.push(COLOR_PLANES);
        }
        shape
    }

    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }

    /// Converts every sample, keeping the geometry.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Image<U> {
        Image {
            rows: self.rows,
            cols: self.cols,
            layout: self.layout,
            samples: self.samples.into_iter().map(f).collect(),
        }
    }
}

impl<T: Copy> Image<T> {
    pub fn get(&self, row: u32, col: u32, channel: usize) -> Option<T> {
        if row >= self.rows || col >= self.cols || channel >= self.layout.channels() {
            return None;
        }
        let channels = self.layout.channels();
        let idx = (row as usize * self.cols as usize + col as usize) * channels + channel;
        self.samples.get(idx).copied()
    }

    /// Copies out one channel as a `rows x cols` plane.
    pub fn plane(&self, channel: usize) -> Option<Vec<T>> {
        let channels = self.layout.channels();
        if channel >= channels {
            return None;
        }
        Some(
            self.samples
                .iter()
                .skip(channel)
                .step_by(channels)
                .copied()
                .collect(),
        )
    }

    /// Returns the samples as one vertically stacked plane and its row count.
    ///
    /// Color frames become red rows, then green rows, then blue rows
    /// (`3 * rows` in total); mono frames are returned unchanged.
    pub fn stack_planes(&self) -> (u32, Vec<T>) {
        match self.layout {
            ChannelLayout::Mono => (self.rows, self.samples.clone()),
            ChannelLayout::Color => {
                let mut stacked = Vec::with_capacity(self.samples.len());
                for channel in 0..COLOR_PLANES {
                    stacked.extend(self.samples.iter().skip(channel).step_by(COLOR_PLANES));
                }
                (self.rows * COLOR_PLANES as u32, stacked)
            }
        }
    }

    /// Splits a `rows x cols` stack of three equal horizontal bands into a
    /// color image of `rows / 3` rows.
    pub fn from_stacked_planes(rows: u32, cols: u32, stacked: Vec<T>) -> Result<Self> {
        if rows % COLOR_PLANES as u32 != 0 {
            return Err(CodecError::NotDivisibleByThree { rows });
        }
        let expected = sample_count(rows, cols, ChannelLayout::Mono)?;
        if stacked.len() != expected {
            return Err(CodecError::ShapeMismatch {
                expected,
                actual: stacked.len(),
            });
        }

        let band = expected / COLOR_PLANES;
        let (red, rest) = stacked.split_at(band);
        let (green, blue) = rest.split_at(band);
        let samples = red
            .iter()
            .zip(green)
            .zip(blue)
            .flat_map(|((&r, &g), &b)| [r, g, b])
            .collect();

        Self::color(rows / COLOR_PLANES as u32, cols, samples)
    }
}

fn sample_count(rows: u32, cols: u32, layout: ChannelLayout) -> Result<usize> {
    (rows as usize)
        .checked_mul(cols as usize)
        .and_then(|n| n.checked_mul(layout.channels()))
        .ok_or(CodecError::InvalidDimensions(rows as i64, cols as i64))
}
