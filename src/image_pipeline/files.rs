//! File entry points.
//!
//! Each call opens its file, reads or writes it completely and closes it
//! before returning, on success and on error alike.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, instrument};

use crate::image_pipeline::common::error::{CodecError, Result};
use crate::image_pipeline::common::reader::ImageDecoder;
use crate::image_pipeline::common::types::{HobjImage, OmaImage};
use crate::image_pipeline::hobj::HobjDecoder;
use crate::image_pipeline::oma::{ConversionConfig, OmaDecoder, OmaFrame, OmaWriter, StandardOmaWriter};

pub const OMA_EXTENSION: &str = "o2d";

/// Appends `.o2d` unless the path already ends with it.
pub fn oma_output_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some_and(|ext| ext == OMA_EXTENSION) {
        return path.to_path_buf();
    }
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(OMA_EXTENSION);
    PathBuf::from(name)
}

pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| CodecError::InputReadError(format!("{}: {}", path.display(), e)))
}

#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_hobj(path: impl AsRef<Path>) -> Result<HobjImage> {
    let path = path.as_ref();
    info!("Reading HOBJ file");
    let start = Instant::now();

    let data = read_input(path)?;
    let image = HobjDecoder.decode(&data)?;

    let elapsed = start.elapsed();
    info!(
        rows = image.rows(),
        cols = image.cols(),
        ms = elapsed.as_secs_f64() * 1000.0,
        "HOBJ file decoded"
    );
    Ok(image)
}

#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_oma_frame(path: impl AsRef<Path>) -> Result<OmaFrame> {
    let path = path.as_ref();
    info!("Reading OMA2 file");
    let start = Instant::now();

    let data = read_input(path)?;
    let frame = OmaDecoder.decode_frame(&data)?;

    let elapsed = start.elapsed();
    info!(
        variant = ?frame.header.variant(),
        rows = frame.image.rows(),
        cols = frame.image.cols(),
        is_color = frame.image.is_color(),
        ms = elapsed.as_secs_f64() * 1000.0,
        "OMA2 file decoded"
    );
    Ok(frame)
}

pub fn read_oma(path: impl AsRef<Path>) -> Result<OmaImage> {
    Ok(read_oma_frame(path)?.image)
}

/// Writes `image` as OMA2 and returns the path actually written.
#[instrument(skip_all, fields(path = %path.as_ref().display(), variant = ?config.variant))]
pub fn write_oma(path: impl AsRef<Path>, image: &OmaImage, config: &ConversionConfig) -> Result<PathBuf> {
    let path = if config.append_extension {
        oma_output_path(path)
    } else {
        path.as_ref().to_path_buf()
    };
    info!(output = %path.display(), "Writing OMA2 file");
    let start = Instant::now();

    // encode fully before touching the destination
    let mut buffer = Vec::new();
    StandardOmaWriter.write_oma(image, &mut buffer, config)?;
    write_output(&path, &buffer)?;

    let elapsed = start.elapsed();
    info!(ms = elapsed.as_secs_f64() * 1000.0, "OMA2 file written");
    Ok(path)
}

/// Creates `path` and writes the finished stream to it in one call.
pub(crate) fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)
        .map_err(|e| CodecError::OutputWriteError(format!("{}: {}", path.display(), e)))
}
