use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::image_pipeline::{
    common::error::{CodecError, Result},
    common::reader::ImageDecoder,
    common::timing::PipelineTimings,
    files::{oma_output_path, read_input, write_output},
    hobj::HobjDecoder,
    oma::{ConversionConfig, OmaWriter, StandardOmaWriter},
};

/// Re-encodes raw HOBJ frames as OMA2 files, widening samples to `f32`.
pub struct HobjToOmaPipeline<R: ImageDecoder<Sample = i16>, W: OmaWriter> {
    reader: R,
    writer: W,
    config: ConversionConfig,
}

impl HobjToOmaPipeline<HobjDecoder, StandardOmaWriter> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: HobjDecoder,
            writer: StandardOmaWriter,
            config,
        }
    }
}

impl<R: ImageDecoder<Sample = i16>, W: OmaWriter> HobjToOmaPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, rows: u32, cols: u32) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if let Some(max) = self.config.max_dimension {
            if rows > max || cols > max {
                warn!("Image dimensions {}x{} exceed maximum {}", rows, cols, max);
                return Err(CodecError::InvalidDimensions(rows as i64, cols as i64));
            }
        }

        Ok(())
    }

    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        self.convert_with_timings(input_data, output).map(|_| ())
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert_with_timings(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<PipelineTimings> {
        let mut timings = PipelineTimings::new();
        info!("Starting HOBJ to OMA2 conversion");

        let raw_image = timings.record("decode_hobj", || self.reader.decode(input_data))?;
        let (rows, cols) = (raw_image.rows(), raw_image.cols());

        timings.record("validate_dimensions", || self.validate_dimensions(rows, cols))?;

        let image = timings.record("widen_samples", || raw_image.map(f32::from));

        timings.record("encode_oma", || {
            self.writer.write_oma(&image, output, &self.config)
        })?;

        info!(
            rows,
            cols,
            variant = ?self.config.variant,
            ms = timings.total_duration().as_secs_f64() * 1000.0,
            "Conversion complete"
        );
        Ok(timings)
    }

    /// Converts one file; returns the output path after `.o2d` routing.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<PathBuf> {
        let input_path = input_path.as_ref();
        let output_path = if self.config.append_extension {
            oma_output_path(output_path)
        } else {
            output_path.as_ref().to_path_buf()
        };

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            read_input(input_path)?
        };

        let mut buffer = Vec::new();
        let timings = self.convert_with_timings(&input_data, &mut buffer)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            write_output(&output_path, &buffer)?;
        }
        timings.log_summary();

        Ok(output_path)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}
