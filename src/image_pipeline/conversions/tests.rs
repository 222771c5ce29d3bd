#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};
    use std::sync::{Arc, Mutex};

    use crate::image_pipeline::common::error::{CodecError, Result};
    use crate::image_pipeline::common::reader::ImageDecoder;
    use crate::image_pipeline::common::types::{HobjImage, OmaImage};
    use crate::image_pipeline::conversions::HobjToOmaPipeline;
    use crate::image_pipeline::oma::{ConversionConfig, OmaDecoder, OmaVariant, OmaWriter};

    struct MockReader {
        should_fail: bool,
        mock_data: Option<HobjImage>,
    }

    impl ImageDecoder for MockReader {
        type Sample = i16;

        fn decode(&self, _data: &[u8]) -> Result<HobjImage> {
            if self.should_fail {
                return Err(CodecError::TruncatedHeader {
                    offset: 0,
                    needed: 84,
                    available: 0,
                });
            }
            match &self.mock_data {
                Some(image) => Ok(image.clone()),
                None => HobjImage::mono(4, 4, vec![0i16; 16]),
            }
        }
    }

    struct MockWriter {
        should_fail: bool,
        written_data: Arc<Mutex<Vec<OmaImage>>>,
    }

    impl OmaWriter for MockWriter {
        fn write_oma(&self, image: &OmaImage, _output: &mut dyn Write, _config: &ConversionConfig) -> Result<()> {
            if self.should_fail {
                return Err(CodecError::UnsupportedVariant("mock encode error".to_string()));
            }
            self.written_data.lock().unwrap().push(image.clone());
            Ok(())
        }
    }

    fn hobj_bytes(rows: i16, cols: i16, pixels: &[i16]) -> Vec<u8> {
        let mut data = vec![0u8; 84];
        data[72..76].copy_from_slice(&(pixels.len() as i32).to_be_bytes());
        data[80..82].copy_from_slice(&(rows - 1).to_be_bytes());
        data[82..84].copy_from_slice(&(cols - 1).to_be_bytes());
        data.extend(vec![0u8; rows as usize * 6 + 17]);
        for p in pixels {
            data.extend_from_slice(&p.to_le_bytes());
        }
        data
    }

    #[test]
    fn test_config_builder() {
        let config = ConversionConfig::builder()
            .variant(OmaVariant::Legacy)
            .validate_dimensions(false)
            .max_dimension(Some(10000))
            .append_extension(false)
            .build();

        assert_eq!(config.variant, OmaVariant::Legacy);
        assert!(!config.validate_dimensions);
        assert_eq!(config.max_dimension, Some(10000));
        assert!(!config.append_extension);

        let default = ConversionConfig::builder().build();
        assert_eq!(default.variant, OmaVariant::Tagged);
        assert!(default.validate_dimensions);
        assert!(default.append_extension);
    }

    #[test]
    fn test_successful_conversion() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let reader = MockReader {
            should_fail: false,
            mock_data: Some(HobjImage::mono(1, 2, vec![-5, 4095]).unwrap()),
        };
        let writer = MockWriter { should_fail: false, written_data: written.clone() };

        let pipeline = HobjToOmaPipeline::with_custom(reader, writer, ConversionConfig::default());

        let mut output = Cursor::new(Vec::new());
        let timings = pipeline.convert_with_timings(b"fake hobj data", &mut output).unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].samples(), &[-5.0, 4095.0]);
        let steps: Vec<_> = timings.steps().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            steps,
            vec!["decode_hobj", "validate_dimensions", "widen_samples", "encode_oma"]
        );
    }

    #[test]
    fn test_reader_failure() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let reader = MockReader { should_fail: true, mock_data: None };
        let writer = MockWriter { should_fail: false, written_data: written.clone() };

        let pipeline = HobjToOmaPipeline::with_custom(reader, writer, ConversionConfig::default());

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.convert(b"fake hobj data", &mut output);

        assert!(matches!(result, Err(CodecError::TruncatedHeader { .. })));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_writer_failure() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let reader = MockReader { should_fail: false, mock_data: None };
        let writer = MockWriter { should_fail: true, written_data: written };

        let pipeline = HobjToOmaPipeline::with_custom(reader, writer, ConversionConfig::default());

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.convert(b"fake hobj data", &mut output);

        assert!(matches!(result, Err(CodecError::UnsupportedVariant(_))));
    }

    #[test]
    fn test_dimension_validation_failure() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let reader = MockReader { should_fail: false, mock_data: None };
        let writer = MockWriter { should_fail: false, written_data: written.clone() };

        let config = ConversionConfig::builder()
            .validate_dimensions(true)
            .max_dimension(Some(3))
            .build();

        let pipeline = HobjToOmaPipeline::with_custom(reader, writer, config);

        let mut output = Cursor::new(Vec::new());
        let result = pipeline.convert(b"fake hobj data", &mut output);

        assert!(matches!(result, Err(CodecError::InvalidDimensions(4, 4))));
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_dimension_validation_disabled() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let reader = MockReader { should_fail: false, mock_data: None };
        let writer = MockWriter { should_fail: false, written_data: written.clone() };

        let config = ConversionConfig::builder()
            .validate_dimensions(false)
            .max_dimension(Some(3))
            .build();

        let pipeline = HobjToOmaPipeline::with_custom(reader, writer, config);

        let mut output = Cursor::new(Vec::new());
        assert!(pipeline.convert(b"fake hobj data", &mut output).is_ok());
        assert_eq!(written.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_end_to_end_bytes() {
        let pipeline = HobjToOmaPipeline::new(ConversionConfig::default());
        let input = hobj_bytes(2, 2, &[1, -2, 3, -4]);

        let mut output = Vec::new();
        pipeline.convert(&input, &mut output).unwrap();

        let image = OmaDecoder.decode(&output).unwrap();
        assert_eq!(image.shape(), vec![2, 2]);
        assert_eq!(image.samples(), &[1.0, -2.0, 3.0, -4.0]);
    }

    #[test]
    fn test_convert_file_routes_extension() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("frame.hobj");
        std::fs::write(&input, hobj_bytes(1, 3, &[7, 8, 9])).unwrap();

        let pipeline = HobjToOmaPipeline::new(ConversionConfig::default());
        let written = pipeline.convert_file(&input, dir.path().join("frame")).unwrap();

        assert_eq!(written, dir.path().join("frame.o2d"));
        let data = std::fs::read(&written).unwrap();
        let image = OmaDecoder.decode(&data).unwrap();
        assert_eq!(image.samples(), &[7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_convert_file_truncated_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("short.hobj");
        std::fs::write(&input, [0u8; 10]).unwrap();

        let pipeline = HobjToOmaPipeline::new(ConversionConfig::default());
        let result = pipeline.convert_file(&input, dir.path().join("short"));

        assert!(matches!(
            result,
            Err(CodecError::TruncatedHeader { offset: 0, needed: 84, available: 10 })
        ));
        assert!(!dir.path().join("short.o2d").exists());
    }
}
