//! OMA2 writing configuration types

/// On-disk OMA2 layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OmaVariant {
    /// Self-describing layout starting with "OMA2 Binary Data" (default)
    #[default]
    Tagged,
    /// Positional layout read by older OMA tools; cannot mark color
    Legacy,
}

/// Configuration for writing OMA2 files and for HOBJ to OMA2 conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Layout to write
    pub variant: OmaVariant,
    /// Whether to validate image dimensions before encoding
    pub validate_dimensions: bool,
    /// Largest accepted row or column count when validating
    pub max_dimension: Option<u32>,
    /// Whether to append ".o2d" to output paths that lack it
    pub append_extension: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            variant: OmaVariant::Tagged,
            validate_dimensions: true,
            max_dimension: None,
            append_extension: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    variant: Option<OmaVariant>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
    append_extension: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn variant(mut self, variant: OmaVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn append_extension(mut self, append: bool) -> Self {
        self.append_extension = Some(append);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            variant: self.variant.unwrap_or(default.variant),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            append_extension: self.append_extension.unwrap_or(default.append_extension),
        }
    }
}
