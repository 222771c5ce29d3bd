use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Truncated header: needed {needed} bytes at offset {offset}, {available} available")]
    TruncatedHeader {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Truncated payload: needed {needed} bytes at offset {offset}, {available} available")]
    TruncatedPayload {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Seek to offset {offset} is past the end of a {len}-byte source")]
    SeekOutOfRange { offset: usize, len: usize },

    #[error("Shape mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Tagged header declares {nspecs} specs, at least {required} are required")]
    MissingSpecs { nspecs: usize, required: usize },

    #[error("Color frame has {rows} rows, which is not divisible by three")]
    NotDivisibleByThree { rows: u32 },

    #[error("Unsupported variant: {0}")]
    UnsupportedVariant(String),

    #[error("Invalid length for {field}: {value}")]
    InvalidLength { field: &'static str, value: i64 },

    #[error("Invalid image dimensions: rows={0}, cols={1}")]
    InvalidDimensions(i64, i64),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
