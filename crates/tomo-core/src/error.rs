use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Height or width is zero.
    Shape { width: usize, height: usize },
    /// Nested rows of unequal length; the input is not a 2-D grid.
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
    SizeMismatch { expected: usize, actual: usize },
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    InvalidStride,
}

impl Error {
    /// True for the errors raised by inputs that are not a non-empty 2-D grid.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::Shape { .. } | Self::RaggedRows { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape { width, height } => {
                write!(f, "shape error: image must be non-empty, got {width}x{height}")
            }
            Self::RaggedRows {
                row,
                expected,
                actual,
            } => write!(
                f,
                "shape error: row {row} has {actual} samples, expected {expected}"
            ),
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::InvalidStride => write!(f, "invalid stride"),
        }
    }
}

impl std::error::Error for Error {}
