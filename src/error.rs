use thiserror::Error;

/// Result type returned by fallible engine routines.
pub type LifeResult<T> = Result<T, LifeError>;

/// Error raised by the engine, its patterns or its text formats.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LifeError {
    #[error("cell ({row}, {col}) is outside the {side}x{side} grid")]
    OutOfRange { row: isize, col: isize, side: u8 },
    #[error("grid side {side} is not within 1..={max}")]
    InvalidSize { side: usize, max: usize },
    #[error("iteration count must not be negative, got {0}")]
    InvalidIterations(i64),
    #[error("fill rate must be within [0, 1], got {0}")]
    InvalidFillRate(f64),
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}
