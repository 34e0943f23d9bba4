// ============================================================================
// Numeric Errors
// Error types for fixed-point arithmetic operations
// ============================================================================

use std::fmt;

/// Errors that can occur during fixed-point arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Input string or value could not be parsed
    InvalidInput,
    /// Attempted division by zero
    DivisionByZero,
    /// A raw value was supplied at a different scale than the target type
    ScaleMismatch { expected: u32, found: u32 },
    /// Value does not fit the target representation (interop only)
    Overflow,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::ScaleMismatch { expected, found } => write!(
                f,
                "scale mismatch: expected {} fractional digits, found {}",
                expected, found
            ),
            NumericError::Overflow => {
                write!(f, "overflow: value does not fit the target representation")
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
