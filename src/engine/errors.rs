// ============================================================================
// Economy Errors
// Recoverable business conditions reported by economy actions
// ============================================================================

use crate::numeric::Currency;
use std::fmt;

/// Reasons an economy action was refused. State is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    /// Balance is below the batch price
    InsufficientFunds {
        required: Currency,
        available: Currency,
    },
    /// No catalog item has this name
    UnknownItem(String),
}

impl fmt::Display for EconomyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EconomyError::InsufficientFunds {
                required,
                available,
            } => write!(
                f,
                "insufficient funds: need {} but have {}",
                required.to_display_string(),
                available.to_display_string()
            ),
            EconomyError::UnknownItem(name) => write!(f, "unknown item: {}", name),
        }
    }
}

impl std::error::Error for EconomyError {}

/// Result type alias for economy actions
pub type EconomyResult<T> = Result<T, EconomyError>;
