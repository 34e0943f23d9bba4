// ============================================================================
// Storage Module
// Reference Persistence implementations
// ============================================================================

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt;

/// Errors surfaced by the fallible store methods.
///
/// The `Persistence` trait methods log these and carry on.
#[derive(Debug)]
pub enum StorageError {
    /// Reading or writing the backing medium failed
    Io(std::io::Error),
    /// Stored bytes are not a valid saved state
    Decode(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O failed: {}", e),
            StorageError::Decode(e) => write!(f, "saved state is malformed: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Decode(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Decode(e)
    }
}
