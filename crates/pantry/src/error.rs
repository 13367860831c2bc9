//! Error types for the pantry crate.

use thiserror::Error;
use virtualcook_core::{Error as CoreError, ErrorCode};

/// Result type alias for pantry operations.
pub type Result<T> = std::result::Result<T, PantryError>;

/// Errors that can occur while editing or storing a pantry.
#[derive(Debug, Error)]
pub enum PantryError {
    /// Quantity is negative or not a number
    #[error("Invalid quantity {quantity} for '{ingredient}'")]
    InvalidQuantity {
        /// Ingredient being edited
        ingredient: String,
        /// Rejected quantity
        quantity: f64,
    },

    /// Ingredient name is blank
    #[error("Invalid ingredient name: '{0}'")]
    InvalidIngredient(String),

    /// User id is blank or contains unsupported characters
    #[error("Invalid user id: '{0}'")]
    InvalidUser(String),

    /// Ingredient is not in the pantry
    #[error("Ingredient not in pantry: {0}")]
    NotFound(String),

    /// Store file could not be read or written
    #[error("Pantry store IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Store file is not valid JSON
    #[error("Pantry store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PantryError {
    /// Returns the application error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PantryError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            PantryError::InvalidIngredient(_) => ErrorCode::InvalidIngredient,
            PantryError::InvalidUser(_) => ErrorCode::InvalidInput,
            PantryError::NotFound(_) => ErrorCode::PantryItemNotFound,
            PantryError::Io(_) => ErrorCode::IoError,
            PantryError::Json(_) => ErrorCode::InvalidFormat,
        }
    }
}

impl From<PantryError> for CoreError {
    fn from(err: PantryError) -> Self {
        let code = err.code();
        let error = CoreError::pantry(code, err.to_string());
        let error = match code {
            ErrorCode::PantryItemNotFound => {
                error.with_suggestion("Run `virtual-cook pantry list` to see what is stored")
            }
            ErrorCode::InvalidQuantity => error.with_suggestion("Quantities must be zero or more"),
            _ => error,
        };
        error.with_source(err)
    }
}
