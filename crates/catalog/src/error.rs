//! Error types for the catalog crate.

use thiserror::Error;
use virtualcook_core::{Error as CoreError, ErrorCode};

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading or editing the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No recipe with this id
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// Two recipes share an id
    #[error("Duplicate recipe id: {0}")]
    Duplicate(String),

    /// Submitted recipe failed validation
    #[error("Invalid recipe: {0}")]
    Invalid(String),

    /// Catalog file could not be read or written
    #[error("Catalog IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid JSON
    #[error("Catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Returns the application error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::NotFound(_) => ErrorCode::RecipeNotFound,
            CatalogError::Duplicate(_) => ErrorCode::DuplicateRecipe,
            CatalogError::Invalid(_) => ErrorCode::ValidationError,
            CatalogError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                ErrorCode::FileNotFound
            }
            CatalogError::Io(_) => ErrorCode::IoError,
            CatalogError::Json(_) => ErrorCode::InvalidFormat,
        }
    }
}

impl From<CatalogError> for CoreError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(ref id) => CoreError::recipe_not_found(id).with_source(err),
            _ => {
                let code = err.code();
                let error = CoreError::catalog(code, err.to_string());
                let error = match code {
                    ErrorCode::FileNotFound => error
                        .with_suggestion("Pass --catalog or set [catalog] path in virtualcook.toml"),
                    ErrorCode::InvalidFormat => {
                        error.with_suggestion("The catalog must be a JSON array of recipes")
                    }
                    _ => error,
                };
                error.with_source(err)
            }
        }
    }
}
