//! Core utilities for Virtual Cook
//!
//! This crate provides shared functionality used by the pantry, catalog and
//! command-line crates:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults and validation
//! - **Validation**: Fluent validation for user-submitted data
//!
//! # Example
//!
//! ```rust,no_run
//! use virtualcook_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("Catalog: {}", config.schema.catalog.path);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{ValidationResult, Validator};
}
