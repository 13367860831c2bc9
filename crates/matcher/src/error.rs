//! Error types for the matcher crate.
//!
//! Matching itself never fails; these errors come from building the optional
//! alias and substitute tables.

use thiserror::Error;

/// Result type alias for matcher table construction.
pub type Result<T> = std::result::Result<T, MatchError>;

/// Errors that can occur while building lookup tables.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// A name was blank after normalization
    #[error("Blank ingredient name in {0}")]
    BlankName(&'static str),

    /// One alias points at two different canonical names
    #[error("Alias '{alias}' maps to both '{first}' and '{second}'")]
    ConflictingAlias {
        /// The alias key
        alias: String,
        /// Canonical name registered first
        first: String,
        /// Canonical name that conflicts
        second: String,
    },

    /// An alias is itself the canonical name of another group
    #[error("Alias '{0}' is also a canonical ingredient name")]
    AliasChain(String),

    /// An ingredient was listed as its own substitute
    #[error("Ingredient '{0}' cannot substitute for itself")]
    SelfSubstitute(String),
}

/// Error code for integration with virtualcook-core error handling.
/// Range: 11xxx for matcher errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchErrorCode {
    /// Blank ingredient name
    BlankName = 11001,
    /// Conflicting alias
    ConflictingAlias = 11002,
    /// Alias chain
    AliasChain = 11003,
    /// Self substitute
    SelfSubstitute = 11004,
}

impl MatchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> MatchErrorCode {
        match self {
            MatchError::BlankName(_) => MatchErrorCode::BlankName,
            MatchError::ConflictingAlias { .. } => MatchErrorCode::ConflictingAlias,
            MatchError::AliasChain(_) => MatchErrorCode::AliasChain,
            MatchError::SelfSubstitute(_) => MatchErrorCode::SelfSubstitute,
        }
    }
}
