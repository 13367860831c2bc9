//! CLI command implementations

pub mod ingredients;
pub mod matching;
pub mod pantry;
pub mod recipes;
