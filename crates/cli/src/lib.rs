//! Terminal helpers for the Virtual Cook command line
//!
//! - Status messages and headers
//! - Formatting for minutes, percentages and counts
//! - The shared `--format` switch

#![warn(missing_docs)]

pub mod output;

pub use output::OutputFormat;
