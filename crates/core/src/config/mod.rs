//! Configuration loading and schema definitions
//!
//! Settings live in `virtualcook.toml`; every section is optional.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
