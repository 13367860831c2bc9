//! Per-user pantries for Virtual Cook.
//!
//! A [`Pantry`] keeps one entry per ingredient with quantity, unit and
//! expiry. [`Pantry::on_hand`] turns it into the [`IngredientSet`] the
//! matcher consumes; [`PantryStore`] persists every user's pantry in one
//! JSON file.
//!
//! ```rust
//! use chrono::Utc;
//! use virtualcook_pantry::{Pantry, PantryItem};
//!
//! let mut pantry = Pantry::new("alice").unwrap();
//! pantry.add(PantryItem::new("Eggs", 6.0)).unwrap();
//! assert!(pantry.on_hand(Utc::now(), false).contains("eggs"));
//! ```
//!
//! [`IngredientSet`]: virtualcook_matcher::IngredientSet

#![warn(missing_docs)]

mod entry;
mod error;
mod pantry;
mod store;

pub use entry::{PantryEntry, PantryItem};
pub use error::{PantryError, Result};
pub use pantry::Pantry;
pub use store::PantryStore;
