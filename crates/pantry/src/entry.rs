//! Pantry entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use virtualcook_matcher::normalize;

/// One ingredient a user has on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryEntry {
    /// Entry id
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// Ingredient name as the user entered it
    pub ingredient: String,
    /// Amount on hand, never negative
    pub quantity: f64,
    /// Unit for the quantity ("g", "cups", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// When the ingredient goes off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl PantryEntry {
    /// Normalized ingredient key.
    pub fn key(&self) -> Option<String> {
        normalize(&self.ingredient)
    }

    /// Whether the entry has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Whether the entry counts as available: some quantity left and, unless
    /// `include_expired`, not expired.
    pub fn is_on_hand(&self, now: DateTime<Utc>, include_expired: bool) -> bool {
        self.quantity > 0.0 && (include_expired || !self.is_expired(now))
    }
}

/// Input for [`crate::Pantry::add`].
#[derive(Debug, Clone, PartialEq)]
pub struct PantryItem {
    /// Ingredient name
    pub ingredient: String,
    /// Amount being added
    pub quantity: f64,
    /// Optional unit
    pub unit: Option<String>,
    /// Optional expiration
    pub expires_at: Option<DateTime<Utc>>,
}

impl PantryItem {
    /// An item with a quantity and nothing else.
    pub fn new(ingredient: impl Into<String>, quantity: f64) -> Self {
        Self {
            ingredient: ingredient.into(),
            quantity,
            unit: None,
            expires_at: None,
        }
    }

    /// Set the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        let unit = unit.into();
        let trimmed = unit.trim();
        self.unit = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Set the expiration time.
    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expires_at = Some(at);
        self
    }
}
