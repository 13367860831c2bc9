//! A single user's pantry.
//!
//! Holds at most one entry per normalized ingredient. Adding an ingredient
//! that is already stored updates the existing entry instead of creating a
//! second one.

use crate::entry::{PantryEntry, PantryItem};
use crate::error::{PantryError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use virtualcook_core::validation::Validator;
use virtualcook_matcher::{normalize, IngredientSet};

/// User ids: letters, digits and `_ . @ -`.
const USER_ID_PATTERN: &str = r"^[A-Za-z0-9_.@-]+$";

/// Ingredients on hand for one user, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pantry {
    user_id: String,
    #[serde(default)]
    entries: Vec<PantryEntry>,
}

impl Pantry {
    /// Create an empty pantry.
    pub fn new(user_id: &str) -> Result<Self> {
        validate_user_id(user_id)?;
        Ok(Self {
            user_id: user_id.to_string(),
            entries: Vec::new(),
        })
    }

    /// Owning user.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Add an ingredient, or update the existing entry for it.
    ///
    /// An existing entry takes the new quantity; unit and expiry are only
    /// replaced when the item supplies them.
    pub fn add(&mut self, item: PantryItem) -> Result<&PantryEntry> {
        let key = validate_ingredient(&item.ingredient)?;
        validate_quantity(&item.ingredient, item.quantity)?;
        let now = Utc::now();

        if let Some(idx) = self.position(&key) {
            let entry = &mut self.entries[idx];
            entry.quantity = item.quantity;
            if item.unit.is_some() {
                entry.unit = item.unit;
            }
            if item.expires_at.is_some() {
                entry.expires_at = item.expires_at;
            }
            entry.updated_at = now;
            tracing::debug!(user = %self.user_id, ingredient = %key, "Pantry entry updated");
            return Ok(&self.entries[idx]);
        }

        self.entries.push(PantryEntry {
            id: Uuid::new_v4(),
            user_id: self.user_id.clone(),
            ingredient: item.ingredient.trim().to_string(),
            quantity: item.quantity,
            unit: item.unit,
            expires_at: item.expires_at,
            updated_at: now,
        });
        tracing::debug!(user = %self.user_id, ingredient = %key, "Pantry entry added");
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Set the quantity of an existing ingredient.
    pub fn update_quantity(&mut self, ingredient: &str, quantity: f64) -> Result<&PantryEntry> {
        let key = validate_ingredient(ingredient)?;
        validate_quantity(ingredient, quantity)?;
        let idx = self
            .position(&key)
            .ok_or_else(|| PantryError::NotFound(ingredient.trim().to_string()))?;

        let entry = &mut self.entries[idx];
        entry.quantity = quantity;
        entry.updated_at = Utc::now();
        Ok(&self.entries[idx])
    }

    /// Remove an ingredient, returning its entry.
    pub fn remove(&mut self, ingredient: &str) -> Result<PantryEntry> {
        let key = validate_ingredient(ingredient)?;
        let idx = self
            .position(&key)
            .ok_or_else(|| PantryError::NotFound(ingredient.trim().to_string()))?;
        Ok(self.entries.remove(idx))
    }

    /// Look up an ingredient by any spelling.
    pub fn get(&self, ingredient: &str) -> Option<&PantryEntry> {
        let key = normalize(ingredient)?;
        self.position(&key).map(|idx| &self.entries[idx])
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[PantryEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pantry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of ingredients available for matching at `now`.
    pub fn on_hand(&self, now: DateTime<Utc>, include_expired: bool) -> IngredientSet {
        self.entries
            .iter()
            .filter(|entry| entry.is_on_hand(now, include_expired))
            .map(|entry| entry.ingredient.as_str())
            .collect()
    }

    /// Entries expiring between `now` and `now + window`, soonest first.
    pub fn expiring_within(&self, now: DateTime<Utc>, window: Duration) -> Vec<&PantryEntry> {
        let until = now + window;
        let mut expiring: Vec<&PantryEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.expires_at.is_some_and(|at| at >= now && at <= until))
            .collect();
        expiring.sort_by_key(|entry| entry.expires_at);
        expiring
    }

    /// Entries already expired at `now`.
    pub fn expired(&self, now: DateTime<Utc>) -> Vec<&PantryEntry> {
        self.entries.iter().filter(|entry| entry.is_expired(now)).collect()
    }

    /// Re-check invariants after deserialization.
    ///
    /// Rejects blank names, negative quantities and duplicate ingredients.
    pub fn validate(&self) -> Result<()> {
        validate_user_id(&self.user_id)?;
        let mut seen = std::collections::HashSet::new();
        for entry in &self.entries {
            let key = validate_ingredient(&entry.ingredient)?;
            validate_quantity(&entry.ingredient, entry.quantity)?;
            if !seen.insert(key) {
                return Err(PantryError::InvalidIngredient(format!(
                    "{} (duplicate entry)",
                    entry.ingredient
                )));
            }
        }
        Ok(())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.key().as_deref() == Some(key))
    }
}

fn validate_user_id(user_id: &str) -> Result<()> {
    let result = Validator::new()
        .required("user_id", user_id)
        .pattern("user_id", user_id, USER_ID_PATTERN, "letters, digits or _ . @ -")
        .validate();
    if result.is_valid() {
        Ok(())
    } else {
        Err(PantryError::InvalidUser(user_id.to_string()))
    }
}

fn validate_ingredient(name: &str) -> Result<String> {
    normalize(name).ok_or_else(|| PantryError::InvalidIngredient(name.to_string()))
}

fn validate_quantity(ingredient: &str, quantity: f64) -> Result<()> {
    if Validator::new()
        .non_negative("quantity", quantity)
        .validate()
        .is_valid()
    {
        Ok(())
    } else {
        Err(PantryError::InvalidQuantity {
            ingredient: ingredient.trim().to_string(),
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pantry() -> Pantry {
        Pantry::new("alice").unwrap()
    }

    #[test]
    fn test_add_new_entry() {
        let mut p = pantry();
        let entry = p.add(PantryItem::new("  Flour ", 500.0).with_unit("g")).unwrap();
        assert_eq!(entry.ingredient, "Flour");
        assert_eq!(entry.user_id, "alice");
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_add_existing_updates_quantity() {
        let mut p = pantry();
        p.add(PantryItem::new("Egg", 6.0)).unwrap();
        let entry = p.add(PantryItem::new("egg", 4.0)).unwrap();
        assert_eq!(entry.quantity, 4.0);
        assert_eq!(entry.ingredient, "Egg");
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_add_keeps_unit_and_expiry_unless_supplied() {
        let now = Utc::now();
        let mut p = pantry();
        p.add(
            PantryItem::new("milk", 1.0)
                .with_unit("l")
                .expires_at(now + Duration::days(2)),
        )
        .unwrap();

        let entry = p.add(PantryItem::new("Milk", 2.0)).unwrap();
        assert_eq!(entry.unit.as_deref(), Some("l"));
        assert_eq!(entry.expires_at, Some(now + Duration::days(2)));

        let entry = p
            .add(
                PantryItem::new("milk", 500.0)
                    .with_unit("ml")
                    .expires_at(now + Duration::days(5)),
            )
            .unwrap();
        assert_eq!(entry.unit.as_deref(), Some("ml"));
        assert_eq!(entry.expires_at, Some(now + Duration::days(5)));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let mut p = pantry();
        assert!(matches!(
            p.add(PantryItem::new("salt", -1.0)),
            Err(PantryError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            p.add(PantryItem::new("salt", f64::INFINITY)),
            Err(PantryError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn test_blank_ingredient_rejected() {
        let mut p = pantry();
        assert!(matches!(
            p.add(PantryItem::new("   ", 1.0)),
            Err(PantryError::InvalidIngredient(_))
        ));
    }

    #[test]
    fn test_invalid_user_rejected() {
        assert!(matches!(Pantry::new(""), Err(PantryError::InvalidUser(_))));
        assert!(matches!(Pantry::new("a b"), Err(PantryError::InvalidUser(_))));
        assert!(Pantry::new("chef.anna@example").is_ok());
    }

    #[test]
    fn test_update_and_remove() {
        let mut p = pantry();
        p.add(PantryItem::new("Butter", 200.0)).unwrap();
        assert_eq!(p.update_quantity("BUTTER", 50.0).unwrap().quantity, 50.0);

        let removed = p.remove("butter").unwrap();
        assert_eq!(removed.ingredient, "Butter");
        assert!(p.is_empty());
        assert!(matches!(p.remove("butter"), Err(PantryError::NotFound(_))));
        assert!(matches!(p.update_quantity("butter", 1.0), Err(PantryError::NotFound(_))));
    }

    #[test]
    fn test_get_any_spelling() {
        let mut p = pantry();
        p.add(PantryItem::new("Olive Oil", 1.0)).unwrap();
        assert!(p.get("olive  oil").is_some());
        assert!(p.get("  ").is_none());
    }

    #[test]
    fn test_on_hand_skips_empty_and_expired() {
        let now = Utc::now();
        let mut p = pantry();
        p.add(PantryItem::new("Egg", 2.0)).unwrap();
        p.add(PantryItem::new("Sugar", 0.0)).unwrap();
        p.add(PantryItem::new("Cream", 1.0).expires_at(now - Duration::days(1))).unwrap();

        let set = p.on_hand(now, false);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["egg"]);

        let with_expired = p.on_hand(now, true);
        assert!(with_expired.contains("cream"));
        assert!(!with_expired.contains("sugar"));
    }

    #[test]
    fn test_expiring_within_sorted() {
        let now = Utc::now();
        let mut p = pantry();
        p.add(PantryItem::new("spinach", 1.0).expires_at(now + Duration::days(2))).unwrap();
        p.add(PantryItem::new("milk", 1.0).expires_at(now + Duration::hours(5))).unwrap();
        p.add(PantryItem::new("rice", 1.0).expires_at(now + Duration::days(90))).unwrap();
        p.add(PantryItem::new("cream", 1.0).expires_at(now - Duration::days(1))).unwrap();

        let names: Vec<_> = p
            .expiring_within(now, Duration::days(3))
            .into_iter()
            .map(|e| e.ingredient.as_str())
            .collect();
        assert_eq!(names, vec!["milk", "spinach"]);
        assert_eq!(p.expired(now).len(), 1);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut p = pantry();
        p.add(PantryItem::new("egg", 1.0)).unwrap();
        let mut copy = p.entries[0].clone();
        copy.ingredient = "EGG".to_string();
        p.entries.push(copy);
        assert!(matches!(p.validate(), Err(PantryError::InvalidIngredient(_))));
    }
}
