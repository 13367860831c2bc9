//! Recipe records.
//!
//! Field names serialize in camelCase so catalog files line up with the web
//! client's recipe objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use virtualcook_core::validation::{ValidationResult, Validator};
use virtualcook_matcher::{Matchable, RecipeRequirement};

const MAX_TITLE_CHARS: usize = 120;

/// Moderation state of a recipe. Only approved recipes are recommended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeStatus {
    /// Submitted, awaiting review
    #[default]
    Pending,
    /// Visible to everyone
    Approved,
}

impl fmt::Display for RecipeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeStatus::Pending => write!(f, "pending"),
            RecipeStatus::Approved => write!(f, "approved"),
        }
    }
}

/// Per-serving nutrition facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
}

/// A recipe in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ingredients: Vec<RecipeRequirement>,
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<u32>,
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub video_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_likes: u64,
    #[serde(default)]
    pub status: RecipeStatus,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn is_approved(&self) -> bool {
        self.status == RecipeStatus::Approved
    }

    /// Preparation plus cooking minutes, when either is known.
    pub fn total_time(&self) -> Option<u32> {
        match (self.prep_time, self.cooking_time) {
            (None, None) => None,
            (prep, cook) => Some(prep.unwrap_or(0).saturating_add(cook.unwrap_or(0))),
        }
    }

    /// Whether the recipe is tagged with `restriction` (case-insensitive).
    pub fn has_dietary_restriction(&self, restriction: &str) -> bool {
        let wanted = restriction.trim();
        self.dietary_restrictions
            .iter()
            .any(|tag| tag.trim().eq_ignore_ascii_case(wanted))
    }

    /// Check a stored recipe against the submission rules.
    pub fn validate(&self) -> ValidationResult {
        check_fields(
            Validator::new().required("id", &self.id),
            &self.title,
            self.description.as_deref().unwrap_or(""),
            &self.ingredients,
            &self.instructions,
        )
        .warn_if(
            "ingredients",
            self.ingredients.iter().all(|i| i.key().is_none()),
            "No usable ingredient names; the recipe can never be recommended",
        )
        .validate()
    }
}

impl Matchable for Recipe {
    fn recipe_id(&self) -> &str {
        &self.id
    }

    fn requirements(&self) -> &[RecipeRequirement] {
        &self.ingredients
    }
}

/// A recipe as submitted by a user, before it has an id or a status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeRequirement>,
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Minutes; negative values are rejected
    #[serde(default)]
    pub cooking_time: Option<i64>,
    /// Minutes; negative values are rejected
    #[serde(default)]
    pub prep_time: Option<i64>,
    #[serde(default)]
    pub servings: Option<i64>,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub nutritional_info: Option<NutritionalInfo>,
}

impl NewRecipe {
    pub fn validate(&self) -> ValidationResult {
        let minutes = i64::from(u32::MAX);
        let mut validator = check_fields(
            Validator::new(),
            &self.title,
            &self.description,
            &self.ingredients,
            &self.instructions,
        );
        if let Some(time) = self.cooking_time {
            validator = validator.range("cookingTime", time, 0, minutes);
        }
        if let Some(time) = self.prep_time {
            validator = validator.range("prepTime", time, 0, minutes);
        }
        if let Some(servings) = self.servings {
            validator = validator.range("servings", servings, 1, minutes);
        }
        validator
            .warn_if("imageUrl", self.image_url.is_none(), "No image provided")
            .validate()
    }

    /// Build the catalog record. Call after [`NewRecipe::validate`].
    pub(crate) fn into_recipe(self, id: String, now: DateTime<Utc>) -> Recipe {
        let minutes = |value: Option<i64>| value.and_then(|v| u32::try_from(v).ok());
        Recipe {
            id,
            title: self.title.trim().to_string(),
            description: Some(self.description.trim().to_string()),
            ingredients: self.ingredients,
            instructions: self
                .instructions
                .into_iter()
                .map(|step| step.trim().to_string())
                .filter(|step| !step.is_empty())
                .collect(),
            cooking_time: minutes(self.cooking_time),
            prep_time: minutes(self.prep_time),
            servings: minutes(self.servings),
            author_id: self.author_id,
            video_ids: Vec::new(),
            image_url: self.image_url,
            cuisine: self.cuisine.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            dietary_restrictions: self.dietary_restrictions,
            nutritional_info: self.nutritional_info,
            average_rating: 0.0,
            total_likes: 0,
            status: RecipeStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

fn check_fields(
    validator: Validator,
    title: &str,
    description: &str,
    ingredients: &[RecipeRequirement],
    instructions: &[String],
) -> Validator {
    let incomplete = ingredients
        .iter()
        .position(|i| i.name.trim().is_empty() || i.quantity.trim().is_empty());

    validator
        .required("title", title)
        .max_length("title", title.trim(), MAX_TITLE_CHARS)
        .required("description", description)
        .non_empty("ingredients", ingredients.len())
        .custom("ingredients", || {
            incomplete.map(|idx| format!("Ingredient {} needs a name and a quantity", idx + 1))
        })
        .non_empty(
            "instructions",
            instructions.iter().filter(|step| !step.trim().is_empty()).count(),
        )
}
