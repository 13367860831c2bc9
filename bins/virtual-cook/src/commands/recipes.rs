//! Recipe commands - list, show, submit, approve and validate

use crate::context::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;
use virtualcook_catalog::{NewRecipe, Recipe, RecipeCatalog, RecipeFilters};
use virtualcook_cli::output::{format_count, format_minutes, Status};
use virtualcook_core::validation::ValidationError;
use virtualcook_core::{Error, ErrorCode};

pub fn list(
    ctx: &Context,
    search: Option<String>,
    cuisine: Option<String>,
    diets: Vec<String>,
    max_time: Option<u32>,
    ingredients: Vec<String>,
) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let filters = RecipeFilters {
        search,
        cuisine,
        dietary_restrictions: diets,
        max_cooking_time: max_time,
        ingredients,
    };
    let recipes = catalog.filter(&filters);

    if ctx.is_json() {
        return ctx.print_json(&recipes);
    }

    if recipes.is_empty() {
        Status::info("No approved recipe matches those filters");
        return Ok(());
    }

    Status::header(&format_count(recipes.len(), "recipe", "recipes"));
    for recipe in recipes {
        let mut details = Vec::new();
        if let Some(cuisine) = &recipe.cuisine {
            details.push(cuisine.clone());
        }
        if let Some(minutes) = recipe.total_time() {
            details.push(format_minutes(minutes));
        }
        details.extend(recipe.dietary_restrictions.iter().cloned());
        println!(
            "  {}  {}  {}",
            recipe.title.bold(),
            details.join(" · ").dimmed(),
            recipe.id.dimmed()
        );
    }
    Ok(())
}

pub fn show(ctx: &Context, id: &str) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let recipe = catalog.get(id).ok_or_else(|| Error::recipe_not_found(id))?;

    if ctx.is_json() {
        return ctx.print_json(recipe);
    }

    Status::header(&recipe.title);
    if let Some(description) = &recipe.description {
        println!("{}", description);
    }
    println!();
    println!("  {} {}", "id:".dimmed(), recipe.id);
    println!("  {} {}", "status:".dimmed(), recipe.status);
    if let Some(cuisine) = &recipe.cuisine {
        println!("  {} {}", "cuisine:".dimmed(), cuisine);
    }
    if let Some(minutes) = recipe.prep_time {
        println!("  {} {}", "prep:".dimmed(), format_minutes(minutes));
    }
    if let Some(minutes) = recipe.cooking_time {
        println!("  {} {}", "cook:".dimmed(), format_minutes(minutes));
    }
    if let Some(servings) = recipe.servings {
        println!("  {} {}", "serves:".dimmed(), servings);
    }
    if !recipe.dietary_restrictions.is_empty() {
        println!("  {} {}", "diet:".dimmed(), recipe.dietary_restrictions.join(", "));
    }

    Status::subheader("Ingredients");
    for ingredient in &recipe.ingredients {
        let amount = match &ingredient.unit {
            Some(unit) => format!("{} {}", ingredient.quantity, unit),
            None => ingredient.quantity.clone(),
        };
        println!("  • {} {}", ingredient.name, amount.dimmed());
    }

    Status::subheader("Instructions");
    for (step, instruction) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", step + 1, instruction);
    }
    Ok(())
}

pub fn submit(ctx: &Context, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| Error::from(e).with_context(file.display().to_string()))?;
    let new_recipe: NewRecipe = serde_json::from_str(&content)
        .map_err(|e| Error::from(e).with_context(file.display().to_string()))?;

    let mut catalog = load_or_empty(ctx)?;
    let recipe = catalog.submit(new_recipe).map_err(Error::from)?.clone();
    ctx.save_catalog(&catalog)?;

    if ctx.is_json() {
        return ctx.print_json(&recipe);
    }
    Status::success(&format!("Submitted '{}' as {} (pending approval)", recipe.title, recipe.id));
    Ok(())
}

pub fn approve(ctx: &Context, id: &str) -> Result<()> {
    let mut catalog = ctx.load_catalog()?;
    let recipe = catalog.approve(id).map_err(Error::from)?.clone();
    ctx.save_catalog(&catalog)?;

    if ctx.is_json() {
        return ctx.print_json(&recipe);
    }
    Status::success(&format!("Approved '{}'", recipe.title));
    Ok(())
}

#[derive(Serialize)]
struct RecipeIssues<'a> {
    id: &'a str,
    title: &'a str,
    errors: &'a [ValidationError],
    warnings: &'a [ValidationError],
}

pub fn validate(ctx: &Context, file: &Path) -> Result<()> {
    let catalog = RecipeCatalog::load(file)
        .map_err(|e| Error::from(e).with_context(file.display().to_string()))?;

    let results: Vec<_> = catalog
        .recipes()
        .iter()
        .map(|recipe| (recipe, recipe.validate()))
        .collect();
    let invalid = results.iter().filter(|(_, result)| !result.is_valid()).count();

    if ctx.is_json() {
        let issues: Vec<RecipeIssues<'_>> = results
            .iter()
            .filter(|(_, result)| !result.is_valid() || !result.warnings().is_empty())
            .map(|(recipe, result)| RecipeIssues {
                id: &recipe.id,
                title: &recipe.title,
                errors: result.errors(),
                warnings: result.warnings(),
            })
            .collect();
        ctx.print_json(&serde_json::json!({
            "recipes": catalog.len(),
            "invalid": invalid,
            "issues": issues,
        }))?;
    } else {
        for (recipe, result) in &results {
            print_issues(recipe, result.errors(), result.warnings());
        }
    }

    if invalid > 0 {
        return Err(Error::new(
            ErrorCode::ValidationError,
            format!(
                "{} of {} failed validation",
                format_count(invalid, "recipe", "recipes"),
                catalog.len()
            ),
        )
        .into());
    }

    if !ctx.is_json() {
        Status::success(&format!(
            "{} valid",
            format_count(catalog.len(), "recipe", "recipes")
        ));
    }
    Ok(())
}

fn print_issues(recipe: &Recipe, errors: &[ValidationError], warnings: &[ValidationError]) {
    for error in errors {
        Status::error(&format!("{} ({}): {}", recipe.title, recipe.id, error));
    }
    for warning in warnings {
        Status::warning(&format!("{} ({}): {}", recipe.title, recipe.id, warning));
    }
}

/// Submitting to a catalog file that does not exist yet starts a new one.
fn load_or_empty(ctx: &Context) -> Result<RecipeCatalog> {
    if ctx.catalog_path.exists() {
        ctx.load_catalog()
    } else {
        Ok(RecipeCatalog::new())
    }
}
