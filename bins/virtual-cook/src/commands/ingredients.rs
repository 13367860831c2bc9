//! Ingredient commands - "did you mean" suggestions

use crate::context::Context;
use anyhow::Result;
use owo_colors::OwoColorize;
use virtualcook_cli::output::Status;
use virtualcook_matcher::suggest_ingredients;

/// Suggest catalog ingredient names close to `name`
pub fn suggest(ctx: &Context, name: &str, limit: usize) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let known = catalog.known_ingredients();
    let suggestions = suggest_ingredients(name, &known, limit);

    if ctx.is_json() {
        return ctx.print_json(&suggestions);
    }

    match suggestions.first() {
        None => Status::info(&format!("No ingredient in the catalog looks like '{}'", name)),
        Some(best) if best.distance == 0 => {
            Status::success(&format!("'{}' is used by catalog recipes", best.name));
        }
        Some(_) => {
            println!("Did you mean:");
            for suggestion in &suggestions {
                println!("  {}", suggestion.name.bold());
            }
        }
    }
    Ok(())
}
