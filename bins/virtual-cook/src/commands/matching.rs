//! Match command - rank approved recipes against the user's pantry

use crate::context::Context;
use anyhow::Result;
use chrono::Utc;
use owo_colors::OwoColorize;
use serde::Serialize;
use virtualcook_catalog::Recommendation;
use virtualcook_cli::output::{format_count, format_minutes, format_percentage, Status};
use virtualcook_matcher::{suggest_substitutes, IngredientSet, MatchOptions, Substitution};
use virtualcook_telemetry::{metrics, Timer};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchOutput<'a> {
    user: &'a str,
    pantry_size: usize,
    recommendations: Vec<Row<'a>>,
}

#[derive(Serialize)]
struct Row<'a> {
    #[serde(flatten)]
    recommendation: Recommendation<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    substitutes: Vec<Substitution>,
}

/// Run the match command
pub fn run(ctx: &Context, limit: Option<usize>, include_expired: bool, substitutes: bool) -> Result<()> {
    let store = ctx.load_pantries()?;
    let catalog = ctx.load_catalog()?;
    let aliases = ctx.aliases()?;
    let substitute_table = if substitutes { Some(ctx.substitutes()?) } else { None };

    let include_expired = include_expired || ctx.config.schema.pantry.include_expired;
    let pantry: IngredientSet = store
        .pantry(&ctx.user)
        .map(|p| p.on_hand(Utc::now(), include_expired))
        .unwrap_or_default();

    let mut options = MatchOptions::new().with_aliases(&aliases);
    if let Some(limit) = limit.or(ctx.config.schema.matcher.default_limit) {
        options = options.with_limit(limit);
    }

    let timer = Timer::start("match.recommend");
    let recommendations = catalog.recommend(&pantry, &options);
    timer.stop();
    metrics().increment_by("match.recipes_considered", catalog.approved().len() as u64);
    metrics().increment_by("match.recommendations", recommendations.len() as u64);

    let rows: Vec<Row<'_>> = recommendations
        .into_iter()
        .map(|recommendation| {
            let substitutes = substitute_table
                .as_ref()
                .map(|table| {
                    suggest_substitutes(&recommendation.result, &pantry, table, Some(&aliases))
                })
                .unwrap_or_default();
            Row { recommendation, substitutes }
        })
        .collect();

    if ctx.is_json() {
        return ctx.print_json(&MatchOutput {
            user: &ctx.user,
            pantry_size: pantry.len(),
            recommendations: rows,
        });
    }

    if pantry.is_empty() {
        Status::warning(&format!(
            "Pantry for '{}' is empty; add ingredients with `virtual-cook pantry add`",
            ctx.user
        ));
        return Ok(());
    }

    Status::header(&format!(
        "Recipes for {} ({} on hand)",
        ctx.user,
        format_count(pantry.len(), "ingredient", "ingredients")
    ));

    if rows.is_empty() {
        Status::info("No recipe uses anything in your pantry yet");
        return Ok(());
    }

    for row in &rows {
        print_row(row);
    }
    println!();
    Status::success(&format!("{} found", format_count(rows.len(), "recipe", "recipes")));
    Ok(())
}

fn print_row(row: &Row<'_>) {
    let rec = &row.recommendation;
    let time = rec
        .recipe
        .total_time()
        .map(|minutes| format!(" · {}", format_minutes(minutes)))
        .unwrap_or_default();

    println!(
        "{}  {}{}  {}",
        format_percentage(rec.match_percentage()),
        rec.recipe.title.bold(),
        time.dimmed(),
        rec.recipe.id.dimmed()
    );

    if rec.missing_ingredients().is_empty() {
        println!("      {}", "everything on hand".green());
    } else {
        println!("      missing: {}", rec.missing_ingredients().join(", "));
    }

    for substitution in &row.substitutes {
        println!(
            "      {} {} → {}",
            "swap".cyan(),
            substitution.missing,
            substitution.available.join(" or ")
        );
    }
}
