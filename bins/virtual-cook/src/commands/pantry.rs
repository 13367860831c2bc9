//! Pantry commands - add, remove, set, list and expiring

use crate::context::Context;
use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use owo_colors::OwoColorize;
use virtualcook_cli::output::{format_count, Status};
use virtualcook_core::Error;
use virtualcook_pantry::{PantryEntry, PantryItem};
use virtualcook_telemetry::metrics;

/// Parse `--expires`: a calendar date (valid through the end of that day,
/// UTC) or a full RFC 3339 timestamp.
pub fn parse_expiry(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date
            .and_hms_opt(23, 59, 59)
            .map(|end| end.and_utc())
            .ok_or_else(|| format!("invalid date: {}", value));
    }
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|_| format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got '{}'", value))
}

pub fn add(
    ctx: &Context,
    ingredient: &str,
    quantity: f64,
    unit: Option<String>,
    expires: Option<DateTime<Utc>>,
) -> Result<()> {
    let mut store = ctx.load_pantries()?;
    let pantry = store.pantry_mut(&ctx.user).map_err(Error::from)?;

    let mut item = PantryItem::new(ingredient, quantity);
    if let Some(unit) = unit {
        item = item.with_unit(unit);
    }
    if let Some(at) = expires {
        item = item.expires_at(at);
    }
    let entry = pantry.add(item).map_err(Error::from)?.clone();
    ctx.save_pantries(&store)?;
    metrics().increment("pantry.writes");

    if ctx.is_json() {
        return ctx.print_json(&entry);
    }
    Status::success(&format!("Stored {}", describe(&entry)));
    Ok(())
}

pub fn remove(ctx: &Context, ingredient: &str) -> Result<()> {
    let mut store = ctx.load_pantries()?;
    let entry = store
        .pantry_mut(&ctx.user)
        .and_then(|pantry| pantry.remove(ingredient))
        .map_err(Error::from)?;
    ctx.save_pantries(&store)?;
    metrics().increment("pantry.writes");

    if ctx.is_json() {
        return ctx.print_json(&entry);
    }
    Status::success(&format!("Removed {}", entry.ingredient));
    Ok(())
}

pub fn set(ctx: &Context, ingredient: &str, quantity: f64) -> Result<()> {
    let mut store = ctx.load_pantries()?;
    let entry = store
        .pantry_mut(&ctx.user)
        .and_then(|pantry| pantry.update_quantity(ingredient, quantity).cloned())
        .map_err(Error::from)?;
    ctx.save_pantries(&store)?;
    metrics().increment("pantry.writes");

    if ctx.is_json() {
        return ctx.print_json(&entry);
    }
    Status::success(&format!("Updated {}", describe(&entry)));
    Ok(())
}

pub fn list(ctx: &Context) -> Result<()> {
    let store = ctx.load_pantries()?;
    let entries: &[PantryEntry] = store
        .pantry(&ctx.user)
        .map(|p| p.entries())
        .unwrap_or_default();

    if ctx.is_json() {
        return ctx.print_json(entries);
    }

    if entries.is_empty() {
        Status::info(&format!("Pantry for '{}' is empty", ctx.user));
        return Ok(());
    }

    let now = Utc::now();
    Status::header(&format!(
        "Pantry for {} ({})",
        ctx.user,
        format_count(entries.len(), "item", "items")
    ));
    for entry in entries {
        let line = describe(entry);
        if entry.is_expired(now) {
            println!("  {} {}", line.dimmed(), "expired".red());
        } else if entry.quantity <= 0.0 {
            println!("  {} {}", line.dimmed(), "used up".yellow());
        } else {
            println!("  {}", line);
        }
    }
    Ok(())
}

pub fn expiring(ctx: &Context, days: Option<u32>) -> Result<()> {
    let store = ctx.load_pantries()?;
    let days = days.unwrap_or(ctx.config.schema.pantry.expiring_days);
    let now = Utc::now();
    let entries: Vec<&PantryEntry> = store
        .pantry(&ctx.user)
        .map(|p| p.expiring_within(now, Duration::days(i64::from(days))))
        .unwrap_or_default();

    if ctx.is_json() {
        return ctx.print_json(&entries);
    }

    if entries.is_empty() {
        Status::info(&format!(
            "Nothing expires in the next {}",
            format_count(days as usize, "day", "days")
        ));
        return Ok(());
    }

    Status::header(&format!("Expiring within {}", format_count(days as usize, "day", "days")));
    for entry in entries {
        println!("  {}", describe(entry));
    }
    Ok(())
}

fn describe(entry: &PantryEntry) -> String {
    let amount = match &entry.unit {
        Some(unit) => format!("{} {}", entry.quantity, unit),
        None => entry.quantity.to_string(),
    };
    let expiry = entry
        .expires_at
        .map(|at| format!(", expires {}", at.format("%Y-%m-%d")))
        .unwrap_or_default();
    format!("{} ({}{})", entry.ingredient, amount, expiry)
}
