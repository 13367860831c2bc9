//! virtual-cook: recipe recommendations from what is in your pantry.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use virtualcook_cli::OutputFormat;
use virtualcook_core::error::exit_codes;
use virtualcook_core::Error;

mod commands;
mod context;

use commands::{ingredients, matching, pantry, recipes};
use context::Context;

/// Recommend recipes from the ingredients you already have
#[derive(Parser)]
#[command(name = "virtual-cook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (default: ./virtualcook.toml if present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print timing metrics to stderr when done
    #[arg(long, global = true)]
    stats: bool,

    /// Pantry store file (overrides [pantry] path)
    #[arg(long, global = true)]
    pantry: Option<PathBuf>,

    /// Recipe catalog file (overrides [catalog] path)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Pantry owner (overrides [general] default_user)
    #[arg(short, long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank approved recipes by how much of each your pantry covers
    Match {
        /// Show at most this many recipes
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Count expired pantry items as available
        #[arg(long)]
        include_expired: bool,

        /// Suggest substitutes on hand for missing ingredients
        #[arg(long)]
        substitutes: bool,
    },

    /// Manage pantry contents
    Pantry {
        #[command(subcommand)]
        action: PantryAction,
    },

    /// Browse and moderate the recipe catalog
    Recipes {
        #[command(subcommand)]
        action: RecipesAction,
    },

    /// Ingredient name helpers
    Ingredients {
        #[command(subcommand)]
        action: IngredientsAction,
    },
}

#[derive(Subcommand)]
enum PantryAction {
    /// Add an ingredient or update the one already stored
    Add {
        /// Ingredient name
        ingredient: String,

        /// Amount on hand
        quantity: f64,

        /// Unit for the quantity
        #[arg(long)]
        unit: Option<String>,

        /// Expiration date (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = pantry::parse_expiry)]
        expires: Option<chrono::DateTime<chrono::Utc>>,
    },

    /// Remove an ingredient
    Remove {
        /// Ingredient name
        ingredient: String,
    },

    /// Set the quantity of a stored ingredient
    Set {
        /// Ingredient name
        ingredient: String,

        /// New amount
        quantity: f64,
    },

    /// List pantry contents
    List,

    /// List ingredients about to expire
    Expiring {
        /// Look-ahead window in days (overrides [pantry] expiring_days)
        #[arg(short, long)]
        days: Option<u32>,
    },
}

#[derive(Subcommand)]
enum RecipesAction {
    /// List approved recipes, optionally filtered
    List {
        /// Free text searched in title, description and cuisine
        #[arg(short, long)]
        search: Option<String>,

        /// Cuisine
        #[arg(long)]
        cuisine: Option<String>,

        /// Required dietary tag (repeatable)
        #[arg(long = "diet")]
        diets: Vec<String>,

        /// Maximum cooking time in minutes
        #[arg(long)]
        max_time: Option<u32>,

        /// Required ingredient (repeatable)
        #[arg(long = "with")]
        ingredients: Vec<String>,
    },

    /// Show one recipe
    Show {
        /// Recipe id
        id: String,
    },

    /// Submit a new recipe from a JSON file; it starts out pending
    Submit {
        /// JSON file with the new recipe
        file: PathBuf,
    },

    /// Approve a pending recipe
    Approve {
        /// Recipe id
        id: String,
    },

    /// Check every recipe in a catalog file
    Validate {
        /// Catalog file to check
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum IngredientsAction {
    /// Suggest known ingredient names close to NAME
    Suggest {
        /// Name to look up
        name: String,

        /// Maximum suggestions
        #[arg(short = 'n', long, default_value = "5")]
        limit: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.format;
    let stats = cli.stats;

    let result = run(cli);

    if stats {
        let metrics = virtualcook_telemetry::metrics().export_json();
        match serde_json::to_string_pretty(&metrics) {
            Ok(json) => eprintln!("{}", json),
            Err(e) => tracing::warn!("Could not render metrics: {}", e),
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<Error>()
                .map_or(exit_codes::FAILURE, |err| exit_codes::for_code(err.code));
            report_error(&e, format);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::new(
        cli.config.as_deref(),
        cli.format,
        cli.verbose,
        cli.pantry,
        cli.catalog,
        cli.user,
    )?;

    match cli.command {
        Commands::Match { limit, include_expired, substitutes } => {
            matching::run(&ctx, limit, include_expired, substitutes)
        }

        Commands::Pantry { action } => match action {
            PantryAction::Add { ingredient, quantity, unit, expires } => {
                pantry::add(&ctx, &ingredient, quantity, unit, expires)
            }
            PantryAction::Remove { ingredient } => pantry::remove(&ctx, &ingredient),
            PantryAction::Set { ingredient, quantity } => pantry::set(&ctx, &ingredient, quantity),
            PantryAction::List => pantry::list(&ctx),
            PantryAction::Expiring { days } => pantry::expiring(&ctx, days),
        },

        Commands::Recipes { action } => match action {
            RecipesAction::List { search, cuisine, diets, max_time, ingredients } => {
                recipes::list(&ctx, search, cuisine, diets, max_time, ingredients)
            }
            RecipesAction::Show { id } => recipes::show(&ctx, &id),
            RecipesAction::Submit { file } => recipes::submit(&ctx, &file),
            RecipesAction::Approve { id } => recipes::approve(&ctx, &id),
            RecipesAction::Validate { file } => recipes::validate(&ctx, &file),
        },

        Commands::Ingredients { action } => match action {
            IngredientsAction::Suggest { name, limit } => ingredients::suggest(&ctx, &name, limit),
        },
    }
}

fn report_error(error: &anyhow::Error, format: OutputFormat) {
    if format.is_json() {
        let report = match error.downcast_ref::<Error>() {
            Some(err) => serde_json::to_value(err.to_report()).ok(),
            None => Some(serde_json::json!({ "message": error.to_string() })),
        };
        if let Some(report) = report {
            eprintln!("{}", serde_json::json!({ "error": report }));
            return;
        }
    }
    eprintln!("{} {}", "Error:".red().bold(), error);
}
