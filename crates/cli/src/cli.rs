use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use menucost_catalog::Catalog;
use menucost_core::{DomainError, IngredientId, RecipeId, SemifinishedId};
use menucost_observability::LogFormat;

use crate::load::{load_catalog, LoadError};
use crate::report;
use crate::settings::{ConfigError, Settings, SettingsArgs};

#[derive(Debug, Parser)]
#[command(name = "menucost")]
#[command(about = "Cost, markup and profit reports for a café menu")]
pub struct Cli {
    /// Path to the catalog snapshot (JSON)
    #[arg(long, env = "MENUCOST_CATALOG", global = true, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log line format on stderr (json or text)
    #[arg(long, env = "MENUCOST_LOG_FORMAT", global = true, default_value = "json")]
    pub log_format: LogFormat,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Cost sheet of one recipe
    Recipe {
        /// Recipe id
        id: RecipeId,
    },

    /// Cost sheet of one semifinished item
    Semifinished {
        /// Semifinished id
        id: SemifinishedId,
    },

    /// Till menu with cost, markup and profit per item
    Listing {
        /// Only recipes in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Ingredients at or below their minimum stock
    LowStock,

    /// Recipes whose cost depends on an ingredient
    Impact {
        /// Ingredient id
        ingredient: IngredientId,
    },

    /// Distinct categories per record kind
    Categories,

    /// Effective business settings
    Settings,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("cannot encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct Categories {
    ingredients: Vec<String>,
    semifinished: Vec<String>,
    recipes: Vec<String>,
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn needs_catalog(command: &Command) -> bool {
    !matches!(command, Command::Settings)
}

/// Execute a parsed command line and return the JSON document to print.
pub fn run(cli: &Cli) -> Result<String, CliError> {
    let settings = Settings::try_from(cli.settings.clone())?;
    let catalog = if needs_catalog(&cli.command) {
        load_catalog(&cli.catalog)?
    } else {
        Catalog::new()
    };

    execute(&cli.command, &catalog, &settings, cli.pretty)
}

/// Execute a command against an already loaded catalog.
pub fn execute(
    command: &Command,
    catalog: &Catalog,
    settings: &Settings,
    pretty: bool,
) -> Result<String, CliError> {
    tracing::debug!(?command, "executing");

    match command {
        Command::Recipe { id } => render(&report::recipe_sheet(catalog, id)?, pretty),
        Command::Semifinished { id } => render(&report::semifinished_sheet(catalog, id)?, pretty),
        Command::Listing { category } => {
            render(&report::menu(catalog, settings, category.clone()), pretty)
        }
        Command::LowStock => {
            let stock = report::low_stock(catalog, settings);
            if !stock.items.is_empty() {
                tracing::warn!(count = stock.items.len(), "ingredients at or below minimum stock");
            }
            render(&stock, pretty)
        }
        Command::Impact { ingredient } => render(&report::impact(catalog, ingredient)?, pretty),
        Command::Categories => render(
            &Categories {
                ingredients: catalog.ingredient_categories(),
                semifinished: catalog.semifinished_categories(),
                recipes: catalog.recipe_categories(),
            },
            pretty,
        ),
        Command::Settings => render(settings, pretty),
    }
}
