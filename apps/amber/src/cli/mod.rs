//! # Amber CLI Module
//!
//! This module implements the CLI interface for Amber.
//!
//! ## Available Commands
//!
//! - `status` - Show data directory and catalog sizes
//! - `characters` - List characters
//! - `weapons` - List weapons
//! - `character` - Base stats of a character at a level and tier
//! - `weapon` - Base attack and substat of a weapon at a level and tier
//! - `talent` - Rendered talent descriptions at a talent level
//! - `render` - Render a description template with parameters
//! - `curve` - Inspect a growth curve

mod commands;

use crate::config::{AmberConfig, Overrides};
use crate::source::JsonDirSource;
use amber_core::{AmberError, Catalog, ContentSource, Lookup};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Amber - game-content reference
///
/// Queries character and weapon stats, talent descriptions and growth
/// curves from a local dump of the content feed.
#[derive(Parser, Debug)]
#[command(name = "amber")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Root of the feed dump (overrides AMBER_DATA_DIR and the config file)
    #[arg(short = 'D', long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Language segment of localized dump paths
    #[arg(short = 'L', long, global = true)]
    pub language: Option<String>,

    /// Path to a TOML config file (default: ./amber.toml if present)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show data directory and catalog sizes
    Status,

    /// List all characters
    Characters,

    /// List all weapons
    Weapons,

    /// Show a character's base stats
    Character {
        /// Name fragment (case-insensitive) or id with --id
        query: String,

        /// Treat the query as an exact id
        #[arg(long)]
        id: bool,

        /// Character level
        #[arg(short, long)]
        level: Option<usize>,

        /// Ascension tier
        #[arg(short, long)]
        tier: Option<usize>,
    },

    /// Show a weapon's base attack and substat
    Weapon {
        /// Name fragment (case-insensitive) or id with --id
        query: String,

        /// Treat the query as an exact id
        #[arg(long)]
        id: bool,

        /// Weapon level
        #[arg(short, long)]
        level: Option<usize>,

        /// Ascension tier
        #[arg(short, long)]
        tier: Option<usize>,

        /// Refinement rank (0-based) whose affix text to show
        #[arg(short, long, default_value = "0")]
        refinement: usize,
    },

    /// Render a character's talent descriptions
    Talent {
        /// Character name fragment or id with --id
        character: String,

        /// Treat the query as an exact id
        #[arg(long)]
        id: bool,

        /// Talent level
        #[arg(short, long, default_value = "1")]
        promotion: String,
    },

    /// Render a description template
    Render {
        /// Template, e.g. "DMG|{param1:F1P}"
        template: String,

        /// Positional parameters
        #[arg(allow_negative_numbers = true)]
        params: Vec<f64>,
    },

    /// Inspect a growth curve
    Curve {
        /// Curve name, e.g. GROW_CURVE_HP_S5
        name: String,

        /// Show the multiplier at this level only
        #[arg(short, long)]
        level: Option<usize>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Resolve the configuration for parsed arguments.
pub fn resolve_config(cli: &Cli) -> Result<AmberConfig, AmberError> {
    AmberConfig::resolve(
        cli.config.as_deref(),
        Overrides {
            data_dir: cli.data_dir.clone(),
            language: cli.language.clone(),
        },
    )
}

/// Execute the CLI with parsed arguments, writing to stdout.
pub fn execute(cli: Cli) -> Result<(), AmberError> {
    let config = resolve_config(&cli)?;
    let catalog = Catalog::new(JsonDirSource::new(&config.data_dir, &config.language));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&catalog, &config, cli.command, cli.json_mode, &mut out)
}

/// Dispatch one command against a catalog.
pub fn run<S, W>(
    catalog: &Catalog<S>,
    config: &AmberConfig,
    command: Option<Commands>,
    json_mode: bool,
    out: &mut W,
) -> Result<(), AmberError>
where
    S: ContentSource,
    W: std::io::Write,
{
    tracing::debug!(?command, json_mode, "executing command");

    match command {
        Some(Commands::Status) | None => cmd_status(catalog, config, json_mode, out),
        Some(Commands::Characters) => cmd_characters(catalog, json_mode, out),
        Some(Commands::Weapons) => cmd_weapons(catalog, json_mode, out),
        Some(Commands::Character {
            query,
            id,
            level,
            tier,
        }) => cmd_character(
            catalog,
            lookup(&query, id),
            level.unwrap_or(config.default_level),
            tier.or(config.default_tier),
            json_mode,
            out,
        ),
        Some(Commands::Weapon {
            query,
            id,
            level,
            tier,
            refinement,
        }) => cmd_weapon(
            catalog,
            lookup(&query, id),
            level.unwrap_or(config.default_level),
            tier.or(config.default_tier),
            refinement,
            json_mode,
            out,
        ),
        Some(Commands::Talent {
            character,
            id,
            promotion,
        }) => cmd_talent(catalog, lookup(&character, id), &promotion, json_mode, out),
        Some(Commands::Render { template, params }) => {
            cmd_render(&template, &params, json_mode, out)
        }
        Some(Commands::Curve { name, level }) => cmd_curve(catalog, &name, level, json_mode, out),
    }
}

fn lookup(query: &str, by_id: bool) -> Lookup<'_> {
    if by_id {
        Lookup::Id(query)
    } else {
        Lookup::Name(query)
    }
}
