//! # Amber - Game-Content Reference
//!
//! The command-line binary over the Amber typed model.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  apps/amber (THE BINARY)                  │
//! │                                                           │
//! │  ┌─────────────┐    ┌──────────────┐    ┌─────────────┐   │
//! │  │    CLI      │    │    Config    │    │ JsonDirSrc  │   │
//! │  │   (clap)    │    │ (toml, env)  │    │ (serde_json)│   │
//! │  └──────┬──────┘    └──────┬───────┘    └──────┬──────┘   │
//! │         │                  │                   │          │
//! │         └──────────────────┼───────────────────┘          │
//! │                            ▼                              │
//! │                    ┌───────────────┐                      │
//! │                    │  amber-core   │                      │
//! │                    │  (THE MODEL)  │                      │
//! │                    └───────────────┘                      │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! amber --data-dir dumps/amber status
//! amber character "hu tao" --level 90 --tier 6
//! amber weapon 13501 --id --level 90
//! amber talent raiden --promotion 10
//! amber render "Skill DMG|{param1:F1P}" 1.2345
//! amber curve GROW_CURVE_HP_S5 --level 90
//! ```

use amber::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing — AMBER_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("AMBER_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "amber=debug,amber_core=debug"
    } else {
        "amber=warn,amber_core=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Amber startup banner.
fn print_banner() {
    eprintln!(
        r#"
   █████╗ ███╗   ███╗██████╗ ███████╗██████╗
  ██╔══██╗████╗ ████║██╔══██╗██╔════╝██╔══██╗
  ███████║██╔████╔██║██████╔╝█████╗  ██████╔╝
  ██╔══██║██║╚██╔╝██║██╔══██╗██╔══╝  ██╔══██╗
  ██║  ██║██║ ╚═╝ ██║██████╔╝███████╗██║  ██║
  ╚═╝  ╚═╝╚═╝     ╚═╝╚═════╝ ╚══════╝╚═╝  ╚═╝

  Game-Content Reference v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
