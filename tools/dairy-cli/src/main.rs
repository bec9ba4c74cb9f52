//! Dairy CLI - raise return orders against delivered dairy orders.
//!
//! Commands:
//! - `dairy catalog` - List product options for an entry type
//! - `dairy summary` - Parse an order-line summary
//! - `dairy return` - Review and submit a return order from a draft file
//! - `dairy config` - Manage configuration

mod commands;
mod config;
mod context;
mod draft;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CatalogArgs, ConfigArgs, ReturnArgs, SummaryArgs};
use config::LogFormat;

/// Dairy CLI - Raise and submit dairy return orders
#[derive(Parser)]
#[command(name = "dairy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Session token (overrides DAIRY_TOKEN and the token file)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List product options for an entry type
    Catalog(CatalogArgs),

    /// Parse an order-line summary into rows
    Summary(SummaryArgs),

    /// Review and submit a return order from a draft file
    Return(ReturnArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool, format: LogFormat) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.with_target(false).try_init(),
    };
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), cli.token, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    init_tracing(cli.verbose, ctx.config.logging.format);
    tracing::debug!(base_url = %ctx.config.api.base_url, "configuration loaded");

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Summary(args) => commands::summary::run(args, &ctx).await,
        Commands::Return(args) => commands::return_order::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
