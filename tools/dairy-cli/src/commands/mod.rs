//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod return_order;
pub mod summary;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Entry type: cash, crate, missing or return.
    pub entry_type: String,

    /// Distributor user id.
    #[arg(short, long)]
    pub user: String,

    /// Only show products whose name contains this text.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the summary command.
#[derive(Args)]
pub struct SummaryArgs {
    /// Order-line summary, e.g. "Light Dahi (170ml x 50) x 4, Paneer (200g) Crate x 2".
    pub text: String,
}

/// Arguments for the return command.
#[derive(Args)]
pub struct ReturnArgs {
    /// Draft file (TOML or JSON) describing the return order.
    #[arg(short, long)]
    pub draft: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Show the review without submitting.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
