//! CLI interface for the Customer Export Tool

pub mod runner;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Customer Export Tool - Export customer names and emails from a store
#[derive(Parser, Debug, Default)]
#[command(name = "customer-export")]
#[command(version)]
#[command(about = "Export customer data to CSV or JSON", long_about = None)]
pub struct Cli {
    /// Store base URL (e.g., https://shop.example.com)
    #[arg(long, global = true, env = "CUSTOMER_EXPORT_STORE_URL")]
    pub store_url: Option<String>,

    /// Runtime data directory; exports are written to its export/ folder
    #[arg(long, global = true, env = "CUSTOMER_EXPORT_VAR_DIR")]
    pub var_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export customer data. Use --output=csv or --output=json for the output format
    ExportCustomers(ExportArgs),

    /// Show or change saved settings
    Config(ConfigArgs),

    /// Manage stored store credentials
    Credentials(CredentialsArgs),
}

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output format for the customer export file
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    pub output: Option<String>,

    /// Store access token (or set CUSTOMER_EXPORT_TOKEN env var)
    #[arg(long, env = "CUSTOMER_EXPORT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Arguments for settings management
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the settings file location and contents
    Show,

    /// Set the customer store connection
    SetStore {
        /// Store base URL
        url: String,
        /// Admin user for token exchange
        #[arg(long)]
        username: Option<String>,
        /// Customers per page (0 for a single unpaged request)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Set the runtime data directory
    SetVarDir {
        /// Directory path
        dir: PathBuf,
    },
}

/// Arguments for credential management
#[derive(Args, Debug)]
pub struct CredentialsArgs {
    #[command(subcommand)]
    pub command: CredentialsCommands,
}

#[derive(Subcommand, Debug)]
pub enum CredentialsCommands {
    /// Store an access token for the store (reads from stdin)
    SetToken,

    /// Store the admin password for the store (reads from stdin)
    SetPassword,

    /// Delete stored token and password for the store
    Delete,
}
