// Customer Export Tool - CLI Binary
// Run with: cargo run --bin customer-export -- export-customers --output=json

use clap::Parser;
use customer_export_lib::cli::{runner, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    customer_export_lib::init_logging(cli.verbose);

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    runner::run(cli).await
}
