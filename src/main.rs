use clap::Parser;
use tracing_subscriber::EnvFilter;

use scmsync::presentation::cli::{Cli, CliApp};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = CliApp::from_cli(Cli::parse());

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if app.verbose() { "scmsync=debug" } else { "scmsync=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Run the CLI application
    app.run().await
}
