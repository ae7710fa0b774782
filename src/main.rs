//! citemark CLI entrypoint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use citemark::cli::Cli;

fn main() -> Result<()> {
    // Initialize tracing on stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Parse and execute CLI
    let cli = Cli::parse();
    cli.execute()
}
