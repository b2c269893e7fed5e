use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;
mod store;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if commands::handle_classify(&cli)? {
        return Ok(());
    }
    if commands::handle_validate(&cli)? {
        return Ok(());
    }
    Ok(())
}
