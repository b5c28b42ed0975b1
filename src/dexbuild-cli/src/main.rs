mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn init_logging(verbose: bool) {
    let default = if verbose { "dexbuild=debug" } else { "dexbuild=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(cli.root, cli.version);

    match cli.command {
        Commands::Foundry { build } => {
            commands::export::foundry(&config.export, &build)?;
        }

        Commands::Srd { build, orphans } => {
            commands::export::srd(&config.export, &build, orphans)?;
        }

        Commands::Images { target, sets } => {
            commands::images::handle(&config.export, target, &sets)?;
        }

        Commands::Configure { show, save } => {
            commands::configure::handle(&config, show, save)?;
        }
    }

    Ok(())
}
