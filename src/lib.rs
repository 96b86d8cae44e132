use anyhow::Result;

pub mod cli;
pub mod commands;
pub mod settings;

use cli::{Cli, Commands};
use settings::{FileSettingsStore, SettingsStore};

/// Shared context handed to every subcommand handler.
pub struct AppCtx {
    pub settings_store: Box<dyn SettingsStore>,
}

#[cfg(not(tarpaulin_include))]
pub async fn run(cli: Cli) -> Result<()> {
    let settings_store: Box<dyn SettingsStore> = match &cli.config {
        Some(path) => Box::new(FileSettingsStore::at(path.into())),
        None => Box::new(FileSettingsStore::new()?),
    };
    let ctx = AppCtx { settings_store };

    match cli.command {
        Commands::Config(args) => commands::config::handle(args, &ctx).await,
        Commands::Invite(args) => commands::invite::handle(args, &ctx).await,
        Commands::Album(args) => commands::album::handle(args, &ctx).await,
        Commands::Encode(args) => commands::encode::handle(args).await,
    }
}
