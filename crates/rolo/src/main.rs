//! rolo - personal relationship manager CLI
//!
//! Thin terminal front end over rolo-core: the application context is built
//! once at startup and every command drives the stores through it.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod format;
mod ui;

use cli::{Cli, Commands, ContactsAction};
use rolo_core::config::ExportMode;
use rolo_core::{AppContext, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("rolo=info".parse()?))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load()?;
    tracing::debug!("using backend {}", config.api.base_url);

    // `export --copy` selects the clipboard sink for this invocation
    if let Commands::Contacts(cmd) = &cli.command {
        if let ContactsAction::Export { copy: true, .. } = &cmd.action {
            config.export.mode = ExportMode::Clipboard;
        }
    }

    let ctx = AppContext::new(
        &config,
        Arc::new(ui::CliNotifier),
        Arc::new(ui::CliNavigator),
    )?;

    // Execute command
    match cli.command {
        Commands::Auth(cmd) => commands::auth::execute(cmd.action, &ctx).await,
        Commands::Contacts(cmd) => commands::contacts::execute(cmd.action, &ctx).await,
        Commands::Meetings(cmd) => commands::meetings::execute(cmd.action, &ctx).await,
        Commands::Version => {
            println!("rolo {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
