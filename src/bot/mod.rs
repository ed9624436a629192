//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for Commission Desk, including
//! all slash commands, autocomplete handlers, and the framework setup.

/// Discord command implementations (dashboard, ledgers, record keeping, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection and any other global state
/// that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

pub use commands::*;
pub use handlers::*;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Every command the bot registers.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<BotData, Error>> {
    vec![
        commands::dashboard(),
        commands::sales(),
        commands::fixed_costs(),
        commands::costs(),
        commands::inventory(),
        commands::contracts(),
        commands::sale_manage(),
        commands::fixed_cost_manage(),
        commands::cost_manage(),
        commands::stock_manage(),
        commands::contract_manage(),
        commands::salesperson_manage(),
        commands::help(),
        commands::ping(),
    ]
}

/// Builds the poise framework and runs the Discord client until it stops.
#[instrument(skip(token, database))]
pub async fn run_bot(token: String, database: DatabaseConnection) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: all_commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subcommand_names(command: &poise::Command<BotData, Error>) -> Vec<&str> {
        command.subcommands.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_record_keeping_commands_are_registered() {
        let commands = all_commands();
        let find = |name: &str| commands.iter().find(|c| c.name == name);

        for read_only in ["dashboard", "sales", "fixed_costs", "costs", "inventory", "contracts"] {
            assert!(find(read_only).is_some(), "missing /{read_only}");
        }

        let sale = find("sale").map(subcommand_names).unwrap_or_default();
        assert_eq!(
            sale,
            vec!["add", "details", "toggle", "pay", "delete", "add_cost", "remove_cost"]
        );
        for (group, expected) in [
            ("fixed_cost", vec!["add", "delete"]),
            ("cost", vec!["add", "delete"]),
            ("stock", vec!["add", "set", "delete"]),
            ("contract", vec!["add", "delete"]),
            ("salesperson", vec!["add", "list", "rate", "active"]),
        ] {
            let names = find(group).map(subcommand_names).unwrap_or_default();
            assert_eq!(names, expected, "/{group} subcommands");
        }
    }
}
