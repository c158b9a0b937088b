//! Bot layer - Discord interface over the order store
//!
//! This module provides the slash commands, autocomplete handlers, and the shared
//! context they run against. The role a command acts as is fixed by the command
//! group it belongs to (`/report` staff, `/manage` manager, `/supplier` supplier).

/// Discord command implementations (orders, management, supplier panel, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Order formatting and reference parsing shared by commands
pub mod render;

use crate::{
    config::settings::Settings,
    core::{access::AccessPolicy, storage::DatabaseStorage, store::OrderStore},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// Commands lock the store for the whole operation, so mutations never interleave.
pub struct BotData {
    /// The order store, persisted to the database
    pub store: Mutex<OrderStore<DatabaseStorage>>,
    /// Which role may do what
    pub policy: AccessPolicy,
    /// Loaded application settings
    pub settings: Settings,
}

impl BotData {
    /// Creates a new `BotData` instance from a loaded store and settings.
    #[must_use]
    pub fn new(store: OrderStore<DatabaseStorage>, settings: Settings) -> Self {
        Self {
            store: Mutex::new(store),
            policy: settings.access_policy(),
            settings,
        }
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
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
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

/// Connects to Discord and serves slash commands until the client stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::language(),
                commands::report(),
                commands::orders(),
                commands::manage(),
                commands::supplier(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
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
