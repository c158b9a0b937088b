//! General Discord commands - ping, help and language selection.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::reply_error, handlers::autocomplete},
        core::locale::{Locale, t},
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Explains which command each role uses.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let locale = ctx.data().store.lock().await.locale();

        let help_text = format!(
            "**{}**\n{}\n\n\
            • `/report <name> [quantity] [unit] [priority] …` ({})\n\
            • `/orders [supplier] [status] [search]`\n\
            • `/manage edit|send|assign|delete|supplier_add|suppliers` ({})\n\
            • `/supplier orders|update` ({})\n\
            • `/language <ar|en>`",
            t(locale, "title"),
            t(locale, "help"),
            t(locale, "staff"),
            t(locale, "manager"),
            t(locale, "supplier"),
        );

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Switches the display language for everyone.
    #[poise::command(slash_command)]
    pub async fn language(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Language code (ar or en)"]
        #[autocomplete = "autocomplete::autocomplete_locale"]
        code: String,
    ) -> Result<()> {
        let mut store = ctx.data().store.lock().await;
        let current = store.locale();

        let locale = match code.parse::<Locale>() {
            Ok(locale) => locale,
            Err(e) => return reply_error(ctx, current, e).await,
        };

        store.set_locale(locale).await?;
        drop(store);

        ctx.say(format!("✅ {}: {}", t(locale, "languageSet"), locale.code().to_uppercase()))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
