//! Discord command implementations organized by role.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Manager commands
pub mod manage;

/// Staff reporting and the shared order list
pub mod order;

/// Supplier panel commands
pub mod supplier;

use crate::{
    bot::{BotData, render},
    core::{
        locale::{Locale, t},
        order::{Order, Supplier},
    },
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;

// Export commands
pub use general::*;
pub use manage::*;
pub use order::*;
pub use supplier::*;

/// Discord caps an embed at 25 fields.
const EMBED_FIELD_LIMIT: usize = 25;

/// Answers input errors with a localized message and propagates everything else.
pub(crate) async fn reply_error(
    ctx: poise::Context<'_, BotData, Error>,
    locale: Locale,
    error: Error,
) -> Result<()> {
    match render::user_message(locale, &error) {
        Some(message) => {
            ctx.say(message).await?;
            Ok(())
        }
        None => Err(error),
    }
}

/// Builds a list embed with one field per order.
pub(crate) fn orders_embed(
    title: &str,
    locale: Locale,
    orders: &[&Order],
    suppliers: &[Supplier],
) -> Result<serenity::CreateEmbed> {
    let mut fields = Vec::with_capacity(orders.len().min(EMBED_FIELD_LIMIT));
    for order in orders.iter().take(EMBED_FIELD_LIMIT) {
        let (name, value) = render::order_field(locale, order, suppliers)?;
        fields.push((name, value, false));
    }

    let mut embed = serenity::CreateEmbed::default()
        .title(format!("**{title}** ({})", orders.len()))
        .color(0x0010_B981) // emerald
        .fields(fields);

    if orders.is_empty() {
        embed = embed.description(t(locale, "noItemsYet"));
    } else if orders.len() > EMBED_FIELD_LIMIT {
        embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
            "{EMBED_FIELD_LIMIT} / {}",
            orders.len()
        )));
    }

    Ok(embed)
}
