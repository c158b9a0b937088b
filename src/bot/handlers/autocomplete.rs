//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions are filtered case-insensitively against what the user has typed
//! so far and capped at Discord's limit of 25 choices.

use crate::{
    bot::{BotData, render},
    core::{
        locale::Locale,
        order::{Priority, Status},
    },
    errors::Error,
};
use poise::serenity_prelude as serenity;

const DISCORD_CHOICE_LIMIT: usize = 25;

fn filter_choices<I>(candidates: I, partial: &str) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let partial_lower = partial.to_lowercase();
    candidates
        .into_iter()
        .filter(|c| c.to_lowercase().contains(&partial_lower))
        .take(DISCORD_CHOICE_LIMIT)
        .collect()
}

// Value of a string option the user already filled in, searched through subcommands.
fn string_option<'a>(options: &'a [serenity::CommandDataOption], name: &str) -> Option<&'a str> {
    options.iter().find_map(|option| match &option.value {
        serenity::CommandDataOptionValue::SubCommand(inner)
        | serenity::CommandDataOptionValue::SubCommandGroup(inner) => string_option(inner, name),
        serenity::CommandDataOptionValue::String(value) if option.name == name => {
            Some(value.as_str())
        }
        _ => None,
    })
}

/// Suggests suppliers by label. Suppliers sharing a name get distinct labels.
pub async fn autocomplete_supplier(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let store = ctx.data().store.lock().await;
    filter_choices(store.suppliers().iter().map(render::supplier_label), partial)
}

/// Suggests orders by label, most recently added first.
pub async fn autocomplete_order(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let store = ctx.data().store.lock().await;
    filter_choices(store.orders().iter().rev().map(render::order_label), partial)
}

/// Suggests only the orders assigned to the supplier chosen in the same command.
pub async fn autocomplete_supplier_order(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let poise::Context::Application(app) = ctx else {
        return Vec::new();
    };
    let Some(supplier) = string_option(&app.interaction.data.options, "supplier") else {
        return Vec::new();
    };

    let store = ctx.data().store.lock().await;
    filter_choices(render::supplier_order_labels(&store, supplier), partial)
}

/// Suggests units from the settings file.
pub async fn autocomplete_unit(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_choices(ctx.data().settings.units.iter().cloned(), partial)
}

/// Suggests every status.
pub async fn autocomplete_status(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_choices(Status::ALL.iter().map(ToString::to_string), partial)
}

/// Suggests the statuses a supplier may set.
pub async fn autocomplete_supplier_status(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let statuses = ctx.data().policy.supplier_statuses();
    filter_choices(statuses.iter().map(ToString::to_string), partial)
}

/// Suggests priorities.
pub async fn autocomplete_priority(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_choices(Priority::ALL.iter().map(ToString::to_string), partial)
}

/// Suggests supported language codes.
pub async fn autocomplete_locale(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    filter_choices(Locale::ALL.iter().map(ToString::to_string), partial)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_filter_choices_is_case_insensitive() {
        let got = filter_choices(
            ["Sidra Company", "M D", "Acme"].map(String::from),
            "sid",
        );
        assert_eq!(got, vec!["Sidra Company"]);
    }

    #[test]
    fn test_string_option_reads_subcommand_arguments() {
        // `/supplier update` while the order argument is being typed
        let raw = serde_json::json!([{
            "name": "update",
            "type": 1,
            "options": [
                { "name": "supplier", "type": 3, "value": "Acme #1a2b3c4d" },
                { "name": "order", "type": 3, "value": "Eg", "focused": true }
            ]
        }]);
        let options: Vec<serenity::CommandDataOption> = serde_json::from_value(raw).unwrap();

        assert_eq!(string_option(&options, "supplier"), Some("Acme #1a2b3c4d"));
        assert_eq!(string_option(&options, "order"), None);
        assert_eq!(string_option(&options, "eta"), None);
    }

    #[test]
    fn test_filter_choices_caps_at_discord_limit() {
        let got = filter_choices((0..40).map(|i| format!("item {i}")), "");
        assert_eq!(got.len(), DISCORD_CHOICE_LIMIT);
    }
}
