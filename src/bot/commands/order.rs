//! Order Discord commands - `report` for staff and the shared `orders` list.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{orders_embed, reply_error},
            handlers::autocomplete,
            render,
        },
        core::{
            access::Role,
            editor,
            filter::OrderFilter,
            locale::t,
            order::{OrderDraft, Priority, Status},
        },
        errors::{Error, Result},
    };

    /// Reports a missing item (staff).
    ///
    /// Quantity defaults to 1, unit to the first configured unit and priority to
    /// medium. The new order starts in status `new` with no supplier.
    #[poise::command(slash_command)]
    #[allow(clippy::too_many_arguments)]
    pub async fn report(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item name (e.g., Tomatoes)"] name: String,
        #[description = "Quantity, defaults to 1"] quantity: Option<f64>,
        #[description = "Unit"]
        #[autocomplete = "autocomplete::autocomplete_unit"]
        unit: Option<String>,
        #[description = "Priority (low, med, high)"]
        #[autocomplete = "autocomplete::autocomplete_priority"]
        priority: Option<String>,
        #[description = "Category (veg/meat/dairy…)"] category: Option<String>,
        #[description = "Needed by (e.g., 2025-01-31)"] needed_by: Option<String>,
        #[description = "Notes (e.g., large size)"] notes: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let mut store = data.store.lock().await;
        let locale = store.locale();

        let priority = match priority.as_deref().map(str::parse::<Priority>).transpose() {
            Ok(priority) => priority,
            Err(e) => return reply_error(ctx, locale, e).await,
        };

        let draft = OrderDraft {
            name,
            quantity,
            unit,
            category,
            priority,
            needed_by,
            notes,
            supplier_id: None,
        };

        let order =
            match editor::report_shortage(&mut store, &data.policy, &Role::Staff, draft).await {
                Ok(order) => order,
                Err(e) => return reply_error(ctx, locale, e).await,
            };
        drop(store);

        ctx.say(format!(
            "✅ {}: **{}** · {} {} `#{}`",
            t(locale, "added"),
            order.name,
            render::format_quantity(order.quantity),
            order.unit,
            render::short_id(&order.id)
        ))
        .await?;
        Ok(())
    }

    /// Lists orders, optionally filtered by supplier, status and free text.
    #[poise::command(slash_command)]
    pub async fn orders(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only orders assigned to this supplier"]
        #[autocomplete = "autocomplete::autocomplete_supplier"]
        supplier: Option<String>,
        #[description = "Only orders in this status"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: Option<String>,
        #[description = "Search name, category and notes"] search: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let store = data.store.lock().await;
        let locale = store.locale();

        let supplier_id = match supplier.as_deref() {
            Some(reference) => match render::resolve_supplier_ref(&store, reference) {
                Ok(found) => Some(found.id.clone()),
                Err(e) => return reply_error(ctx, locale, e).await,
            },
            None => None,
        };

        let status = match status.as_deref().map(str::parse::<Status>).transpose() {
            Ok(status) => status,
            Err(e) => return reply_error(ctx, locale, e).await,
        };

        let filter = OrderFilter {
            supplier_id,
            status,
            search: search.unwrap_or_default().trim().to_string(),
        };

        let embed = {
            let visible = editor::visible_orders(&store, &Role::Manager, &filter);
            orders_embed(t(locale, "orders"), locale, &visible, store.suppliers())?
        };
        drop(store);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
