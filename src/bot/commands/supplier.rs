//! Supplier panel Discord commands - a supplier's own orders and fulfillment updates.
//!
//! Each command names the supplier it acts for; the order list and the updates
//! are scoped to that supplier's assignments.

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
            access::{AccessPolicy, Role},
            editor::{self, FulfillmentUpdate},
            locale::{status_label, t},
            order::{Order, Status},
            storage::DatabaseStorage,
            store::OrderStore,
        },
        errors::{Error, Result},
    };

    fn supplier_role(
        store: &OrderStore<DatabaseStorage>,
        reference: &str,
    ) -> Result<(Role, String)> {
        render::resolve_supplier_ref(store, reference)
            .map(|s| (Role::Supplier(s.id.clone()), s.name.clone()))
    }

    async fn apply_update(
        store: &mut OrderStore<DatabaseStorage>,
        policy: &AccessPolicy,
        supplier: &str,
        reference: &str,
        status: Option<String>,
        eta: Option<String>,
    ) -> Result<Order> {
        let (role, _) = supplier_role(store, supplier)?;
        let id = render::resolve_order_ref(store, reference)?;
        let update = FulfillmentUpdate {
            status: status.as_deref().map(str::parse::<Status>).transpose()?,
            eta,
        };
        editor::update_fulfillment(store, policy, &role, &id, update).await
    }

    /// Parent command for the supplier panel.
    #[poise::command(slash_command, subcommands("supplier_orders", "supplier_update"))]
    pub async fn supplier(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Supplier panel. Available subcommands:\n\
            `/supplier orders` - Show the orders assigned to a supplier\n\
            `/supplier update` - Change status or ETA of an assigned order";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows the orders assigned to one supplier.
    #[poise::command(slash_command, rename = "orders")]
    pub async fn supplier_orders(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Supplier whose orders to show"]
        #[autocomplete = "autocomplete::autocomplete_supplier"]
        supplier: String,
    ) -> Result<()> {
        let store = ctx.data().store.lock().await;
        let locale = store.locale();

        let (role, supplier_name) = match supplier_role(&store, &supplier) {
            Ok(found) => found,
            Err(e) => return reply_error(ctx, locale, e).await,
        };

        let embed = {
            let visible = match editor::supplier_orders(&store, &role) {
                Ok(visible) => visible,
                Err(e) => return reply_error(ctx, locale, e).await,
            };
            let title = format!("{} – {supplier_name}", t(locale, "supplierBoard"));
            let embed = orders_embed(&title, locale, &visible, store.suppliers())?;
            if visible.is_empty() {
                embed.description(t(locale, "noSupplierItems"))
            } else {
                embed
            }
        };
        drop(store);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Updates status and/or ETA of an order assigned to the supplier.
    #[poise::command(slash_command, rename = "update")]
    pub async fn supplier_update(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Supplier you are acting for"]
        #[autocomplete = "autocomplete::autocomplete_supplier"]
        supplier: String,
        #[description = "Order to update"]
        #[autocomplete = "autocomplete::autocomplete_supplier_order"]
        order: String,
        #[description = "New status"]
        #[autocomplete = "autocomplete::autocomplete_supplier_status"]
        status: Option<String>,
        #[description = "ETA (e.g., Today 18:00)"] eta: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let mut store = data.store.lock().await;
        let locale = store.locale();

        let result = apply_update(&mut store, &data.policy, &supplier, &order, status, eta).await;
        let saved = match result {
            Ok(saved) => saved,
            Err(e) => return reply_error(ctx, locale, e).await,
        };
        drop(store);

        let mut message = format!(
            "✅ {}: **{}** `#{}` → {}",
            t(locale, "updated"),
            saved.name,
            render::short_id(&saved.id),
            status_label(locale, saved.status)
        );
        if !saved.eta.is_empty() {
            message.push_str(&format!(" · {}: {}", t(locale, "eta"), saved.eta));
        }

        ctx.say(message).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
