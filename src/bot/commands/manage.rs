//! Manager Discord commands - editing, sending, assigning and deleting orders,
//! plus supplier registration.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::reply_error, handlers::autocomplete, render},
        core::{
            access::{AccessPolicy, Role},
            editor,
            locale::{priority_label, status_label, t},
            order::{Order, Priority, Status},
            storage::DatabaseStorage,
            store::OrderStore,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    type Store = OrderStore<DatabaseStorage>;

    /// Optional field changes collected from `/manage edit`.
    struct OrderChanges {
        name: Option<String>,
        quantity: Option<f64>,
        unit: Option<String>,
        priority: Option<String>,
        status: Option<String>,
        supplier: Option<String>,
        clear_supplier: bool,
        category: Option<String>,
        needed_by: Option<String>,
        notes: Option<String>,
    }

    async fn apply_changes(
        store: &mut Store,
        policy: &AccessPolicy,
        reference: &str,
        changes: OrderChanges,
    ) -> Result<Order> {
        let id = render::resolve_order_ref(store, reference)?;
        let mut edited = store
            .order(&id)
            .cloned()
            .ok_or_else(|| Error::OrderNotFound { id: id.to_string() })?;

        if let Some(name) = changes.name {
            if name.trim().is_empty() {
                return Err(Error::Validation {
                    message: "Item name cannot be empty".to_string(),
                });
            }
            edited.name = name.trim().to_string();
        }
        if let Some(quantity) = changes.quantity {
            if !quantity.is_finite() || quantity < 0.0 {
                return Err(Error::Validation {
                    message: format!("Quantity must be a non-negative number, got {quantity}"),
                });
            }
            edited.quantity = quantity;
        }
        if let Some(unit) = changes.unit {
            edited.unit = unit;
        }
        if let Some(priority) = changes.priority {
            edited.priority = priority.parse::<Priority>()?;
        }
        if let Some(status) = changes.status {
            edited.status = status.parse::<Status>()?;
        }
        if let Some(supplier) = changes.supplier {
            edited.supplier_id = Some(render::resolve_supplier_ref(store, &supplier)?.id.clone());
        } else if changes.clear_supplier {
            edited.supplier_id = None;
        }
        if let Some(category) = changes.category {
            edited.category = category;
        }
        if let Some(needed_by) = changes.needed_by {
            edited.needed_by = needed_by;
        }
        if let Some(notes) = changes.notes {
            edited.notes = notes;
        }

        editor::edit_order(store, policy, &Role::Manager, edited).await
    }

    async fn assign_orders(
        store: &mut Store,
        policy: &AccessPolicy,
        supplier: &str,
        references: &str,
    ) -> Result<(usize, String)> {
        let ids = render::resolve_order_refs(store, references)?;
        if ids.is_empty() {
            return Err(Error::Validation {
                message: "No orders selected".to_string(),
            });
        }
        let target = render::resolve_supplier_ref(store, supplier)?.clone();
        let changed =
            editor::assign_to_supplier(store, policy, &Role::Manager, &ids, &target.id).await?;
        Ok((changed, target.name))
    }

    /// Parent command for the manager's order and supplier management.
    #[poise::command(
        slash_command,
        subcommands(
            "manage_edit",
            "manage_send",
            "manage_assign",
            "manage_delete",
            "manage_supplier_add",
            "manage_suppliers"
        )
    )]
    pub async fn manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Order management command. Available subcommands:\n\
            `/manage edit` - Change any field of an order\n\
            `/manage send` - Mark one order as sent\n\
            `/manage assign` - Send several orders to a supplier\n\
            `/manage delete` - Delete an order\n\
            `/manage supplier_add` - Register a supplier\n\
            `/manage suppliers` - List suppliers";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Edits an order. Only the fields given are changed.
    #[poise::command(slash_command, rename = "edit")]
    #[allow(clippy::too_many_arguments)]
    pub async fn manage_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Order to edit"]
        #[autocomplete = "autocomplete::autocomplete_order"]
        order: String,
        #[description = "New item name"] name: Option<String>,
        #[description = "New quantity"] quantity: Option<f64>,
        #[description = "New unit"]
        #[autocomplete = "autocomplete::autocomplete_unit"]
        unit: Option<String>,
        #[description = "New priority"]
        #[autocomplete = "autocomplete::autocomplete_priority"]
        priority: Option<String>,
        #[description = "New status"]
        #[autocomplete = "autocomplete::autocomplete_status"]
        status: Option<String>,
        #[description = "Assign to this supplier"]
        #[autocomplete = "autocomplete::autocomplete_supplier"]
        supplier: Option<String>,
        #[description = "Remove the supplier assignment"] clear_supplier: Option<bool>,
        #[description = "New category"] category: Option<String>,
        #[description = "New needed-by date"] needed_by: Option<String>,
        #[description = "New notes"] notes: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let mut store = data.store.lock().await;
        let locale = store.locale();

        let changes = OrderChanges {
            name,
            quantity,
            unit,
            priority,
            status,
            supplier,
            clear_supplier: clear_supplier.unwrap_or(false),
            category,
            needed_by,
            notes,
        };
        let result = apply_changes(&mut store, &data.policy, &order, changes).await;

        let saved = match result {
            Ok(saved) => saved,
            Err(e) => return reply_error(ctx, locale, e).await,
        };
        drop(store);

        ctx.say(format!(
            "✅ {}: **{}** `#{}` · {} · {}",
            t(locale, "updated"),
            saved.name,
            render::short_id(&saved.id),
            status_label(locale, saved.status),
            priority_label(locale, saved.priority)
        ))
        .await?;
        Ok(())
    }

    /// Marks one order as sent.
    #[poise::command(slash_command, rename = "send")]
    pub async fn manage_send(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Order to send"]
        #[autocomplete = "autocomplete::autocomplete_order"]
        order: String,
    ) -> Result<()> {
        let data = ctx.data();
        let mut store = data.store.lock().await;
        let locale = store.locale();

        let result = match render::resolve_order_ref(&store, &order) {
            Ok(id) => editor::send_order(&mut store, &data.policy, &Role::Manager, &id).await,
            Err(e) => Err(e),
        };
        let sent = match result {
            Ok(sent) => sent,
            Err(e) => return reply_error(ctx, locale, e).await,
        };
        drop(store);

        ctx.say(format!(
            "✅ **{}** `#{}` → {}",
            sent.name,
            render::short_id(&sent.id),
            status_label(locale, sent.status)
        ))
        .await?;
        Ok(())
    }

    /// Sends several orders to one supplier and marks them sent.
    #[poise::command(slash_command, rename = "assign")]
    pub async fn manage_assign(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Supplier to send to"]
        #[autocomplete = "autocomplete::autocomplete_supplier"]
        supplier: String,
        #[description = "Order references separated by commas (e.g., #1a2b3c4d, #9f8e7d6c)"]
        orders: String,
    ) -> Result<()> {
        let data = ctx.data();
        let mut store = data.store.lock().await;
        let locale = store.locale();

        let result = assign_orders(&mut store, &data.policy, &supplier, &orders).await;

        let (changed, supplier_name) = match result {
            Ok(done) => done,
            Err(e) => return reply_error(ctx, locale, e).await,
        };
        drop(store);

        ctx.say(format!(
            "✅ {}: {changed} → **{supplier_name}**",
            t(locale, "sentCount")
        ))
        .await?;
        Ok(())
    }

    /// Deletes an order.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn manage_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Order to delete"]
        #[autocomplete = "autocomplete::autocomplete_order"]
        order: String,
    ) -> Result<()> {
        let data = ctx.data();
        let mut store = data.store.lock().await;
        let locale = store.locale();

        let result = match render::resolve_order_ref(&store, &order) {
            Ok(id) => editor::remove_order(&mut store, &data.policy, &Role::Manager, &id).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            return reply_error(ctx, locale, e).await;
        }
        drop(store);

        ctx.say(format!("🗑️ {}", t(locale, "deleted"))).await?;
        Ok(())
    }

    /// Registers a new supplier. Duplicate names are allowed.
    #[poise::command(slash_command, rename = "supplier_add")]
    pub async fn manage_supplier_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Supplier name"] name: String,
    ) -> Result<()> {
        let mut store = ctx.data().store.lock().await;
        let locale = store.locale();

        let added = match editor::register_supplier(&mut store, &Role::Manager, &name).await {
            Ok(added) => added,
            Err(e) => return reply_error(ctx, locale, e).await,
        };
        let count = store.suppliers().len();
        drop(store);

        ctx.say(format!(
            "✅ {}: **{}** ({}: {count})",
            t(locale, "addSupplier"),
            added.name,
            t(locale, "suppliersCount")
        ))
        .await?;
        Ok(())
    }

    /// Lists suppliers with how many orders each currently holds.
    #[poise::command(slash_command, rename = "suppliers")]
    pub async fn manage_suppliers(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let store = ctx.data().store.lock().await;
        let locale = store.locale();

        let fields: Vec<(String, String, bool)> = store
            .suppliers()
            .iter()
            .take(25)
            .map(|s| {
                let assigned = store.orders_for_supplier(&s.id).len();
                (s.name.clone(), format!("{}: {assigned}", t(locale, "orders")), true)
            })
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title(format!(
                "**{}** ({})",
                t(locale, "suppliersCount"),
                store.suppliers().len()
            ))
            .color(0x0010_B981)
            .fields(fields);
        drop(store);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
