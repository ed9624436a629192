//! Stock and contract Discord commands - the `/stock` and `/contract` groups.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::input::{find_company, parse_date_or, reply_or_fail},
            handlers::autocomplete,
        },
        core::{
            contract::{self, NewContract},
            inventory::{self, NewInventoryItem},
            money,
        },
        errors::{Error, Result},
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn non_blank(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.trim().is_empty())
    }

    /// Parent command for managing stock.
    #[poise::command(
        slash_command,
        rename = "stock",
        subcommands("stock_add", "stock_set", "stock_delete")
    )]
    pub async fn stock_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(
            "Comandos de estoque:\n\
            `/stock add` - Adiciona um produto ao estoque\n\
            `/stock set` - Atualiza a quantidade\n\
            `/stock delete` - Remove um produto",
        )
        .await?;
        Ok(())
    }

    /// Adds a product to a company's stock.
    #[poise::command(slash_command, rename = "add")]
    pub async fn stock_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Company code"]
        #[autocomplete = "autocomplete::autocomplete_company_code"]
        company_code: String,
        #[description = "Product name"] product_name: String,
        #[description = "Units in stock"] quantity: i32,
        #[description = "Cost per unit (e.g. 89,90)"] unit_cost: String,
        #[description = "Where it is kept"] location: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let Some(company) = find_company(ctx, &company_code).await? else {
            return Ok(());
        };
        let unit_cost = match money::parse_amount(&unit_cost) {
            Ok(value) => value,
            Err(e) => return reply_or_fail(ctx, e).await,
        };

        let new_item = NewInventoryItem {
            company_id: company.id,
            product_name,
            quantity,
            unit_cost,
            location: non_blank(location),
            notes: non_blank(notes),
        };

        match inventory::create_inventory_item(&ctx.data().database, new_item).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Item **#{}** {}: {} un. x {} = {}.",
                    created.id,
                    created.product_name,
                    created.quantity,
                    money::format_money(created.unit_cost),
                    money::format_money(created.total_value)
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Sets the number of units of a stock item.
    #[poise::command(slash_command, rename = "set")]
    pub async fn stock_set(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item id (shown as #id in /inventory)"] item_id: i64,
        #[description = "New number of units"] quantity: i32,
    ) -> Result<()> {
        match inventory::update_inventory_quantity(&ctx.data().database, item_id, quantity).await {
            Ok(updated) => {
                ctx.say(format!(
                    "✅ Item **#{}** {}: {} un., valor {}.",
                    updated.id,
                    updated.product_name,
                    updated.quantity,
                    money::format_money(updated.total_value)
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Removes a product from stock.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn stock_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item id (shown as #id in /inventory)"] item_id: i64,
    ) -> Result<()> {
        match inventory::delete_inventory_item(&ctx.data().database, item_id).await {
            Ok(()) => {
                ctx.say(format!("✅ Item **#{item_id}** removido do estoque."))
                    .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Parses the monetary and date options of `/contract add`.
    ///
    /// A missing discount is zero; a missing start date is `today`.
    pub fn contract_values(
        monthly_value: &str,
        discount: Option<&str>,
        start_date: Option<&str>,
        today: NaiveDate,
    ) -> Result<(Decimal, Decimal, NaiveDate)> {
        let monthly_value = money::parse_amount(monthly_value)?;
        let discount = match discount.map(str::trim).filter(|d| !d.is_empty()) {
            Some(text) => money::parse_amount(text)?,
            None => Decimal::ZERO,
        };
        Ok((monthly_value, discount, parse_date_or(start_date, today)?))
    }

    /// Parent command for managing contracts.
    #[poise::command(
        slash_command,
        rename = "contract",
        subcommands("contract_add", "contract_delete")
    )]
    pub async fn contract_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(
            "Comandos de contratos:\n\
            `/contract add` - Registra um contrato\n\
            `/contract delete` - Exclui um contrato",
        )
        .await?;
        Ok(())
    }

    /// Registers a recurring contract.
    #[poise::command(slash_command, rename = "add")]
    pub async fn contract_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Company code"]
        #[autocomplete = "autocomplete::autocomplete_company_code"]
        company_code: String,
        #[description = "Contract name"] name: String,
        #[description = "Gross monthly value (e.g. 2.500,00)"] monthly_value: String,
        #[description = "Monthly discount (defaults to 0)"] discount: Option<String>,
        #[description = "Billing start dd/mm/aaaa (defaults to today)"] start_date: Option<String>,
        #[description = "Description"] description: Option<String>,
    ) -> Result<()> {
        let Some(company) = find_company(ctx, &company_code).await? else {
            return Ok(());
        };

        let today = chrono::Local::now().date_naive();
        let parsed = contract_values(
            &monthly_value,
            discount.as_deref(),
            start_date.as_deref(),
            today,
        );
        let (monthly_value, discount, start_date) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => return reply_or_fail(ctx, e).await,
        };

        let new_contract = NewContract {
            company_id: company.id,
            name,
            monthly_value,
            discount,
            start_date,
            description: non_blank(description),
        };

        match contract::create_contract(&ctx.data().database, new_contract).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Contrato **#{}** {}: {}/mês líquido.",
                    created.id,
                    created.name,
                    money::format_money(created.monthly_value - created.discount)
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Deletes a contract.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn contract_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Contract id (shown as #id in /contracts)"] contract_id: i64,
    ) -> Result<()> {
        match contract::delete_contract(&ctx.data().database, contract_id).await {
            Ok(()) => {
                ctx.say(format!("✅ Contrato **#{contract_id}** excluído."))
                    .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

}

// Re-export all commands
pub use inner::*;
