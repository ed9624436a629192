//! Expense Discord commands - the `/fixed_cost` and `/cost` groups.
//!
//! Fixed costs recur monthly over a span of months; variable costs are one-off
//! payments. Both are listed with their ids by `/fixed_costs` and `/costs`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::input::{find_company, parse_date, parse_date_or, reply_or_fail},
            handlers::autocomplete,
        },
        core::{
            cost::{self, NewCost},
            fixed_cost::{self, NewFixedCost},
            money,
        },
        errors::{Error, Result},
    };

    fn non_blank(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.trim().is_empty())
    }

    /// Parent command for managing fixed costs.
    #[poise::command(
        slash_command,
        rename = "fixed_cost",
        subcommands("fixed_cost_add", "fixed_cost_delete")
    )]
    pub async fn fixed_cost_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(
            "Comandos de custos fixos:\n\
            `/fixed_cost add` - Registra um custo fixo mensal\n\
            `/fixed_cost delete` - Exclui um custo fixo",
        )
        .await?;
        Ok(())
    }

    /// Registers a cost paid every month for a number of months.
    #[poise::command(slash_command, rename = "add")]
    pub async fn fixed_cost_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Company code"]
        #[autocomplete = "autocomplete::autocomplete_company_code"]
        company_code: String,
        #[description = "Name (e.g. Aluguel)"] name: String,
        #[description = "Category"] category: String,
        #[description = "Amount per month (e.g. 1.200,00)"] monthly_value: String,
        #[description = "First month, any day of it (dd/mm/aaaa)"] start_date: String,
        #[description = "Number of months"] months: i32,
        #[description = "Description"] description: Option<String>,
    ) -> Result<()> {
        let Some(company) = find_company(ctx, &company_code).await? else {
            return Ok(());
        };

        let parsed = money::parse_amount(&monthly_value)
            .and_then(|value| Ok((value, parse_date(&start_date)?)));
        let (monthly_value, start_date) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => return reply_or_fail(ctx, e).await,
        };

        let new_cost = NewFixedCost {
            company_id: company.id,
            name,
            category,
            monthly_value,
            start_date,
            qtd_months: months,
            description: non_blank(description),
        };

        match fixed_cost::create_fixed_cost(&ctx.data().database, new_cost).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Custo fixo **#{}** {} de {}/mês, {} a {}.",
                    created.id,
                    created.name,
                    money::format_money(created.monthly_value),
                    fixed_cost::start_month(&created),
                    fixed_cost::end_month(&created)
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Deletes a fixed cost.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn fixed_cost_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Fixed cost id (shown as #id in /fixed_costs)"] cost_id: i64,
    ) -> Result<()> {
        match fixed_cost::delete_fixed_cost(&ctx.data().database, cost_id).await {
            Ok(()) => {
                ctx.say(format!("✅ Custo fixo **#{cost_id}** excluído."))
                    .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Parent command for managing variable costs.
    #[poise::command(
        slash_command,
        rename = "cost",
        subcommands("cost_add", "cost_delete")
    )]
    pub async fn cost_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(
            "Comandos de custos variáveis:\n\
            `/cost add` - Registra um pagamento\n\
            `/cost delete` - Exclui um lançamento",
        )
        .await?;
        Ok(())
    }

    /// Records a one-off payment.
    #[poise::command(slash_command, rename = "add")]
    pub async fn cost_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Company code"]
        #[autocomplete = "autocomplete::autocomplete_company_code"]
        company_code: String,
        #[description = "Category (e.g. Marketing)"] category: String,
        #[description = "What was paid for"] description: String,
        #[description = "Amount (e.g. 350,00)"] amount: String,
        #[description = "Payment date dd/mm/aaaa (defaults to today)"] cost_date: Option<String>,
        #[description = "Payment method (e.g. PIX, Boleto)"] payment_method: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let Some(company) = find_company(ctx, &company_code).await? else {
            return Ok(());
        };

        let today = chrono::Local::now().date_naive();
        let parsed = money::parse_amount(&amount)
            .and_then(|value| Ok((value, parse_date_or(cost_date.as_deref(), today)?)));
        let (amount, cost_date) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => return reply_or_fail(ctx, e).await,
        };

        let new_cost = NewCost {
            company_id: company.id,
            category,
            description,
            amount,
            cost_date,
            payment_method: non_blank(payment_method),
            notes: non_blank(notes),
        };

        match cost::create_cost(&ctx.data().database, new_cost).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Lançamento **#{}** [{}] {}: {} em {}.",
                    created.id,
                    created.category,
                    created.description,
                    money::format_money(created.amount),
                    created.cost_date.format("%d/%m/%Y")
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Deletes a variable cost entry.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn cost_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Cost id (shown as #id in /costs)"] cost_id: i64,
    ) -> Result<()> {
        match cost::delete_cost(&ctx.data().database, cost_id).await {
            Ok(()) => {
                ctx.say(format!("✅ Lançamento **#{cost_id}** excluído."))
                    .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }
}

// Re-export all commands
pub use inner::*;
