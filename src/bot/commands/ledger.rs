//! Ledger Discord commands - read-only views of sales, costs, inventory, and contracts.
//!
//! Each command resolves the company from its code, loads the ledger through
//! the core modules, and replies with plain text.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::input::find_company, handlers::autocomplete},
        core::{contract, cost, fixed_cost, inventory, money, period::MonthKey, sale},
        entities::{cost as cost_entity, fixed_cost as fixed_cost_entity, sale as sale_entity},
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Rows listed per reply, keeping messages under Discord's size limit.
    const MAX_ROWS: usize = 15;

    fn more_rows_note(out: &mut String, total: usize) {
        if total > MAX_ROWS {
            let _ = writeln!(out, "  … e mais {}", total - MAX_ROWS);
        }
    }

    /// One line per recent sale: date, order, status, total, and what is still owed.
    #[must_use]
    pub fn format_recent_sales(sales: &[sale_entity::Model]) -> String {
        let mut out = String::from("**Últimas vendas**\n");
        for item in sales.iter().take(MAX_ROWS) {
            let _ = write!(
                out,
                "  #{} {} {} [{}] {}",
                item.id,
                item.sale_date.format("%d/%m/%Y"),
                item.order_number,
                item.status.label(),
                money::format_money(item.total_price)
            );
            let receivable = sale::remaining_receivable(item);
            if sale::is_cash_payment(item) {
                out.push_str(" (à vista)");
            } else if !receivable.is_zero() {
                let _ = write!(out, " (a receber {})", money::format_money(receivable));
            }
            out.push('\n');
        }
        more_rows_note(&mut out, sales.len());
        out
    }

    /// Fixed costs with their active range, plus what is due in `month`.
    #[must_use]
    pub fn format_fixed_costs(costs: &[fixed_cost_entity::Model], month: MonthKey) -> String {
        let mut out = format!(
            "**Custos Fixos** ({})\nTotal em {month}: {}\n",
            costs.len(),
            money::format_money(fixed_cost::total_monthly_value(costs, month))
        );
        for item in costs.iter().take(MAX_ROWS) {
            let _ = writeln!(
                out,
                "  #{} {} [{}] {}/mês, {} a {}{}",
                item.id,
                item.name,
                item.category,
                money::format_money(item.monthly_value),
                fixed_cost::start_month(item),
                fixed_cost::end_month(item),
                if fixed_cost::is_active_in(item, month) {
                    " ✅"
                } else {
                    ""
                }
            );
        }
        more_rows_note(&mut out, costs.len());
        out
    }

    /// Latest variable costs, newest first.
    #[must_use]
    pub fn format_recent_costs(costs: &[cost_entity::Model]) -> String {
        let mut out = String::from("**Últimos lançamentos**\n");
        for item in costs.iter().take(MAX_ROWS) {
            let _ = writeln!(
                out,
                "  #{} {} [{}] {}: {}",
                item.id,
                item.cost_date.format("%d/%m/%Y"),
                item.category,
                item.description,
                money::format_money(item.amount)
            );
        }
        more_rows_note(&mut out, costs.len());
        out
    }

    /// Shows completed vs pending sales of a company and the latest orders.
    #[poise::command(slash_command, prefix_command)]
    pub async fn sales(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Company code"]
        #[autocomplete = "autocomplete::autocomplete_company_code"]
        company_code: String,
    ) -> Result<()> {
        let Some(company) = find_company(ctx, &company_code).await? else {
            return Ok(());
        };
        let db = &ctx.data().database;

        let overview = sale::sales_overview(db, company.id).await?;
        let recent = sale::list_sales_for_company(db, company.id).await?;

        let mut response = format!("🧾 **{}**\n\n", company.name);
        response.push_str(&sale::format_sales_overview(&overview));
        if !recent.is_empty() {
            response.push('\n');
            response.push_str(&format_recent_sales(&recent));
        }

        ctx.say(response).await?;
        Ok(())
    }

    /// Lists fixed costs of a company and the total due this month.
    #[poise::command(slash_command, prefix_command)]
    pub async fn fixed_costs(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Company code"]
        #[autocomplete = "autocomplete::autocomplete_company_code"]
        company_code: String,
    ) -> Result<()> {
        let Some(company) = find_company(ctx, &company_code).await? else {
            return Ok(());
        };

        let costs =
            fixed_cost::list_fixed_costs_for_company(&ctx.data().database, company.id).await?;
        let this_month = MonthKey::from_date(chrono::Local::now().date_naive());

        ctx.say(format!(
            "🏢 **{}**\n\n{}",
            company.name,
            format_fixed_costs(&costs, this_month)
        ))
        .await?;
        Ok(())
    }

    /// Shows the variable cost ledger of a company by category.
    #[poise::command(slash_command, prefix_command)]
    pub async fn costs(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Company code"]
        #[autocomplete = "autocomplete::autocomplete_company_code"]
        company_code: String,
    ) -> Result<()> {
        let Some(company) = find_company(ctx, &company_code).await? else {
            return Ok(());
        };

        let entries = cost::list_costs_for_company(&ctx.data().database, company.id).await?;
        let overview = cost::build_costs_overview(&entries);

        let mut response = format!(
            "💸 **{}**\n\n{}",
            company.name,
            cost::format_costs_overview(&overview)
        );
        if !entries.is_empty() {
            response.push('\n');
            response.push_str(&format_recent_costs(&entries));
        }
        ctx.say(response).await?;
        Ok(())
    }

    /// Shows the stock of a company and its total value.
    #[poise::command(slash_command, prefix_command)]
    pub async fn inventory(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Company code"]
        #[autocomplete = "autocomplete::autocomplete_company_code"]
        company_code: String,
    ) -> Result<()> {
        let Some(company) = find_company(ctx, &company_code).await? else {
            return Ok(());
        };

        let items = inventory::list_inventory(&ctx.data().database, company.id).await?;
        let overview = inventory::build_inventory_overview(&items);
        let shown = &items[..items.len().min(MAX_ROWS)];

        let mut response = format!(
            "📦 **{}**\n\n{}",
            company.name,
            inventory::format_inventory(shown, &overview)
        );
        more_rows_note(&mut response, items.len());

        ctx.say(response).await?;
        Ok(())
    }

    /// Shows the contracts of a company and their monthly net value.
    #[poise::command(slash_command, prefix_command)]
    pub async fn contracts(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Company code"]
        #[autocomplete = "autocomplete::autocomplete_company_code"]
        company_code: String,
    ) -> Result<()> {
        let Some(company) = find_company(ctx, &company_code).await? else {
            return Ok(());
        };

        let list = contract::list_contracts(&ctx.data().database, company.id).await?;
        let overview = contract::build_contracts_overview(&list);
        let shown = &list[..list.len().min(MAX_ROWS)];

        let mut response = format!(
            "📄 **{}**\n\n{}",
            company.name,
            contract::format_contracts(shown, &overview)
        );
        more_rows_note(&mut response, list.len());

        ctx.say(response).await?;
        Ok(())
    }

}

// Re-export all commands
pub use inner::*;
