//! Sale Discord commands - the `/sale` group.
//!
//! Records sales with their items and salespersons, flips their status and
//! payment status, attaches extra costs, and deletes them.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::input::{
                find_company, parse_date_or, parse_items, parse_sellers, reply_or_fail,
            },
            handlers::autocomplete,
        },
        core::{money, sale, sale_cost, salesperson},
        entities::{
            PaymentStatus, SaleStatus, sale as sale_entity, sale_cost as sale_cost_entity,
            sale_item as sale_item_entity, sale_salesperson as sale_salesperson_entity,
            salesperson as salesperson_entity,
        },
        errors::{Error, Result},
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::fmt::Write;

    /// Raw `/sale add` options, before parsing.
    #[derive(Debug, Default)]
    pub struct SaleArgs<'a> {
        pub order_number: &'a str,
        pub items: &'a str,
        pub sale_date: Option<&'a str>,
        pub customer_name: Option<&'a str>,
        pub entry_value: Option<&'a str>,
        pub sellers: Option<&'a str>,
        pub completed: bool,
        pub paid: bool,
        pub notes: Option<&'a str>,
    }

    fn non_blank(value: Option<&str>) -> Option<String> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Turns `/sale add` options into a [`sale::NewSale`].
    ///
    /// Sellers are looked up in `roster`; the date defaults to `today`.
    pub fn new_sale_from_args(
        company_id: i64,
        args: &SaleArgs<'_>,
        roster: &[salesperson_entity::Model],
        today: NaiveDate,
    ) -> Result<sale::NewSale> {
        let entry_value = match non_blank(args.entry_value) {
            Some(text) => money::parse_amount(&text)?,
            None => Decimal::ZERO,
        };
        let sellers = match args.sellers {
            Some(text) => parse_sellers(text, roster)?,
            None => Vec::new(),
        };

        Ok(sale::NewSale {
            company_id,
            order_number: args.order_number.trim().to_string(),
            customer_name: non_blank(args.customer_name),
            sale_date: parse_date_or(args.sale_date, today)?,
            status: if args.completed {
                SaleStatus::Completed
            } else {
                SaleStatus::Pending
            },
            payment_status: if args.paid {
                PaymentStatus::Paid
            } else {
                PaymentStatus::Pending
            },
            entry_value,
            notes: non_blank(args.notes),
            items: parse_items(args.items)?,
            sellers,
        })
    }

    /// Items, salespersons and extra costs of one sale.
    #[must_use]
    pub fn format_sale_details(
        sale: &sale_entity::Model,
        items: &[sale_item_entity::Model],
        links: &[sale_salesperson_entity::Model],
        costs: &[sale_cost_entity::Model],
        people: &[salesperson_entity::Model],
    ) -> String {
        let mut out = format!(
            "🧾 **Venda #{}** {} ({})\nData: {}\nTotal: {}\n",
            sale.id,
            sale.order_number,
            sale.status.label(),
            sale.sale_date.format("%d/%m/%Y"),
            money::format_money(sale.total_price)
        );
        if let Some(customer) = &sale.customer_name {
            let _ = writeln!(out, "Cliente: {customer}");
        }
        let _ = writeln!(
            out,
            "Entrada: {} | A receber: {}",
            money::format_money(sale.entry_value),
            money::format_money(sale::remaining_receivable(sale))
        );

        out.push_str("\n**Itens**\n");
        for item in items {
            let _ = writeln!(
                out,
                "  {} x {} @ {}",
                item.quantity,
                item.product_name,
                money::format_money(item.unit_price)
            );
        }

        if !links.is_empty() {
            out.push_str("\n**Vendedores**\n");
            for link in links {
                let name = people
                    .iter()
                    .find(|p| p.id == link.salesperson_id)
                    .map_or("?", |p| p.name.as_str());
                let _ = writeln!(out, "  {name} ({}%)", link.commission_percentage.normalize());
            }
        }

        if !costs.is_empty() {
            let total: Decimal = costs.iter().map(|c| c.amount).sum();
            let _ = writeln!(out, "\n**Custos** ({})", money::format_money(total));
            for item in costs {
                let _ = write!(
                    out,
                    "  #{} {}: {}",
                    item.id,
                    item.cost_type,
                    money::format_money(item.amount)
                );
                if let Some(description) = &item.description {
                    let _ = write!(out, " ({description})");
                }
                out.push('\n');
            }
        }
        out
    }

    /// Parent command for recording and changing sales.
    #[poise::command(
        slash_command,
        rename = "sale",
        subcommands(
            "sale_add",
            "sale_details",
            "sale_toggle",
            "sale_pay",
            "sale_delete",
            "sale_add_cost",
            "sale_remove_cost"
        )
    )]
    pub async fn sale_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Comandos de vendas:\n\
            `/sale add` - Registra uma venda\n\
            `/sale details` - Mostra itens, vendedores e custos\n\
            `/sale toggle` - Alterna entre pendente e concluída\n\
            `/sale pay` - Marca como paga ou pendente\n\
            `/sale delete` - Exclui uma venda\n\
            `/sale add_cost` / `/sale remove_cost` - Custos da venda";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Records a sale with its items and salespersons.
    #[poise::command(slash_command, rename = "add")]
    pub async fn sale_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Company code"]
        #[autocomplete = "autocomplete::autocomplete_company_code"]
        company_code: String,
        #[description = "Order number"] order_number: String,
        #[description = "Items as produto:qtd:preço; separated by ; (e.g. Sofá:2:1500; Mesa:300)"]
        items: String,
        #[description = "Sale date dd/mm/aaaa (defaults to today)"] sale_date: Option<String>,
        #[description = "Customer name"] customer: Option<String>,
        #[description = "Paid at signing (defaults to 0)"] entry_value: Option<String>,
        #[description = "Salespersons as nome or nome:%; separated by ; (e.g. Ana; Bruno:7,5)"]
        sellers: Option<String>,
        #[description = "Already completed? (default: pending)"] completed: Option<bool>,
        #[description = "Fully paid? (default: no)"] paid: Option<bool>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let Some(company) = find_company(ctx, &company_code).await? else {
            return Ok(());
        };
        let db = &ctx.data().database;

        let roster = salesperson::get_active_roster(db, company.id).await?;
        let args = SaleArgs {
            order_number: &order_number,
            items: &items,
            sale_date: sale_date.as_deref(),
            customer_name: customer.as_deref(),
            entry_value: entry_value.as_deref(),
            sellers: sellers.as_deref(),
            completed: completed.unwrap_or(false),
            paid: paid.unwrap_or(false),
            notes: notes.as_deref(),
        };
        let today = chrono::Local::now().date_naive();

        let new_sale = match new_sale_from_args(company.id, &args, &roster, today) {
            Ok(new_sale) => new_sale,
            Err(e) => return reply_or_fail(ctx, e).await,
        };
        let seller_count = new_sale.sellers.len();

        match sale::create_sale(db, new_sale).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Venda **#{}** ({}) registrada em {}: {} ({}), {} vendedor(es).",
                    created.id,
                    created.order_number,
                    company.name,
                    money::format_money(created.total_price),
                    created.status.label(),
                    seller_count
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Shows the items, salespersons, and extra costs of a sale.
    #[poise::command(slash_command, rename = "details")]
    pub async fn sale_details(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Sale id (shown as #id in /sales)"] sale_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(found) = sale::get_sale_by_id(db, sale_id).await? else {
            return reply_or_fail(ctx, Error::SaleNotFound { id: sale_id }).await;
        };

        let items = sale::get_sale_items(db, sale_id).await?;
        let links = sale::get_sale_salespersons(db, sale_id).await?;
        let costs = sale_cost::list_costs_for_sale(db, sale_id).await?;
        let people = salesperson::list_salespersons(db, found.company_id).await?;

        ctx.say(format_sale_details(&found, &items, &links, &costs, &people))
            .await?;
        Ok(())
    }

    /// Switches a sale between pending and completed.
    #[poise::command(slash_command, rename = "toggle")]
    pub async fn sale_toggle(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Sale id (shown as #id in /sales)"] sale_id: i64,
    ) -> Result<()> {
        match sale::toggle_sale_status(&ctx.data().database, sale_id).await {
            Ok(updated) => {
                ctx.say(format!(
                    "✅ Venda **#{}** agora está **{}**.",
                    updated.id,
                    updated.status.label()
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Marks a sale as fully paid, or back to pending payment.
    #[poise::command(slash_command, rename = "pay")]
    pub async fn sale_pay(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Sale id (shown as #id in /sales)"] sale_id: i64,
        #[description = "Paid? (default: yes)"] paid: Option<bool>,
    ) -> Result<()> {
        let status = if paid.unwrap_or(true) {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        };

        match sale::set_payment_status(&ctx.data().database, sale_id, status).await {
            Ok(updated) => {
                ctx.say(format!(
                    "✅ Venda **#{}**: pagamento {}, a receber {}.",
                    updated.id,
                    if status == PaymentStatus::Paid {
                        "pago"
                    } else {
                        "pendente"
                    },
                    money::format_money(sale::remaining_receivable(&updated))
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Deletes a sale together with its items, salespersons, and costs.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn sale_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Sale id (shown as #id in /sales)"] sale_id: i64,
    ) -> Result<()> {
        match sale::delete_sale(&ctx.data().database, sale_id).await {
            Ok(()) => {
                ctx.say(format!("✅ Venda **#{sale_id}** excluída."))
                    .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Attaches an extra cost (freight, assembly, ...) to a sale.
    #[poise::command(slash_command, rename = "add_cost")]
    pub async fn sale_add_cost(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Sale id (shown as #id in /sales)"] sale_id: i64,
        #[description = "Cost type (e.g. Frete, Montagem)"] cost_type: String,
        #[description = "Amount (e.g. 150,00)"] amount: String,
        #[description = "Description"] description: Option<String>,
    ) -> Result<()> {
        let amount = match money::parse_amount(&amount) {
            Ok(amount) => amount,
            Err(e) => return reply_or_fail(ctx, e).await,
        };
        let db = &ctx.data().database;

        let description = non_blank(description.as_deref());
        match sale_cost::add_sale_cost(db, sale_id, cost_type, description, amount).await {
            Ok(created) => {
                let total = sale_cost::total_cost_for_sale(db, sale_id).await?;
                ctx.say(format!(
                    "✅ Custo **#{}** ({}) de {} adicionado à venda #{}. Custos da venda: {}.",
                    created.id,
                    created.cost_type,
                    money::format_money(created.amount),
                    sale_id,
                    money::format_money(total)
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Removes an extra cost from a sale.
    #[poise::command(slash_command, rename = "remove_cost")]
    pub async fn sale_remove_cost(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Cost id (shown as #id in /sale details)"] cost_id: i64,
    ) -> Result<()> {
        match sale_cost::delete_sale_cost(&ctx.data().database, cost_id).await {
            Ok(()) => {
                ctx.say(format!("✅ Custo **#{cost_id}** removido."))
                    .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    #[cfg(test)]
    mod tests {
        #![allow(clippy::unwrap_used)]
        use super::*;
        use crate::test_utils::*;
        use rust_decimal_macros::dec;

        fn today() -> NaiveDate {
            NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
        }

        #[test]
        fn test_new_sale_from_args_defaults() {
            let roster = vec![salesperson_fixture(1, "Ana", dec!(10), true)];
            let args = SaleArgs {
                order_number: " PED-9 ",
                items: "Sofá:2:1.500,00; Mesa:300",
                sellers: Some("ana"),
                ..SaleArgs::default()
            };

            let new_sale = new_sale_from_args(4, &args, &roster, today()).unwrap();
            assert_eq!(new_sale.company_id, 4);
            assert_eq!(new_sale.order_number, "PED-9");
            assert_eq!(new_sale.sale_date, today());
            assert_eq!(new_sale.status, SaleStatus::Pending);
            assert_eq!(new_sale.payment_status, PaymentStatus::Pending);
            assert_eq!(new_sale.entry_value, Decimal::ZERO);
            assert_eq!(new_sale.total_price(), dec!(3300));
            assert_eq!(new_sale.sellers.len(), 1);
            assert_eq!(new_sale.sellers[0].commission_percentage, dec!(10));
            assert!(new_sale.customer_name.is_none());
        }

        #[test]
        fn test_new_sale_from_args_reports_bad_input() {
            let args = SaleArgs {
                order_number: "PED-1",
                items: "Sofá:1:100",
                entry_value: Some("muito"),
                ..SaleArgs::default()
            };
            let err = new_sale_from_args(1, &args, &[], today()).unwrap_err();
            assert!(err.is_user_error());

            let args = SaleArgs {
                order_number: "PED-1",
                items: "Sofá:1:100",
                sellers: Some("Desconhecido"),
                ..SaleArgs::default()
            };
            assert!(matches!(
                new_sale_from_args(1, &args, &[], today()),
                Err(Error::Validation { .. })
            ));
        }

        #[tokio::test]
        async fn test_added_sale_can_be_paid_and_detailed() -> Result<()> {
            let db = setup_test_db().await?;
            let company = create_test_company(&db, "acme").await?;
            let ana = create_test_salesperson(&db, company.id, "Ana", dec!(10)).await?;
            let roster = salesperson::get_active_roster(&db, company.id).await?;

            let args = SaleArgs {
                order_number: "PED-7",
                items: "Sofá:1:1.000",
                sale_date: Some("10/01/2026"),
                customer_name: Some("Maria"),
                entry_value: Some("250"),
                sellers: Some("Ana:8"),
                completed: true,
                ..SaleArgs::default()
            };
            let new_sale = new_sale_from_args(company.id, &args, &roster, today())?;
            let created = sale::create_sale(&db, new_sale).await?;
            assert_eq!(sale::remaining_receivable(&created), dec!(750));

            let paid = sale::set_payment_status(&db, created.id, PaymentStatus::Paid).await?;
            assert_eq!(sale::remaining_receivable(&paid), Decimal::ZERO);

            sale_cost::add_sale_cost(&db, created.id, "Frete".to_string(), None, dec!(80))
                .await?;
            let items = sale::get_sale_items(&db, created.id).await?;
            let links = sale::get_sale_salespersons(&db, created.id).await?;
            let costs = sale_cost::list_costs_for_sale(&db, created.id).await?;
            let people = salesperson::list_salespersons(&db, company.id).await?;
            assert_eq!(links[0].salesperson_id, ana.id);

            let text = format_sale_details(&paid, &items, &links, &costs, &people);
            assert!(text.contains("PED-7 (concluída)"));
            assert!(text.contains("Cliente: Maria"));
            assert!(text.contains("A receber: R$ 0,00"));
            assert!(text.contains("1 x Sofá @ R$ 1.000,00"));
            assert!(text.contains("Ana (8%)"));
            assert!(text.contains("**Custos** (R$ 80,00)"));
            Ok(())
        }
    }
}

// Re-export all commands
pub use inner::*;
