//! Commission and profitability dashboard.
//!
//! [`load_dashboard_input`] gathers everything a report needs for one company
//! and period, and [`aggregate`] turns that immutable snapshot into a
//! [`DashboardReport`]. Aggregation never touches the database, so the same
//! input always yields the same report.
//!
//! Loading is best-effort: a read that fails is logged and treated as empty,
//! and the dashboard is still rendered with whatever could be read.

use crate::{
    core::{
        fixed_cost, money,
        period::ReportPeriod,
        sale, sale_cost, salesperson,
        summary::{self, SalespersonMonthSummary},
    },
    entities::{
        SaleStatus, fixed_cost as fixed_cost_entity, sale as sale_entity,
        sale_cost as sale_cost_entity, salesperson as salesperson_entity,
    },
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, error, instrument};

/// Everything the aggregation reads, loaded ahead of time.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardInput {
    /// Company being reported on
    pub company_id: i64,
    /// Selected year and months
    pub period: ReportPeriod,
    /// Completed sales in the period
    pub sales: Vec<sale_entity::Model>,
    /// Costs attached to those sales
    pub sale_costs: Vec<sale_cost_entity::Model>,
    /// Every fixed cost of the company, regardless of dates
    pub fixed_costs: Vec<fixed_cost_entity::Model>,
    /// Active salespersons
    pub roster: Vec<salesperson_entity::Model>,
    /// Per-salesperson, per-month summary rows for the period
    pub summary: Vec<SalespersonMonthSummary>,
}

/// One roster member's line in the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalespersonCommission {
    /// Salesperson id
    pub salesperson_id: i64,
    /// Display name
    pub name: String,
    /// Default percentage from the roster. Each sale's commission uses the
    /// percentage recorded on that sale, which may differ.
    pub commission_percentage: Decimal,
    /// Completed sales credited in the period
    pub sales_count: u64,
    /// Revenue credited
    pub total_sales: Decimal,
    /// Sale costs credited
    pub total_cost: Decimal,
    /// `total_sales - total_cost`
    pub net_profit: Decimal,
    /// Commission owed
    pub commission: Decimal,
}

impl SalespersonCommission {
    /// Average revenue per sale, zero without sales.
    #[must_use]
    pub fn average_sale(&self) -> Decimal {
        money::safe_average(self.total_sales, self.sales_count)
    }

    /// [`Self::average_sale`] formatted for display (`"0,00"` without sales).
    #[must_use]
    pub fn average_sale_display(&self) -> String {
        money::format_brl(self.average_sale())
    }
}

/// Company totals and the per-salesperson breakdown for a period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    /// Revenue of completed sales
    pub total_revenue: Decimal,
    /// Costs attached to those sales
    pub total_sale_costs: Decimal,
    /// Fixed costs prorated over the selected months
    pub total_fixed_costs: Decimal,
    /// `total_revenue - total_sale_costs - total_fixed_costs`
    pub net_profit: Decimal,
    /// Commissions of salespersons with a positive roster percentage
    pub total_commissions: Decimal,
    /// Salespersons with at least one sale
    pub active_sellers: usize,
    /// One entry per roster member, ordered by name
    pub salespersons: Vec<SalespersonCommission>,
}

/// Computes the dashboard from a loaded snapshot.
#[must_use]
pub fn aggregate(input: &DashboardInput) -> DashboardReport {
    let period = &input.period;

    let window: Vec<&sale_entity::Model> = input
        .sales
        .iter()
        .filter(|s| {
            s.company_id == input.company_id
                && s.status == SaleStatus::Completed
                && period.contains(s.sale_date)
        })
        .collect();
    let window_ids: HashSet<i64> = window.iter().map(|s| s.id).collect();

    let total_revenue: Decimal = window.iter().map(|s| s.total_price).sum();
    let total_sale_costs: Decimal = input
        .sale_costs
        .iter()
        .filter(|c| window_ids.contains(&c.sale_id))
        .map(|c| c.amount)
        .sum();
    let company_fixed: Vec<fixed_cost_entity::Model> = input
        .fixed_costs
        .iter()
        .filter(|c| c.company_id == input.company_id)
        .cloned()
        .collect();
    let total_fixed_costs = fixed_cost::prorated_total(&company_fixed, period);

    let mut salespersons: Vec<SalespersonCommission> = input
        .roster
        .iter()
        .map(|person| roster_line(person, &input.summary))
        .collect();
    salespersons.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then(a.salesperson_id.cmp(&b.salesperson_id))
    });

    let total_commissions = salespersons
        .iter()
        .filter(|p| p.commission_percentage > Decimal::ZERO)
        .map(|p| p.commission)
        .sum();
    let active_sellers = salespersons.iter().filter(|p| p.sales_count > 0).count();

    DashboardReport {
        total_revenue,
        total_sale_costs,
        total_fixed_costs,
        net_profit: total_revenue - total_sale_costs - total_fixed_costs,
        total_commissions,
        active_sellers,
        salespersons,
    }
}

fn roster_line(
    person: &salesperson_entity::Model,
    rows: &[SalespersonMonthSummary],
) -> SalespersonCommission {
    let mut line = SalespersonCommission {
        salesperson_id: person.id,
        name: person.name.clone(),
        commission_percentage: person.commission_percentage,
        sales_count: 0,
        total_sales: Decimal::ZERO,
        total_cost: Decimal::ZERO,
        net_profit: Decimal::ZERO,
        commission: Decimal::ZERO,
    };
    for row in rows.iter().filter(|r| r.salesperson_id == person.id) {
        line.sales_count += row.sales_count;
        line.total_sales += row.total_sales;
        line.total_cost += row.total_costs;
        line.net_profit += row.net_profit;
        line.commission += row.total_commission;
    }
    line
}

fn or_empty<T>(result: Result<Vec<T>>, what: &str, company_id: i64) -> Vec<T> {
    result.unwrap_or_else(|e| {
        error!("Failed to load {} for company {}: {}", what, company_id, e);
        Vec::new()
    })
}

/// Reads the dashboard snapshot for a company and period.
///
/// Independent reads run concurrently; sale costs follow once the sale ids are
/// known. Never fails: unreadable collections come back empty.
#[instrument(skip(db))]
pub async fn load_dashboard_input(
    db: &DatabaseConnection,
    company_id: i64,
    period: &ReportPeriod,
) -> DashboardInput {
    let (sales, fixed_costs, roster, summary_rows) = tokio::join!(
        sale::list_completed_sales_in_period(db, company_id, period),
        fixed_cost::list_fixed_costs_for_company(db, company_id),
        salesperson::get_active_roster(db, company_id),
        summary::fetch_salesperson_summary(db, company_id, period),
    );

    let sales = or_empty(sales, "sales", company_id);
    let sale_ids: Vec<i64> = sales.iter().map(|s| s.id).collect();
    let sale_costs = or_empty(
        sale_cost::list_costs_for_sales(db, &sale_ids).await,
        "sale costs",
        company_id,
    );

    let input = DashboardInput {
        company_id,
        period: period.clone(),
        sales,
        sale_costs,
        fixed_costs: or_empty(fixed_costs, "fixed costs", company_id),
        roster: or_empty(roster, "salesperson roster", company_id),
        summary: or_empty(summary_rows, "salesperson summary", company_id),
    };
    debug!(
        "Loaded {} sales, {} fixed costs, {} salespersons",
        input.sales.len(),
        input.fixed_costs.len(),
        input.roster.len()
    );
    input
}

/// Loads and aggregates the dashboard in one call.
pub async fn load_dashboard(
    db: &DatabaseConnection,
    company_id: i64,
    period: &ReportPeriod,
) -> DashboardReport {
    aggregate(&load_dashboard_input(db, company_id, period).await)
}

/// Formats a report for display.
#[must_use]
pub fn format_dashboard(
    company_name: &str,
    period: &ReportPeriod,
    report: &DashboardReport,
) -> String {
    use std::fmt::Write;

    let mut out = format!("📊 **{company_name}** - {period}\n\n");
    let _ = writeln!(out, "Receita: {}", money::format_money(report.total_revenue));
    let _ = writeln!(
        out,
        "Custos das vendas: {}",
        money::format_money(report.total_sale_costs)
    );
    let _ = writeln!(
        out,
        "Custos fixos: {}",
        money::format_money(report.total_fixed_costs)
    );
    let _ = writeln!(out, "Lucro líquido: {}", money::format_money(report.net_profit));
    let _ = writeln!(
        out,
        "Comissões: {}",
        money::format_money(report.total_commissions)
    );
    let _ = writeln!(out, "Vendedores ativos: {}", report.active_sellers);

    if report.salespersons.is_empty() {
        out.push_str("\nNenhum vendedor ativo.\n");
        return out;
    }

    out.push_str("\n**Vendedores**\n");
    for person in &report.salespersons {
        let _ = writeln!(
            out,
            "• {} (padrão {}%): {} vendas, total {}, média {}, lucro {}, comissão {}",
            person.name,
            person.commission_percentage.normalize(),
            person.sales_count,
            money::format_money(person.total_sales),
            person.average_sale_display(),
            money::format_money(person.net_profit),
            money::format_money(person.commission)
        );
    }
    out
}
