//! Per-salesperson, per-month sales summary.
//!
//! This is the aggregation the dashboard consumes for its salesperson
//! breakdown. Only completed sales inside the period are counted.
//!
//! A sale worked by several salespersons is split evenly: each co-seller is
//! credited with one sale and a `1/N` share of the sale's revenue, costs, and
//! net profit. Commission is that net-profit share times the percentage stored
//! on the co-seller's own link to the sale. Completed sales without any linked
//! salesperson count toward company totals only and never appear here.

use crate::{
    core::{money, period::ReportPeriod, sale, sale_cost, salesperson},
    entities::{
        SaleStatus, sale as sale_entity, sale_cost as sale_cost_entity, sale_salesperson,
        salesperson as salesperson_entity,
    },
    errors::Result,
};
use chrono::Datelike;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

/// One salesperson's figures for one month of the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalespersonMonthSummary {
    /// Salesperson credited
    pub salesperson_id: i64,
    /// Salesperson display name
    pub salesperson_name: String,
    /// Zero-based month within the period's year
    pub month: u32,
    /// Completed sales the salesperson took part in
    pub sales_count: u64,
    /// Revenue share
    pub total_sales: Decimal,
    /// Sale-cost share
    pub total_costs: Decimal,
    /// `total_sales - total_costs`
    pub net_profit: Decimal,
    /// Commission owed for the month
    pub total_commission: Decimal,
}

#[derive(Default)]
struct Accumulator {
    sales_count: u64,
    total_sales: Decimal,
    total_costs: Decimal,
    net_profit: Decimal,
    total_commission: Decimal,
}

/// Builds the summary rows from already-loaded records.
///
/// Rows are ordered by salesperson name, then month.
#[must_use]
pub fn summarize_by_salesperson(
    sales: &[sale_entity::Model],
    costs: &[sale_cost_entity::Model],
    links: &[sale_salesperson::Model],
    salespersons: &[salesperson_entity::Model],
    period: &ReportPeriod,
) -> Vec<SalespersonMonthSummary> {
    let mut cost_by_sale: HashMap<i64, Decimal> = HashMap::new();
    for cost in costs {
        *cost_by_sale.entry(cost.sale_id).or_default() += cost.amount;
    }

    let mut links_by_sale: HashMap<i64, Vec<&sale_salesperson::Model>> = HashMap::new();
    for link in links {
        links_by_sale.entry(link.sale_id).or_default().push(link);
    }

    let mut totals: BTreeMap<(i64, u32), Accumulator> = BTreeMap::new();

    for sale in sales
        .iter()
        .filter(|s| s.status == SaleStatus::Completed && period.contains(s.sale_date))
    {
        let Some(sale_links) = links_by_sale.get(&sale.id) else {
            continue;
        };

        let sellers = Decimal::from(sale_links.len());
        let cost = cost_by_sale.get(&sale.id).copied().unwrap_or_default();
        let revenue_share = sale.total_price / sellers;
        let cost_share = cost / sellers;
        let profit_share = (sale.total_price - cost) / sellers;
        let month = sale.sale_date.month0();

        for link in sale_links {
            let acc = totals.entry((link.salesperson_id, month)).or_default();
            acc.sales_count += 1;
            acc.total_sales += revenue_share;
            acc.total_costs += cost_share;
            acc.net_profit += profit_share;
            acc.total_commission +=
                money::apply_percentage(profit_share, link.commission_percentage);
        }
    }

    let names: HashMap<i64, &str> = salespersons
        .iter()
        .map(|p| (p.id, p.name.as_str()))
        .collect();

    let mut rows: Vec<SalespersonMonthSummary> = totals
        .into_iter()
        .map(|((salesperson_id, month), acc)| SalespersonMonthSummary {
            salesperson_id,
            salesperson_name: names
                .get(&salesperson_id)
                .map_or_else(|| format!("Vendedor {salesperson_id}"), |n| (*n).to_string()),
            month,
            sales_count: acc.sales_count,
            total_sales: acc.total_sales,
            total_costs: acc.total_costs,
            net_profit: acc.net_profit,
            total_commission: acc.total_commission,
        })
        .collect();

    rows.sort_by(|a, b| {
        a.salesperson_name
            .cmp(&b.salesperson_name)
            .then(a.month.cmp(&b.month))
            .then(a.salesperson_id.cmp(&b.salesperson_id))
    });
    rows
}

/// Loads everything the summary needs for one company and period, then summarizes it.
#[instrument(skip(db))]
pub async fn fetch_salesperson_summary(
    db: &DatabaseConnection,
    company_id: i64,
    period: &ReportPeriod,
) -> Result<Vec<SalespersonMonthSummary>> {
    let sales = sale::list_completed_sales_in_period(db, company_id, period).await?;
    let sale_ids: Vec<i64> = sales.iter().map(|s| s.id).collect();

    let costs = sale_cost::list_costs_for_sales(db, &sale_ids).await?;
    let links = sale::list_links_for_sales(db, &sale_ids).await?;
    let salespersons = salesperson::list_salespersons(db, company_id).await?;

    let rows = summarize_by_salesperson(&sales, &costs, &links, &salespersons, period);
    debug!(
        "Summarized {} sales into {} salesperson rows",
        sales.len(),
        rows.len()
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_single_seller_gets_full_sale() {
        let period = ReportPeriod::whole_year(2025).unwrap();
        let sales = vec![sale_fixture(1, "2025-03-10", dec!(1000), SaleStatus::Completed)];
        let costs = vec![sale_cost_fixture(1, 1, dec!(200))];
        let links = vec![link_fixture(1, 1, 7, dec!(10))];
        let people = vec![salesperson_fixture(7, "Ana", dec!(10), true)];

        let rows = summarize_by_salesperson(&sales, &costs, &links, &people, &period);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.salesperson_id, 7);
        assert_eq!(row.salesperson_name, "Ana");
        assert_eq!(row.month, 2);
        assert_eq!(row.sales_count, 1);
        assert_eq!(row.total_sales, dec!(1000));
        assert_eq!(row.total_costs, dec!(200));
        assert_eq!(row.net_profit, dec!(800));
        assert_eq!(row.total_commission, dec!(80));
    }

    #[test]
    fn test_co_sellers_split_evenly_with_own_percentage() {
        let period = ReportPeriod::whole_year(2025).unwrap();
        let sales = vec![sale_fixture(1, "2025-05-02", dec!(1000), SaleStatus::Completed)];
        let costs = vec![sale_cost_fixture(1, 1, dec!(200))];
        let links = vec![
            link_fixture(1, 1, 7, dec!(10)),
            link_fixture(2, 1, 8, dec!(5)),
        ];
        let people = vec![
            salesperson_fixture(7, "Ana", dec!(10), true),
            salesperson_fixture(8, "Bruno", dec!(5), true),
        ];

        let rows = summarize_by_salesperson(&sales, &costs, &links, &people, &period);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].salesperson_name, "Ana");
        assert_eq!(rows[0].sales_count, 1);
        assert_eq!(rows[0].total_sales, dec!(500));
        assert_eq!(rows[0].net_profit, dec!(400));
        assert_eq!(rows[0].total_commission, dec!(40));

        assert_eq!(rows[1].salesperson_name, "Bruno");
        assert_eq!(rows[1].total_costs, dec!(100));
        assert_eq!(rows[1].total_commission, dec!(20));
    }

    #[test]
    fn test_pending_and_out_of_period_sales_are_ignored() {
        let period = ReportPeriod::new(2025, [0]).unwrap();
        let sales = vec![
            sale_fixture(1, "2025-01-10", dec!(100), SaleStatus::Pending),
            sale_fixture(2, "2025-02-10", dec!(100), SaleStatus::Completed),
            sale_fixture(3, "2024-01-10", dec!(100), SaleStatus::Completed),
            sale_fixture(4, "2025-01-31", dec!(300), SaleStatus::Completed),
        ];
        let links: Vec<_> = (1..=4).map(|id| link_fixture(id, id, 7, dec!(10))).collect();
        let people = vec![salesperson_fixture(7, "Ana", dec!(10), true)];

        let rows = summarize_by_salesperson(&sales, &[], &links, &people, &period);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sales_count, 1);
        assert_eq!(rows[0].total_sales, dec!(300));
    }

    #[test]
    fn test_rows_are_split_by_month() {
        let period = ReportPeriod::new(2025, [0, 1]).unwrap();
        let sales = vec![
            sale_fixture(1, "2025-01-10", dec!(100), SaleStatus::Completed),
            sale_fixture(2, "2025-02-10", dec!(200), SaleStatus::Completed),
            sale_fixture(3, "2025-02-11", dec!(300), SaleStatus::Completed),
        ];
        let links: Vec<_> = (1..=3).map(|id| link_fixture(id, id, 7, dec!(10))).collect();
        let people = vec![salesperson_fixture(7, "Ana", dec!(10), true)];

        let rows = summarize_by_salesperson(&sales, &[], &links, &people, &period);

        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].month, rows[0].sales_count), (0, 1));
        assert_eq!((rows[1].month, rows[1].sales_count), (1, 2));
        assert_eq!(rows[1].total_sales, dec!(500));
    }

    #[test]
    fn test_unlinked_sale_is_not_attributed() {
        let period = ReportPeriod::whole_year(2025).unwrap();
        let sales = vec![sale_fixture(1, "2025-01-10", dec!(100), SaleStatus::Completed)];

        let rows = summarize_by_salesperson(&sales, &[], &[], &[], &period);
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_salesperson_summary_from_database() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_company(&db, "acme").await?;
        let ana = create_test_salesperson(&db, company.id, "Ana", dec!(10)).await?;
        let bruno = create_test_salesperson(&db, company.id, "Bruno", dec!(5)).await?;

        let shared = create_test_sale(
            &db,
            company.id,
            "2025-03-05",
            dec!(1000),
            SaleStatus::Completed,
            &[(ana.id, dec!(10)), (bruno.id, dec!(5))],
        )
        .await?;
        crate::core::sale_cost::add_sale_cost(
            &db,
            shared.id,
            "Transporte".to_string(),
            None,
            dec!(100),
        )
        .await?;
        create_test_sale(
            &db,
            company.id,
            "2025-03-20",
            dec!(500),
            SaleStatus::Pending,
            &[(ana.id, dec!(10))],
        )
        .await?;

        let period = ReportPeriod::new(2025, [2])?;
        let rows = fetch_salesperson_summary(&db, company.id, &period).await?;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].salesperson_id, ana.id);
        assert_eq!(rows[0].sales_count, 1);
        assert_eq!(rows[0].total_sales, dec!(500));
        assert_eq!(rows[0].net_profit, dec!(450));
        assert_eq!(rows[0].total_commission, dec!(45));
        assert_eq!(rows[1].salesperson_id, bruno.id);
        assert_eq!(rows[1].total_commission, dec!(22.5));

        Ok(())
    }
}
