//! Sale business logic - Handles sales, their line items, and their salespersons.
//!
//! A sale is created together with its line items and the salespersons who worked
//! it, inside one database transaction. Its total price is the sum of the line
//! items. Status and payment status are toggled independently; only completed
//! sales ever reach the dashboard.

use crate::{
    core::{money, period::ReportPeriod, salesperson::validate_percentage},
    entities::{
        PaymentStatus, Sale, SaleCost, SaleItem, SaleSalesperson, SaleStatus, Salesperson, sale,
        sale_cost, sale_item, sale_salesperson,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

/// One product line of a new sale.
#[derive(Debug, Clone)]
pub struct NewSaleItem {
    /// Product sold
    pub product_name: String,
    /// Units sold, at least 1
    pub quantity: i32,
    /// Price per unit
    pub unit_price: Decimal,
}

/// A salesperson taking part in a new sale, with the percentage agreed for it.
#[derive(Debug, Clone, Copy)]
pub struct SellerShare {
    /// Salesperson id
    pub salesperson_id: i64,
    /// Commission percentage (0-100) for this sale
    pub commission_percentage: Decimal,
}

/// Everything needed to record a sale.
#[derive(Debug, Clone)]
pub struct NewSale {
    /// Company making the sale
    pub company_id: i64,
    /// Order number, must not be blank
    pub order_number: String,
    /// Optional customer name
    pub customer_name: Option<String>,
    /// Calendar date of the sale
    pub sale_date: NaiveDate,
    /// Initial status
    pub status: SaleStatus,
    /// Initial payment status
    pub payment_status: PaymentStatus,
    /// Paid at signing; between zero and the total
    pub entry_value: Decimal,
    /// Free-form notes
    pub notes: Option<String>,
    /// Line items, at least one
    pub items: Vec<NewSaleItem>,
    /// Salespersons who worked the sale (may be empty)
    pub sellers: Vec<SellerShare>,
}

impl NewSale {
    /// Sum of `quantity * unit_price` over the line items.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| Decimal::from(item.quantity) * item.unit_price)
            .sum()
    }

    fn validate(&self) -> Result<()> {
        if self.order_number.trim().is_empty() {
            return Err(Error::Validation {
                message: "Order number cannot be empty".to_string(),
            });
        }
        if self.items.is_empty() {
            return Err(Error::Validation {
                message: "A sale needs at least one item".to_string(),
            });
        }
        for item in &self.items {
            if item.product_name.trim().is_empty() {
                return Err(Error::Validation {
                    message: "Product name cannot be empty".to_string(),
                });
            }
            if item.quantity < 1 {
                return Err(Error::Validation {
                    message: format!(
                        "Quantity for '{}' must be at least 1",
                        item.product_name
                    ),
                });
            }
            if item.unit_price.is_sign_negative() {
                return Err(Error::InvalidAmount {
                    amount: item.unit_price,
                });
            }
        }

        let total = self.total_price();
        if self.entry_value.is_sign_negative() || self.entry_value > total {
            return Err(Error::InvalidAmount {
                amount: self.entry_value,
            });
        }

        let mut seen = HashSet::new();
        for seller in &self.sellers {
            validate_percentage(seller.commission_percentage)?;
            if !seen.insert(seller.salesperson_id) {
                return Err(Error::Validation {
                    message: format!(
                        "Salesperson {} is listed more than once",
                        seller.salesperson_id
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Records a sale with its line items and salespersons.
///
/// Every salesperson must exist and belong to the sale's company. Nothing is
/// written if any check fails.
#[instrument(skip(db, new_sale), fields(order = %new_sale.order_number))]
pub async fn create_sale(db: &DatabaseConnection, new_sale: NewSale) -> Result<sale::Model> {
    new_sale.validate()?;
    let total_price = new_sale.total_price();

    let txn = db.begin().await?;

    for seller in &new_sale.sellers {
        let person = Salesperson::find_by_id(seller.salesperson_id)
            .one(&txn)
            .await?
            .filter(|p| p.company_id == new_sale.company_id)
            .ok_or(Error::SalespersonNotFound {
                id: seller.salesperson_id,
            })?;
        debug!("Crediting sale to {}", person.name);
    }

    let sale = sale::ActiveModel {
        company_id: Set(new_sale.company_id),
        order_number: Set(new_sale.order_number.trim().to_string()),
        customer_name: Set(new_sale.customer_name),
        sale_date: Set(new_sale.sale_date),
        total_price: Set(total_price),
        status: Set(new_sale.status),
        payment_status: Set(new_sale.payment_status),
        entry_value: Set(new_sale.entry_value),
        notes: Set(new_sale.notes),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for item in new_sale.items {
        sale_item::ActiveModel {
            sale_id: Set(sale.id),
            product_name: Set(item.product_name.trim().to_string()),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    for seller in new_sale.sellers {
        sale_salesperson::ActiveModel {
            sale_id: Set(sale.id),
            salesperson_id: Set(seller.salesperson_id),
            commission_percentage: Set(seller.commission_percentage),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    info!("Recorded sale {} ({})", sale.id, sale.order_number);
    Ok(sale)
}

/// Finds a sale by id.
pub async fn get_sale_by_id(db: &DatabaseConnection, sale_id: i64) -> Result<Option<sale::Model>> {
    Sale::find_by_id(sale_id).one(db).await.map_err(Into::into)
}

async fn require_sale<C>(db: &C, sale_id: i64) -> Result<sale::Model>
where
    C: ConnectionTrait,
{
    Sale::find_by_id(sale_id)
        .one(db)
        .await?
        .ok_or(Error::SaleNotFound { id: sale_id })
}

/// All sales of a company, newest sale date first.
pub async fn list_sales_for_company(
    db: &DatabaseConnection,
    company_id: i64,
) -> Result<Vec<sale::Model>> {
    Sale::find()
        .filter(sale::Column::CompanyId.eq(company_id))
        .order_by_desc(sale::Column::SaleDate)
        .order_by_desc(sale::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Completed sales of a company whose date falls in one of the period's months.
pub async fn list_completed_sales_in_period(
    db: &DatabaseConnection,
    company_id: i64,
    period: &ReportPeriod,
) -> Result<Vec<sale::Model>> {
    let (first, last) = period.date_bounds()?;

    let mut sales = Sale::find()
        .filter(sale::Column::CompanyId.eq(company_id))
        .filter(sale::Column::Status.eq(SaleStatus::Completed))
        .filter(sale::Column::SaleDate.between(first, last))
        .order_by_asc(sale::Column::SaleDate)
        .order_by_asc(sale::Column::Id)
        .all(db)
        .await?;

    sales.retain(|s| period.contains(s.sale_date));
    Ok(sales)
}

/// Line items of a sale.
pub async fn get_sale_items(
    db: &DatabaseConnection,
    sale_id: i64,
) -> Result<Vec<sale_item::Model>> {
    SaleItem::find()
        .filter(sale_item::Column::SaleId.eq(sale_id))
        .order_by_asc(sale_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Line items of several sales at once.
pub async fn list_items_for_sales(
    db: &DatabaseConnection,
    sale_ids: &[i64],
) -> Result<Vec<sale_item::Model>> {
    if sale_ids.is_empty() {
        return Ok(Vec::new());
    }
    SaleItem::find()
        .filter(sale_item::Column::SaleId.is_in(sale_ids.iter().copied()))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Salesperson links of a sale.
pub async fn get_sale_salespersons(
    db: &DatabaseConnection,
    sale_id: i64,
) -> Result<Vec<sale_salesperson::Model>> {
    list_links_for_sales(db, &[sale_id]).await
}

/// Salesperson links of several sales at once.
pub async fn list_links_for_sales(
    db: &DatabaseConnection,
    sale_ids: &[i64],
) -> Result<Vec<sale_salesperson::Model>> {
    if sale_ids.is_empty() {
        return Ok(Vec::new());
    }
    SaleSalesperson::find()
        .filter(sale_salesperson::Column::SaleId.is_in(sale_ids.iter().copied()))
        .order_by_asc(sale_salesperson::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a sale together with its items, costs, and salesperson links.
#[instrument(skip(db))]
pub async fn delete_sale(db: &DatabaseConnection, sale_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let sale = require_sale(&txn, sale_id).await?;

    SaleItem::delete_many()
        .filter(sale_item::Column::SaleId.eq(sale_id))
        .exec(&txn)
        .await?;
    SaleCost::delete_many()
        .filter(sale_cost::Column::SaleId.eq(sale_id))
        .exec(&txn)
        .await?;
    SaleSalesperson::delete_many()
        .filter(sale_salesperson::Column::SaleId.eq(sale_id))
        .exec(&txn)
        .await?;
    sale.delete(&txn).await?;

    txn.commit().await?;
    info!("Deleted sale {}", sale_id);
    Ok(())
}

/// Flips a sale between `pendente` and `concluída`.
#[instrument(skip(db))]
pub async fn toggle_sale_status(db: &DatabaseConnection, sale_id: i64) -> Result<sale::Model> {
    let sale = require_sale(db, sale_id).await?;
    let next = sale.status.toggled();

    let mut active_model: sale::ActiveModel = sale.into();
    active_model.status = Set(next);
    let updated = active_model.update(db).await?;

    info!("Sale {} is now {}", sale_id, next.label());
    Ok(updated)
}

/// Sets the payment status of a sale.
#[instrument(skip(db))]
pub async fn set_payment_status(
    db: &DatabaseConnection,
    sale_id: i64,
    payment_status: PaymentStatus,
) -> Result<sale::Model> {
    let sale = require_sale(db, sale_id).await?;
    let mut active_model: sale::ActiveModel = sale.into();
    active_model.payment_status = Set(payment_status);
    active_model.update(db).await.map_err(Into::into)
}

/// What the customer still owes: zero once paid, otherwise total minus entry.
#[must_use]
pub fn remaining_receivable(sale: &sale::Model) -> Decimal {
    if sale.payment_status == PaymentStatus::Paid {
        return Decimal::ZERO;
    }
    (sale.total_price - sale.entry_value).max(Decimal::ZERO)
}

/// A sale paid in full at signing.
#[must_use]
pub fn is_cash_payment(sale: &sale::Model) -> bool {
    sale.entry_value == sale.total_price
}

/// Totals for one status bucket of the sales overview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalesBucket {
    /// Number of sales
    pub count: u64,
    /// Sum of total prices
    pub revenue: Decimal,
    /// Sum of sale costs
    pub costs: Decimal,
    /// `revenue - costs`
    pub net_profit: Decimal,
    /// Units across all line items
    pub items_sold: i64,
    /// Sum of remaining receivables
    pub receivable: Decimal,
}

/// Completed vs pending sales of a company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalesOverview {
    /// Sales with status `concluída`
    pub completed: SalesBucket,
    /// Sales with status `pendente`
    pub pending: SalesBucket,
}

/// Builds the overview from loaded records.
#[must_use]
pub fn build_sales_overview(
    sales: &[sale::Model],
    costs: &[sale_cost::Model],
    items: &[sale_item::Model],
) -> SalesOverview {
    let mut cost_by_sale: HashMap<i64, Decimal> = HashMap::new();
    for cost in costs {
        *cost_by_sale.entry(cost.sale_id).or_default() += cost.amount;
    }
    let mut units_by_sale: HashMap<i64, i64> = HashMap::new();
    for item in items {
        *units_by_sale.entry(item.sale_id).or_default() += i64::from(item.quantity);
    }

    let mut overview = SalesOverview::default();
    for sale in sales {
        let bucket = match sale.status {
            SaleStatus::Completed => &mut overview.completed,
            SaleStatus::Pending => &mut overview.pending,
        };
        let cost = cost_by_sale.get(&sale.id).copied().unwrap_or_default();

        bucket.count += 1;
        bucket.revenue += sale.total_price;
        bucket.costs += cost;
        bucket.net_profit += sale.total_price - cost;
        bucket.items_sold += units_by_sale.get(&sale.id).copied().unwrap_or_default();
        bucket.receivable += remaining_receivable(sale);
    }
    overview
}

/// Loads and summarizes all sales of a company.
#[instrument(skip(db))]
pub async fn sales_overview(db: &DatabaseConnection, company_id: i64) -> Result<SalesOverview> {
    let sales = list_sales_for_company(db, company_id).await?;
    let ids: Vec<i64> = sales.iter().map(|s| s.id).collect();
    let costs = crate::core::sale_cost::list_costs_for_sales(db, &ids).await?;
    let items = list_items_for_sales(db, &ids).await?;
    Ok(build_sales_overview(&sales, &costs, &items))
}

/// Formats the overview for display.
#[must_use]
pub fn format_sales_overview(overview: &SalesOverview) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for (title, bucket) in [
        ("Vendas Concluídas", &overview.completed),
        ("Vendas Pendentes", &overview.pending),
    ] {
        let _ = writeln!(out, "**{title}** ({} vendas)", bucket.count);
        let _ = writeln!(out, "  Receita: {}", money::format_money(bucket.revenue));
        let _ = writeln!(out, "  Custos: {}", money::format_money(bucket.costs));
        let _ = writeln!(
            out,
            "  Lucro Líquido: {}",
            money::format_money(bucket.net_profit)
        );
        let _ = writeln!(out, "  Itens: {}", bucket.items_sold);
        let _ = writeln!(out, "  A receber: {}", money::format_money(bucket.receivable));
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn new_sale(company_id: i64) -> NewSale {
        NewSale {
            company_id,
            order_number: "PED-001".to_string(),
            customer_name: Some("Maria".to_string()),
            sale_date: NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
            status: SaleStatus::Pending,
            payment_status: PaymentStatus::Pending,
            entry_value: dec!(100),
            notes: None,
            items: vec![
                NewSaleItem {
                    product_name: "Sofá".to_string(),
                    quantity: 2,
                    unit_price: dec!(750),
                },
                NewSaleItem {
                    product_name: "Almofada".to_string(),
                    quantity: 4,
                    unit_price: dec!(25.50),
                },
            ],
            sellers: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_sale_validation() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut sale = new_sale(1);
        sale.order_number = "  ".to_string();
        assert!(matches!(
            create_sale(&db, sale).await,
            Err(Error::Validation { .. })
        ));

        let mut sale = new_sale(1);
        sale.items.clear();
        assert!(matches!(
            create_sale(&db, sale).await,
            Err(Error::Validation { .. })
        ));

        let mut sale = new_sale(1);
        sale.items[0].quantity = 0;
        assert!(matches!(
            create_sale(&db, sale).await,
            Err(Error::Validation { .. })
        ));

        let mut sale = new_sale(1);
        sale.entry_value = dec!(5000);
        assert!(matches!(
            create_sale(&db, sale).await,
            Err(Error::InvalidAmount { .. })
        ));

        let mut sale = new_sale(1);
        sale.sellers = vec![SellerShare {
            salesperson_id: 1,
            commission_percentage: dec!(120),
        }];
        assert!(matches!(
            create_sale(&db, sale).await,
            Err(Error::InvalidPercentage { .. })
        ));

        let mut sale = new_sale(1);
        let share = SellerShare {
            salesperson_id: 1,
            commission_percentage: dec!(10),
        };
        sale.sellers = vec![share, share];
        assert!(matches!(
            create_sale(&db, sale).await,
            Err(Error::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_sale_computes_total_and_stores_items() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_company(&db, "acme").await?;
        let ana = create_test_salesperson(&db, company.id, "Ana", dec!(10)).await?;

        let mut input = new_sale(company.id);
        input.sellers = vec![SellerShare {
            salesperson_id: ana.id,
            commission_percentage: dec!(8),
        }];
        let sale = create_sale(&db, input).await?;

        assert_eq!(sale.total_price, dec!(1602));
        assert_eq!(sale.status, SaleStatus::Pending);

        let items = get_sale_items(&db, sale.id).await?;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_name, "Sofá");

        let links = get_sale_salespersons(&db, sale.id).await?;
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].salesperson_id, ana.id);
        assert_eq!(links[0].commission_percentage, dec!(8));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_sale_rejects_salesperson_from_other_company() -> Result<()> {
        let db = setup_test_db().await?;
        let acme = create_test_company(&db, "acme").await?;
        let beta = create_test_company(&db, "beta").await?;
        let outsider = create_test_salesperson(&db, beta.id, "Carla", dec!(10)).await?;

        let mut input = new_sale(acme.id);
        input.sellers = vec![SellerShare {
            salesperson_id: outsider.id,
            commission_percentage: dec!(10),
        }];
        let result = create_sale(&db, input).await;
        assert!(matches!(result, Err(Error::SalespersonNotFound { id }) if id == outsider.id));

        // Nothing was written
        assert!(list_sales_for_company(&db, acme.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_sale_status_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_company(&db, "acme").await?;
        let sale = create_sale(&db, new_sale(company.id)).await?;

        let toggled = toggle_sale_status(&db, sale.id).await?;
        assert_eq!(toggled.status, SaleStatus::Completed);
        let toggled = toggle_sale_status(&db, sale.id).await?;
        assert_eq!(toggled.status, SaleStatus::Pending);

        assert!(matches!(
            toggle_sale_status(&db, 9999).await,
            Err(Error::SaleNotFound { id: 9999 })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_payment_status_clears_receivable() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_company(&db, "acme").await?;
        let sale = create_sale(&db, new_sale(company.id)).await?;
        assert_eq!(remaining_receivable(&sale), dec!(1502));

        let paid = set_payment_status(&db, sale.id, PaymentStatus::Paid).await?;
        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert_eq!(remaining_receivable(&paid), Decimal::ZERO);

        let stored = get_sale_by_id(&db, sale.id).await?.unwrap();
        assert_eq!(stored.payment_status, PaymentStatus::Paid);
        assert_eq!(stored.status, SaleStatus::Pending);

        let reopened = set_payment_status(&db, sale.id, PaymentStatus::Pending).await?;
        assert_eq!(remaining_receivable(&reopened), dec!(1502));

        assert!(matches!(
            set_payment_status(&db, 9999, PaymentStatus::Paid).await,
            Err(Error::SaleNotFound { id: 9999 })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_sale_removes_children() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_company(&db, "acme").await?;
        let ana = create_test_salesperson(&db, company.id, "Ana", dec!(10)).await?;
        let sale = create_test_sale(
            &db,
            company.id,
            "2025-01-15",
            dec!(300),
            SaleStatus::Completed,
            &[(ana.id, dec!(10))],
        )
        .await?;
        crate::core::sale_cost::add_sale_cost(&db, sale.id, "Frete".to_string(), None, dec!(30))
            .await?;

        delete_sale(&db, sale.id).await?;

        assert!(get_sale_by_id(&db, sale.id).await?.is_none());
        assert!(get_sale_items(&db, sale.id).await?.is_empty());
        assert!(get_sale_salespersons(&db, sale.id).await?.is_empty());
        assert!(
            crate::core::sale_cost::list_costs_for_sale(&db, sale.id)
                .await?
                .is_empty()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_list_completed_sales_in_period() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_company(&db, "acme").await?;
        for (date, status) in [
            ("2025-01-05", SaleStatus::Completed),
            ("2025-02-05", SaleStatus::Completed),
            ("2025-03-05", SaleStatus::Completed),
            ("2025-03-06", SaleStatus::Pending),
            ("2024-03-05", SaleStatus::Completed),
        ] {
            create_test_sale(&db, company.id, date, dec!(100), status, &[]).await?;
        }

        let period = ReportPeriod::new(2025, [0, 2])?;
        let sales = list_completed_sales_in_period(&db, company.id, &period).await?;
        let dates: Vec<String> = sales.iter().map(|s| s.sale_date.to_string()).collect();
        assert_eq!(dates, vec!["2025-01-05", "2025-03-05"]);

        let whole = ReportPeriod::whole_year(2025)?;
        assert_eq!(
            list_completed_sales_in_period(&db, company.id, &whole)
                .await?
                .len(),
            3
        );
        Ok(())
    }

    #[test]
    fn test_remaining_receivable() {
        let mut sale = sale_fixture(1, "2025-01-01", dec!(1000), SaleStatus::Completed);
        sale.entry_value = dec!(300);
        assert_eq!(remaining_receivable(&sale), dec!(700));
        assert!(!is_cash_payment(&sale));

        sale.payment_status = PaymentStatus::Paid;
        assert_eq!(remaining_receivable(&sale), Decimal::ZERO);

        sale.payment_status = PaymentStatus::Pending;
        sale.entry_value = dec!(1000);
        assert_eq!(remaining_receivable(&sale), Decimal::ZERO);
        assert!(is_cash_payment(&sale));
    }

    #[test]
    fn test_build_sales_overview() {
        let mut pending = sale_fixture(2, "2025-01-02", dec!(400), SaleStatus::Pending);
        pending.entry_value = dec!(100);
        let sales = vec![
            sale_fixture(1, "2025-01-01", dec!(1000), SaleStatus::Completed),
            pending,
        ];
        let costs = vec![
            sale_cost_fixture(1, 1, dec!(150)),
            sale_cost_fixture(2, 2, dec!(50)),
        ];
        let items = vec![
            sale_item_fixture(1, 1, 3, dec!(333.3333)),
            sale_item_fixture(2, 2, 1, dec!(400)),
        ];

        let overview = build_sales_overview(&sales, &costs, &items);

        assert_eq!(overview.completed.count, 1);
        assert_eq!(overview.completed.revenue, dec!(1000));
        assert_eq!(overview.completed.net_profit, dec!(850));
        assert_eq!(overview.completed.items_sold, 3);
        assert_eq!(overview.completed.receivable, dec!(1000));
        assert_eq!(overview.pending.count, 1);
        assert_eq!(overview.pending.net_profit, dec!(350));
        assert_eq!(overview.pending.receivable, dec!(300));

        let text = format_sales_overview(&overview);
        assert!(text.contains("Vendas Concluídas"));
        assert!(text.contains("R$ 850,00"));
    }
}
