//! Shared test utilities for Commission Desk.
//!
//! This module provides helpers for setting up test databases, creating
//! test records with sensible defaults, and building in-memory models for
//! tests of the pure aggregation functions.
#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        company,
        sale::{self, NewSale, NewSaleItem, SellerShare},
        salesperson,
    },
    entities::{
        self, PaymentStatus, SaleStatus, fixed_cost, sale as sale_entity, sale_cost, sale_item,
        sale_salesperson, salesperson as salesperson_entity,
    },
    errors::Result,
};
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn fixed_timestamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

/// Creates a test company whose name is the upper-cased code.
pub async fn create_test_company(
    db: &DatabaseConnection,
    code: &str,
) -> Result<entities::company::Model> {
    company::create_company(db, &code.to_uppercase(), code).await
}

/// Creates an active salesperson.
pub async fn create_test_salesperson(
    db: &DatabaseConnection,
    company_id: i64,
    name: &str,
    commission_percentage: Decimal,
) -> Result<salesperson_entity::Model> {
    salesperson::create_salesperson(db, company_id, name, commission_percentage).await
}

/// Creates a sale with a single line item priced at `total`.
///
/// # Arguments
/// * `sale_date` - `YYYY-MM-DD`
/// * `sellers` - `(salesperson_id, commission_percentage)` per co-seller
///
/// # Defaults
/// * `payment_status`: pending
/// * `entry_value`: 0
pub async fn create_test_sale(
    db: &DatabaseConnection,
    company_id: i64,
    sale_date: &str,
    total: Decimal,
    status: SaleStatus,
    sellers: &[(i64, Decimal)],
) -> Result<sale_entity::Model> {
    sale::create_sale(
        db,
        NewSale {
            company_id,
            order_number: format!("PED-{sale_date}"),
            customer_name: None,
            sale_date: date(sale_date),
            status,
            payment_status: PaymentStatus::Pending,
            entry_value: Decimal::ZERO,
            notes: None,
            items: vec![NewSaleItem {
                product_name: "Produto teste".to_string(),
                quantity: 1,
                unit_price: total,
            }],
            sellers: sellers
                .iter()
                .map(|&(salesperson_id, commission_percentage)| SellerShare {
                    salesperson_id,
                    commission_percentage,
                })
                .collect(),
        },
    )
    .await
}

/// In-memory sale of company 1, fully unpaid.
pub fn sale_fixture(
    id: i64,
    sale_date: &str,
    total_price: Decimal,
    status: SaleStatus,
) -> sale_entity::Model {
    sale_entity::Model {
        id,
        company_id: 1,
        order_number: format!("PED-{id:03}"),
        customer_name: None,
        sale_date: date(sale_date),
        total_price,
        status,
        payment_status: PaymentStatus::Pending,
        entry_value: Decimal::ZERO,
        notes: None,
        created_at: fixed_timestamp(),
    }
}

/// In-memory sale cost.
pub fn sale_cost_fixture(id: i64, sale_id: i64, amount: Decimal) -> sale_cost::Model {
    sale_cost::Model {
        id,
        sale_id,
        cost_type: "Frete".to_string(),
        description: None,
        amount,
        created_at: fixed_timestamp(),
    }
}

/// In-memory line item.
pub fn sale_item_fixture(
    id: i64,
    sale_id: i64,
    quantity: i32,
    unit_price: Decimal,
) -> sale_item::Model {
    sale_item::Model {
        id,
        sale_id,
        product_name: format!("Produto {id}"),
        quantity,
        unit_price,
    }
}

/// In-memory sale/salesperson link.
pub fn link_fixture(
    id: i64,
    sale_id: i64,
    salesperson_id: i64,
    commission_percentage: Decimal,
) -> sale_salesperson::Model {
    sale_salesperson::Model {
        id,
        sale_id,
        salesperson_id,
        commission_percentage,
    }
}

/// In-memory salesperson of company 1.
pub fn salesperson_fixture(
    id: i64,
    name: &str,
    commission_percentage: Decimal,
    is_active: bool,
) -> salesperson_entity::Model {
    salesperson_entity::Model {
        id,
        company_id: 1,
        name: name.to_string(),
        commission_percentage,
        is_active,
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

/// In-memory fixed cost of company 1.
pub fn fixed_cost_fixture(
    id: i64,
    start_date: &str,
    qtd_months: i32,
    monthly_value: Decimal,
) -> fixed_cost::Model {
    fixed_cost::Model {
        id,
        company_id: 1,
        name: format!("Custo fixo {id}"),
        category: "Fixo".to_string(),
        monthly_value,
        start_date: date(start_date),
        qtd_months,
        description: None,
        created_at: fixed_timestamp(),
    }
}
