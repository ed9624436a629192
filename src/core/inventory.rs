//! Inventory business logic - Stock levels and their value.

use crate::{
    core::money,
    entities::{Company, InventoryItem, inventory_item},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{info, instrument};

/// Data needed to add a stock entry.
#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    /// Company owning the stock
    pub company_id: i64,
    /// Product name
    pub product_name: String,
    /// Units in stock
    pub quantity: i32,
    /// Cost per unit
    pub unit_cost: Decimal,
    /// Optional location
    pub location: Option<String>,
    /// Optional notes
    pub notes: Option<String>,
}

fn stock_value(quantity: i32, unit_cost: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_cost
}

fn validate_stock(quantity: i32, unit_cost: Decimal) -> Result<()> {
    if quantity < 0 {
        return Err(Error::Validation {
            message: format!("Quantity cannot be negative (got {quantity})"),
        });
    }
    if unit_cost.is_sign_negative() {
        return Err(Error::InvalidAmount { amount: unit_cost });
    }
    Ok(())
}

/// Adds a stock entry. Its total value is `quantity * unit_cost`.
#[instrument(skip(db))]
pub async fn create_inventory_item(
    db: &DatabaseConnection,
    new_item: NewInventoryItem,
) -> Result<inventory_item::Model> {
    if new_item.product_name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Product name cannot be empty".to_string(),
        });
    }
    validate_stock(new_item.quantity, new_item.unit_cost)?;

    Company::find_by_id(new_item.company_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CompanyNotFound {
            code: new_item.company_id.to_string(),
        })?;

    let item = inventory_item::ActiveModel {
        company_id: Set(new_item.company_id),
        product_name: Set(new_item.product_name.trim().to_string()),
        quantity: Set(new_item.quantity),
        unit_cost: Set(new_item.unit_cost),
        total_value: Set(stock_value(new_item.quantity, new_item.unit_cost)),
        location: Set(new_item.location),
        notes: Set(new_item.notes),
        last_updated: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Added {} x {} to inventory",
        item.quantity, item.product_name
    );
    Ok(item)
}

/// Sets the quantity of a stock entry and recomputes its total value.
#[instrument(skip(db))]
pub async fn update_inventory_quantity(
    db: &DatabaseConnection,
    item_id: i64,
    quantity: i32,
) -> Result<inventory_item::Model> {
    let item = InventoryItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "inventory item",
            id: item_id,
        })?;
    validate_stock(quantity, item.unit_cost)?;

    let total_value = stock_value(quantity, item.unit_cost);
    let mut active_model: inventory_item::ActiveModel = item.into();
    active_model.quantity = Set(quantity);
    active_model.total_value = Set(total_value);
    active_model.last_updated = Set(chrono::Utc::now());
    active_model.update(db).await.map_err(Into::into)
}

/// Stock entries of a company, by product name.
pub async fn list_inventory(
    db: &DatabaseConnection,
    company_id: i64,
) -> Result<Vec<inventory_item::Model>> {
    InventoryItem::find()
        .filter(inventory_item::Column::CompanyId.eq(company_id))
        .order_by_asc(inventory_item::Column::ProductName)
        .order_by_asc(inventory_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Removes a stock entry.
pub async fn delete_inventory_item(db: &DatabaseConnection, item_id: i64) -> Result<()> {
    let result = InventoryItem::delete_by_id(item_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "inventory item",
            id: item_id,
        });
    }
    Ok(())
}

/// Inventory totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InventoryOverview {
    /// Sum of total values
    pub total_value: Decimal,
    /// Sum of quantities
    pub total_units: i64,
    /// Distinct product names
    pub products: usize,
}

/// Builds the overview from loaded entries.
#[must_use]
pub fn build_inventory_overview(items: &[inventory_item::Model]) -> InventoryOverview {
    InventoryOverview {
        total_value: items.iter().map(|i| i.total_value).sum(),
        total_units: items.iter().map(|i| i64::from(i.quantity)).sum(),
        products: items
            .iter()
            .map(|i| i.product_name.as_str())
            .collect::<BTreeSet<_>>()
            .len(),
    }
}

/// Loads and summarizes the inventory of a company.
pub async fn inventory_overview(
    db: &DatabaseConnection,
    company_id: i64,
) -> Result<InventoryOverview> {
    let items = list_inventory(db, company_id).await?;
    Ok(build_inventory_overview(&items))
}

/// Formats the inventory and its totals for display.
#[must_use]
pub fn format_inventory(items: &[inventory_item::Model], overview: &InventoryOverview) -> String {
    use std::fmt::Write;

    let mut out = format!(
        "**Estoque** ({} produtos, {} unidades)\nValor total: {}\n",
        overview.products,
        overview.total_units,
        money::format_money(overview.total_value)
    );
    for item in items {
        let _ = write!(
            out,
            "  #{} {} x {} @ {}",
            item.id,
            item.quantity,
            item.product_name,
            money::format_money(item.unit_cost)
        );
        if let Some(location) = &item.location {
            let _ = write!(out, " ({location})");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    fn new_item(
        company_id: i64,
        name: &str,
        quantity: i32,
        unit_cost: Decimal,
    ) -> NewInventoryItem {
        NewInventoryItem {
            company_id,
            product_name: name.to_string(),
            quantity,
            unit_cost,
            location: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_total_value_follows_quantity() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_company(&db, "acme").await?;

        let item = create_inventory_item(&db, new_item(company.id, "Sofá", 3, dec!(850))).await?;
        assert_eq!(item.total_value, dec!(2550));

        let updated = update_inventory_quantity(&db, item.id, 5).await?;
        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.total_value, dec!(4250));
        Ok(())
    }

    #[tokio::test]
    async fn test_inventory_overview() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_company(&db, "acme").await?;

        create_inventory_item(&db, new_item(company.id, "Sofá", 2, dec!(850))).await?;
        create_inventory_item(&db, new_item(company.id, "Mesa", 4, dec!(300))).await?;
        create_inventory_item(&db, new_item(company.id, "Sofá", 1, dec!(900))).await?;

        let overview = inventory_overview(&db, company.id).await?;
        assert_eq!(overview.total_value, dec!(3800));
        assert_eq!(overview.total_units, 7);
        assert_eq!(overview.products, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_inventory_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_company(&db, "acme").await?;

        assert!(matches!(
            create_inventory_item(&db, new_item(company.id, "Sofá", -1, dec!(10))).await,
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            update_inventory_quantity(&db, 404, 1).await,
            Err(Error::NotFound { id: 404, .. })
        ));

        let item = create_inventory_item(&db, new_item(company.id, "Sofá", 1, dec!(10))).await?;
        delete_inventory_item(&db, item.id).await?;
        assert!(list_inventory(&db, company.id).await?.is_empty());
        Ok(())
    }
}
