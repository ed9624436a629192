//! Sale cost business logic - Extra costs attached to individual sales.
//!
//! These costs (freight, card fees, installation...) reduce a sale's net profit
//! and therefore the commission paid on it.

use crate::{
    entities::{Sale, SaleCost, sale_cost},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Attaches a cost to an existing sale.
#[instrument(skip(db, description))]
pub async fn add_sale_cost(
    db: &DatabaseConnection,
    sale_id: i64,
    cost_type: String,
    description: Option<String>,
    amount: Decimal,
) -> Result<sale_cost::Model> {
    if amount.is_sign_negative() {
        return Err(Error::InvalidAmount { amount });
    }
    if cost_type.trim().is_empty() {
        return Err(Error::Validation {
            message: "Cost type cannot be empty".to_string(),
        });
    }

    Sale::find_by_id(sale_id)
        .one(db)
        .await?
        .ok_or(Error::SaleNotFound { id: sale_id })?;

    let cost = sale_cost::ActiveModel {
        sale_id: Set(sale_id),
        cost_type: Set(cost_type.trim().to_string()),
        description: Set(description),
        amount: Set(amount),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Added cost {} to sale {}", cost.id, sale_id);
    Ok(cost)
}

/// Costs of one sale, oldest first.
pub async fn list_costs_for_sale(
    db: &DatabaseConnection,
    sale_id: i64,
) -> Result<Vec<sale_cost::Model>> {
    SaleCost::find()
        .filter(sale_cost::Column::SaleId.eq(sale_id))
        .order_by_asc(sale_cost::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Costs of several sales at once. An empty id list returns nothing without querying.
pub async fn list_costs_for_sales(
    db: &DatabaseConnection,
    sale_ids: &[i64],
) -> Result<Vec<sale_cost::Model>> {
    if sale_ids.is_empty() {
        return Ok(Vec::new());
    }
    SaleCost::find()
        .filter(sale_cost::Column::SaleId.is_in(sale_ids.iter().copied()))
        .order_by_asc(sale_cost::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sum of a sale's costs.
pub async fn total_cost_for_sale(db: &DatabaseConnection, sale_id: i64) -> Result<Decimal> {
    let costs = list_costs_for_sale(db, sale_id).await?;
    Ok(costs.iter().map(|c| c.amount).sum())
}

/// Removes a single sale cost.
pub async fn delete_sale_cost(db: &DatabaseConnection, cost_id: i64) -> Result<()> {
    let result = SaleCost::delete_by_id(cost_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "sale cost",
            id: cost_id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SaleStatus;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_add_sale_cost_rejects_negative_amount() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = add_sale_cost(&db, 1, "Frete".to_string(), None, dec!(-1)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));
    }

    #[tokio::test]
    async fn test_add_sale_cost_requires_sale() -> Result<()> {
        let db = setup_test_db().await?;
        let result = add_sale_cost(&db, 42, "Frete".to_string(), None, dec!(10)).await;
        assert!(matches!(result, Err(Error::SaleNotFound { id: 42 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_total_cost_for_sale() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_company(&db, "acme").await?;
        let sale = create_test_sale(
            &db,
            company.id,
            "2025-06-01",
            dec!(900),
            SaleStatus::Completed,
            &[],
        )
        .await?;

        add_sale_cost(&db, sale.id, "Frete".to_string(), None, dec!(45.50)).await?;
        let fee = add_sale_cost(
            &db,
            sale.id,
            "Tarifa".to_string(),
            Some("Cartão".to_string()),
            dec!(12.25),
        )
        .await?;

        assert_eq!(total_cost_for_sale(&db, sale.id).await?, dec!(57.75));

        delete_sale_cost(&db, fee.id).await?;
        assert_eq!(total_cost_for_sale(&db, sale.id).await?, dec!(45.5));
        assert!(matches!(
            delete_sale_cost(&db, fee.id).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_costs_for_no_sales_skips_query() -> Result<()> {
        // A mock with no prepared results would error if queried
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        assert!(list_costs_for_sales(&db, &[]).await?.is_empty());
        Ok(())
    }
}
