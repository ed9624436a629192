//! Salesperson business logic - Roster management and commission rates.
//!
//! Only active salespersons make up the roster the dashboard reports on.
//! Deactivating a salesperson keeps their history intact.

use crate::{
    entities::{Company, Salesperson, salesperson},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Checks that a commission percentage lies within 0-100.
pub fn validate_percentage(value: Decimal) -> Result<()> {
    if value.is_sign_negative() || value > Decimal::ONE_HUNDRED {
        return Err(Error::InvalidPercentage { value });
    }
    Ok(())
}

/// Adds an active salesperson to a company.
#[instrument(skip(db))]
pub async fn create_salesperson(
    db: &DatabaseConnection,
    company_id: i64,
    name: &str,
    commission_percentage: Decimal,
) -> Result<salesperson::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Salesperson name cannot be empty".to_string(),
        });
    }
    validate_percentage(commission_percentage)?;

    Company::find_by_id(company_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CompanyNotFound {
            code: company_id.to_string(),
        })?;

    let now = chrono::Utc::now();
    let person = salesperson::ActiveModel {
        company_id: Set(company_id),
        name: Set(name.trim().to_string()),
        commission_percentage: Set(commission_percentage),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created salesperson {} ({})", person.name, person.id);
    Ok(person)
}

/// Finds a salesperson by id.
pub async fn get_salesperson_by_id(
    db: &DatabaseConnection,
    salesperson_id: i64,
) -> Result<Option<salesperson::Model>> {
    Salesperson::find_by_id(salesperson_id)
        .one(db)
        .await
        .map_err(Into::into)
}

async fn require_salesperson(
    db: &DatabaseConnection,
    salesperson_id: i64,
) -> Result<salesperson::Model> {
    get_salesperson_by_id(db, salesperson_id)
        .await?
        .ok_or(Error::SalespersonNotFound { id: salesperson_id })
}

/// Changes a salesperson's default commission percentage.
#[instrument(skip(db))]
pub async fn update_commission_percentage(
    db: &DatabaseConnection,
    salesperson_id: i64,
    commission_percentage: Decimal,
) -> Result<salesperson::Model> {
    validate_percentage(commission_percentage)?;
    let person = require_salesperson(db, salesperson_id).await?;

    let mut active_model: salesperson::ActiveModel = person.into();
    active_model.commission_percentage = Set(commission_percentage);
    active_model.updated_at = Set(chrono::Utc::now());
    active_model.update(db).await.map_err(Into::into)
}

/// Activates or deactivates a salesperson.
#[instrument(skip(db))]
pub async fn set_active(
    db: &DatabaseConnection,
    salesperson_id: i64,
    is_active: bool,
) -> Result<salesperson::Model> {
    let person = require_salesperson(db, salesperson_id).await?;

    let mut active_model: salesperson::ActiveModel = person.into();
    active_model.is_active = Set(is_active);
    active_model.updated_at = Set(chrono::Utc::now());
    active_model.update(db).await.map_err(Into::into)
}

/// Every salesperson of a company, active or not, ordered by name.
pub async fn list_salespersons(
    db: &DatabaseConnection,
    company_id: i64,
) -> Result<Vec<salesperson::Model>> {
    Salesperson::find()
        .filter(salesperson::Column::CompanyId.eq(company_id))
        .order_by_asc(salesperson::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Active salespersons of a company, ordered by name.
pub async fn get_active_roster(
    db: &DatabaseConnection,
    company_id: i64,
) -> Result<Vec<salesperson::Model>> {
    Salesperson::find()
        .filter(salesperson::Column::CompanyId.eq(company_id))
        .filter(salesperson::Column::IsActive.eq(true))
        .order_by_asc(salesperson::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage(dec!(0)).is_ok());
        assert!(validate_percentage(dec!(100)).is_ok());
        assert!(validate_percentage(dec!(12.5)).is_ok());
        assert!(matches!(
            validate_percentage(dec!(-1)),
            Err(Error::InvalidPercentage { .. })
        ));
        assert!(matches!(
            validate_percentage(dec!(100.01)),
            Err(Error::InvalidPercentage { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_salesperson_requires_company() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_salesperson(&db, 77, "Ana", dec!(10)).await;
        assert!(matches!(result, Err(Error::CompanyNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_active_roster_excludes_inactive() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_company(&db, "acme").await?;
        let carla = create_test_salesperson(&db, company.id, "Carla", dec!(10)).await?;
        create_test_salesperson(&db, company.id, "Ana", dec!(5)).await?;
        create_test_salesperson(&db, company.id, "Bruno", dec!(0)).await?;

        set_active(&db, carla.id, false).await?;

        let roster = get_active_roster(&db, company.id).await?;
        let names: Vec<&str> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno"]);

        let everyone = list_salespersons(&db, company.id).await?;
        assert_eq!(everyone.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_commission_percentage() -> Result<()> {
        let db = setup_test_db().await?;
        let company = create_test_company(&db, "acme").await?;
        let ana = create_test_salesperson(&db, company.id, "Ana", dec!(10)).await?;

        let updated = update_commission_percentage(&db, ana.id, dec!(12.5)).await?;
        assert_eq!(updated.commission_percentage, dec!(12.5));

        assert!(matches!(
            update_commission_percentage(&db, ana.id, dec!(150)).await,
            Err(Error::InvalidPercentage { .. })
        ));
        assert!(matches!(
            set_active(&db, 999, true).await,
            Err(Error::SalespersonNotFound { id: 999 })
        ));
        Ok(())
    }
}
