//! Fixed cost business logic - Recurring monthly charges and their proration.
//!
//! A fixed cost is charged once per calendar month for `qtd_months` months
//! starting at the month of its start date. Months are compared as absolute
//! (year, month) pairs, so a cost starting in November keeps counting into the
//! following year.

use crate::{
    core::period::{MonthKey, ReportPeriod, month_in_range},
    entities::{Company, FixedCost, fixed_cost},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// Data needed to register a fixed cost.
#[derive(Debug, Clone)]
pub struct NewFixedCost {
    /// Company paying the cost
    pub company_id: i64,
    /// Short name
    pub name: String,
    /// Free-text category
    pub category: String,
    /// Amount per active month
    pub monthly_value: Decimal,
    /// Any day of the first active month
    pub start_date: NaiveDate,
    /// Number of active months
    pub qtd_months: i32,
    /// Optional description
    pub description: Option<String>,
}

/// Records a new fixed cost.
#[instrument(skip(db))]
pub async fn create_fixed_cost(
    db: &DatabaseConnection,
    new_cost: NewFixedCost,
) -> Result<fixed_cost::Model> {
    if new_cost.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Fixed cost name cannot be empty".to_string(),
        });
    }
    if new_cost.monthly_value.is_sign_negative() {
        return Err(Error::InvalidAmount {
            amount: new_cost.monthly_value,
        });
    }
    if new_cost.qtd_months < 1 {
        return Err(Error::Validation {
            message: format!(
                "A fixed cost must last at least one month (got {})",
                new_cost.qtd_months
            ),
        });
    }

    Company::find_by_id(new_cost.company_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CompanyNotFound {
            code: new_cost.company_id.to_string(),
        })?;

    let cost = fixed_cost::ActiveModel {
        company_id: Set(new_cost.company_id),
        name: Set(new_cost.name.trim().to_string()),
        category: Set(new_cost.category),
        monthly_value: Set(new_cost.monthly_value),
        start_date: Set(new_cost.start_date),
        qtd_months: Set(new_cost.qtd_months),
        description: Set(new_cost.description),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Created fixed cost '{}' ({} months from {})",
        cost.name,
        cost.qtd_months,
        start_month(&cost)
    );
    Ok(cost)
}

/// All fixed costs of a company, regardless of dates, oldest start first.
pub async fn list_fixed_costs_for_company(
    db: &DatabaseConnection,
    company_id: i64,
) -> Result<Vec<fixed_cost::Model>> {
    FixedCost::find()
        .filter(fixed_cost::Column::CompanyId.eq(company_id))
        .order_by_asc(fixed_cost::Column::StartDate)
        .order_by_asc(fixed_cost::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a fixed cost.
pub async fn delete_fixed_cost(db: &DatabaseConnection, cost_id: i64) -> Result<()> {
    let result = FixedCost::delete_by_id(cost_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "fixed cost",
            id: cost_id,
        });
    }
    info!("Deleted fixed cost {}", cost_id);
    Ok(())
}

/// First month the cost is charged.
#[must_use]
pub fn start_month(cost: &fixed_cost::Model) -> MonthKey {
    MonthKey::from_date(cost.start_date)
}

/// Last month the cost is charged.
#[must_use]
pub fn end_month(cost: &fixed_cost::Model) -> MonthKey {
    start_month(cost).offset(i64::from(cost.qtd_months.max(1)) - 1)
}

/// Whether the cost is charged in `month`.
#[must_use]
pub fn is_active_in(cost: &fixed_cost::Model, month: MonthKey) -> bool {
    month_in_range(start_month(cost), cost.qtd_months, month)
}

/// Number of the period's selected months in which the cost is charged.
#[must_use]
pub fn months_active_in_period(cost: &fixed_cost::Model, period: &ReportPeriod) -> u32 {
    period.months_covered(start_month(cost), cost.qtd_months)
}

/// Sum of `monthly_value` over every (cost, selected month) pair where the cost is active.
#[must_use]
pub fn prorated_total(costs: &[fixed_cost::Model], period: &ReportPeriod) -> Decimal {
    costs
        .iter()
        .map(|c| c.monthly_value * Decimal::from(months_active_in_period(c, period)))
        .sum()
}

/// What the company pays in fixed costs during `month`.
#[must_use]
pub fn total_monthly_value(costs: &[fixed_cost::Model], month: MonthKey) -> Decimal {
    costs
        .iter()
        .filter(|c| is_active_in(c, month))
        .map(|c| c.monthly_value)
        .sum()
}
