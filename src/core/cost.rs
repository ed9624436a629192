//! Variable cost ledger - One-off expenses and their per-category totals.

use crate::{
    core::money,
    entities::{Company, Cost, cost},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, instrument};

/// Data needed to record a variable cost.
#[derive(Debug, Clone)]
pub struct NewCost {
    /// Company that paid
    pub company_id: i64,
    /// Category for the breakdown
    pub category: String,
    /// What was paid for
    pub description: String,
    /// Amount paid
    pub amount: Decimal,
    /// Payment date
    pub cost_date: NaiveDate,
    /// Optional payment method
    pub payment_method: Option<String>,
    /// Optional notes
    pub notes: Option<String>,
}

/// Records a variable cost.
#[instrument(skip(db))]
pub async fn create_cost(db: &DatabaseConnection, new_cost: NewCost) -> Result<cost::Model> {
    if new_cost.amount.is_sign_negative() {
        return Err(Error::InvalidAmount {
            amount: new_cost.amount,
        });
    }
    if new_cost.category.trim().is_empty() || new_cost.description.trim().is_empty() {
        return Err(Error::Validation {
            message: "Cost category and description are required".to_string(),
        });
    }

    Company::find_by_id(new_cost.company_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CompanyNotFound {
            code: new_cost.company_id.to_string(),
        })?;

    let entry = cost::ActiveModel {
        company_id: Set(new_cost.company_id),
        category: Set(new_cost.category.trim().to_string()),
        description: Set(new_cost.description.trim().to_string()),
        amount: Set(new_cost.amount),
        cost_date: Set(new_cost.cost_date),
        payment_method: Set(new_cost.payment_method),
        notes: Set(new_cost.notes),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Recorded cost {} in '{}'", entry.id, entry.category);
    Ok(entry)
}

/// Costs of a company, most recent first.
pub async fn list_costs_for_company(
    db: &DatabaseConnection,
    company_id: i64,
) -> Result<Vec<cost::Model>> {
    Cost::find()
        .filter(cost::Column::CompanyId.eq(company_id))
        .order_by_desc(cost::Column::CostDate)
        .order_by_desc(cost::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a cost entry.
pub async fn delete_cost(db: &DatabaseConnection, cost_id: i64) -> Result<()> {
    let result = Cost::delete_by_id(cost_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "cost",
            id: cost_id,
        });
    }
    Ok(())
}

/// Totals of the variable cost ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CostsOverview {
    /// Sum of every entry
    pub total: Decimal,
    /// Number of entries
    pub entries: usize,
    /// (category, total), largest first
    pub by_category: Vec<(String, Decimal)>,
    /// Category with the largest total, if any
    pub top_category: Option<String>,
}

/// Builds the overview from loaded entries.
#[must_use]
pub fn build_costs_overview(costs: &[cost::Model]) -> CostsOverview {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for entry in costs {
        *totals.entry(entry.category.as_str()).or_default() += entry.amount;
    }

    let mut by_category: Vec<(String, Decimal)> = totals
        .into_iter()
        .map(|(category, total)| (category.to_string(), total))
        .collect();
    by_category.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    CostsOverview {
        total: costs.iter().map(|c| c.amount).sum(),
        entries: costs.len(),
        top_category: by_category.first().map(|(category, _)| category.clone()),
        by_category,
    }
}

/// Loads and summarizes the ledger of a company.
#[instrument(skip(db))]
pub async fn costs_overview(db: &DatabaseConnection, company_id: i64) -> Result<CostsOverview> {
    let costs = list_costs_for_company(db, company_id).await?;
    Ok(build_costs_overview(&costs))
}

/// Formats the overview for display.
#[must_use]
pub fn format_costs_overview(overview: &CostsOverview) -> String {
    use std::fmt::Write;

    let mut out = format!(
        "**Custos Variáveis** ({} lançamentos)\nTotal: {}\n",
        overview.entries,
        money::format_money(overview.total)
    );
    if let Some(top) = &overview.top_category {
        let _ = writeln!(out, "Maior categoria: {top}");
    }
    for (category, total) in &overview.by_category {
        let _ = writeln!(out, "  {category}: {}", money::format_money(*total));
    }
    out
}
