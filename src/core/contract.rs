//! Contract business logic - Recurring service contracts and their monthly net value.

use crate::{
    core::money,
    entities::{Company, Contract, contract},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;
use tracing::{info, instrument};

/// Data needed to register a contract.
#[derive(Debug, Clone)]
pub struct NewContract {
    /// Company holding the contract
    pub company_id: i64,
    /// Contract name
    pub name: String,
    /// Gross monthly value
    pub monthly_value: Decimal,
    /// Monthly discount
    pub discount: Decimal,
    /// Billing start
    pub start_date: NaiveDate,
    /// Optional description
    pub description: Option<String>,
}

/// Registers a contract. The discount must lie between zero and the monthly value.
#[instrument(skip(db))]
pub async fn create_contract(
    db: &DatabaseConnection,
    new_contract: NewContract,
) -> Result<contract::Model> {
    if new_contract.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Contract name cannot be empty".to_string(),
        });
    }
    if new_contract.monthly_value.is_sign_negative() {
        return Err(Error::InvalidAmount {
            amount: new_contract.monthly_value,
        });
    }
    if new_contract.discount.is_sign_negative()
        || new_contract.discount > new_contract.monthly_value
    {
        return Err(Error::Validation {
            message: format!(
                "Discount {} must be between 0 and the monthly value {}",
                new_contract.discount, new_contract.monthly_value
            ),
        });
    }

    Company::find_by_id(new_contract.company_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CompanyNotFound {
            code: new_contract.company_id.to_string(),
        })?;

    let record = contract::ActiveModel {
        company_id: Set(new_contract.company_id),
        name: Set(new_contract.name.trim().to_string()),
        monthly_value: Set(new_contract.monthly_value),
        discount: Set(new_contract.discount),
        start_date: Set(new_contract.start_date),
        description: Set(new_contract.description),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created contract '{}' ({})", record.name, record.id);
    Ok(record)
}

/// Contracts of a company, oldest start first.
pub async fn list_contracts(
    db: &DatabaseConnection,
    company_id: i64,
) -> Result<Vec<contract::Model>> {
    Contract::find()
        .filter(contract::Column::CompanyId.eq(company_id))
        .order_by_asc(contract::Column::StartDate)
        .order_by_asc(contract::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a contract.
pub async fn delete_contract(db: &DatabaseConnection, contract_id: i64) -> Result<()> {
    let result = Contract::delete_by_id(contract_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: "contract",
            id: contract_id,
        });
    }
    Ok(())
}

/// Monthly contract totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContractsOverview {
    /// Number of contracts
    pub count: usize,
    /// Sum of monthly values
    pub gross_monthly: Decimal,
    /// Sum of discounts
    pub total_discount: Decimal,
    /// `gross_monthly - total_discount`
    pub net_monthly: Decimal,
}

/// Builds the overview from loaded contracts.
#[must_use]
pub fn build_contracts_overview(contracts: &[contract::Model]) -> ContractsOverview {
    let gross_monthly: Decimal = contracts.iter().map(|c| c.monthly_value).sum();
    let total_discount: Decimal = contracts.iter().map(|c| c.discount).sum();
    ContractsOverview {
        count: contracts.len(),
        gross_monthly,
        total_discount,
        net_monthly: gross_monthly - total_discount,
    }
}

/// Loads and summarizes the contracts of a company.
pub async fn contracts_overview(
    db: &DatabaseConnection,
    company_id: i64,
) -> Result<ContractsOverview> {
    let contracts = list_contracts(db, company_id).await?;
    Ok(build_contracts_overview(&contracts))
}

/// Formats contracts and their totals for display.
#[must_use]
pub fn format_contracts(contracts: &[contract::Model], overview: &ContractsOverview) -> String {
    use std::fmt::Write;

    let mut out = format!(
        "**Contratos** ({})\nBruto mensal: {}\nDescontos: {}\nLíquido mensal: {}\n",
        overview.count,
        money::format_money(overview.gross_monthly),
        money::format_money(overview.total_discount),
        money::format_money(overview.net_monthly)
    );
    for item in contracts {
        let _ = writeln!(
            out,
            "  #{} {} desde {}: {}",
            item.id,
            item.name,
            item.start_date.format("%d/%m/%Y"),
            money::format_money(item.monthly_value - item.discount)
        );
    }
    out
}
