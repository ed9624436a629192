//! Fixed cost entity - Recurring monthly charges (rent, salaries, software...).
//!
//! A fixed cost is active for exactly `qtd_months` consecutive calendar months
//! starting at the month of `start_date`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed cost database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fixed_costs")]
pub struct Model {
    /// Unique identifier for the fixed cost
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Company paying the cost
    pub company_id: i64,
    /// Short name (e.g., "Aluguel galpão")
    pub name: String,
    /// Free-text category (e.g., "Fixo", "Variável", "Salários")
    pub category: String,
    /// Amount charged every active month
    pub monthly_value: Decimal,
    /// First day the cost applies; only its month and year matter
    pub start_date: Date,
    /// Number of consecutive months the cost is active (at least 1)
    pub qtd_months: i32,
    /// Optional description
    pub description: Option<String>,
    /// When the cost was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `FixedCost` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each fixed cost belongs to one company
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
