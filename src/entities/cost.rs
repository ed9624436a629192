//! Cost entity - One-off variable expenses in the company ledger.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Variable cost database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "costs")]
pub struct Model {
    /// Unique identifier for the cost
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Company that incurred the cost
    pub company_id: i64,
    /// Category used for the per-category breakdown
    pub category: String,
    /// What was paid for
    pub description: String,
    /// Amount paid
    pub amount: Decimal,
    /// When it was paid
    pub cost_date: Date,
    /// Optional payment method (e.g., "PIX", "Boleto")
    pub payment_method: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the entry was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Cost and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each cost belongs to one company
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
