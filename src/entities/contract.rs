//! Contract entity - Recurring service contracts billed monthly.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    /// Unique identifier for the contract
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Company holding the contract
    pub company_id: i64,
    /// Contract name or counterpart
    pub name: String,
    /// Gross monthly value
    pub monthly_value: Decimal,
    /// Monthly discount, never above `monthly_value`
    pub discount: Decimal,
    /// When billing starts
    pub start_date: Date,
    /// Optional description
    pub description: Option<String>,
    /// When the contract was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Contract and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each contract belongs to one company
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
