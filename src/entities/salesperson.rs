//! Salesperson entity - People who earn commission on completed sales.
//!
//! `commission_percentage` is a whole-number percentage (0-100). Inactive
//! salespersons are kept for history but excluded from the commission roster.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Salesperson database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "salespersons")]
pub struct Model {
    /// Unique identifier for the salesperson
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Company this salesperson works for
    pub company_id: i64,
    /// Display name
    pub name: String,
    /// Default commission percentage (0-100) applied to net profit
    pub commission_percentage: Decimal,
    /// Whether the salesperson is on the active roster
    pub is_active: bool,
    /// When the salesperson was created
    pub created_at: DateTimeUtc,
    /// When the salesperson was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Salesperson and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each salesperson belongs to one company
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
    /// A salesperson is linked to many sales through the join table
    #[sea_orm(has_many = "super::sale_salesperson::Entity")]
    SaleLinks,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::sale_salesperson::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
