//! Company entity - The tenant every other record is scoped to.
//!
//! Each company has a display name and a short unique code used to reference it
//! from bot commands.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Company database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    /// Unique identifier for the company
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Acme Móveis")
    pub name: String,
    /// Short unique code used in commands (e.g., "acme")
    #[sea_orm(unique)]
    pub code: String,
    /// When the company was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Company and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One company has many sales
    #[sea_orm(has_many = "super::sale::Entity")]
    Sales,
    /// One company has many salespersons
    #[sea_orm(has_many = "super::salesperson::Entity")]
    Salespersons,
    /// One company has many fixed costs
    #[sea_orm(has_many = "super::fixed_cost::Entity")]
    FixedCosts,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sales.def()
    }
}

impl Related<super::salesperson::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Salespersons.def()
    }
}

impl Related<super::fixed_cost::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FixedCosts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
