//! Inventory item entity - Stock on hand per product and location.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Company owning the stock
    pub company_id: i64,
    /// Product name
    pub product_name: String,
    /// Units in stock
    pub quantity: i32,
    /// Cost per unit
    pub unit_cost: Decimal,
    /// `quantity * unit_cost`, kept in sync on every write
    pub total_value: Decimal,
    /// Optional storage location
    pub location: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Last time quantity or cost changed
    pub last_updated: DateTimeUtc,
}

/// Defines relationships between `InventoryItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one company
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
