//! Sale cost entity - Extra costs attached to a single sale (freight, fees, ...).
//!
//! The sum of a sale's costs is subtracted from its total price to get the
//! sale's net profit for commission purposes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale cost database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sale_costs")]
pub struct Model {
    /// Unique identifier for the cost
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sale this cost belongs to
    pub sale_id: i64,
    /// Free-text type (e.g., "Transporte", "Tarifa")
    pub cost_type: String,
    /// Optional description
    pub description: Option<String>,
    /// Cost amount, never negative
    pub amount: Decimal,
    /// When the cost was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `SaleCost` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each cost belongs to one sale
    #[sea_orm(
        belongs_to = "super::sale::Entity",
        from = "Column::SaleId",
        to = "super::sale::Column::Id"
    )]
    Sale,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
