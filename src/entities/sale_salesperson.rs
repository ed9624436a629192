//! Sale/salesperson join entity.
//!
//! Links a sale to each salesperson who worked it, with the commission
//! percentage agreed for that particular sale.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join table model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sale_salespersons")]
pub struct Model {
    /// Unique identifier for the link
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Linked sale
    pub sale_id: i64,
    /// Linked salesperson
    pub salesperson_id: i64,
    /// Commission percentage (0-100) for this salesperson on this sale
    pub commission_percentage: Decimal,
}

/// Defines relationships between `SaleSalesperson` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each link points at one sale
    #[sea_orm(
        belongs_to = "super::sale::Entity",
        from = "Column::SaleId",
        to = "super::sale::Column::Id"
    )]
    Sale,
    /// Each link points at one salesperson
    #[sea_orm(
        belongs_to = "super::salesperson::Entity",
        from = "Column::SalespersonId",
        to = "super::salesperson::Column::Id"
    )]
    Salesperson,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl Related<super::salesperson::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Salesperson.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
