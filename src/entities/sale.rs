//! Sale entity - An order placed with a company.
//!
//! Only sales with status [`SaleStatus::Completed`] count toward revenue, profit,
//! and commission. `entry_value` is the amount paid at signing and drives the
//! remaining-receivable figure, independent of profit.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fulfilment status of a sale. Stored with the Portuguese labels the business uses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum SaleStatus {
    /// Not yet delivered/closed
    #[sea_orm(string_value = "pendente")]
    Pending,
    /// Closed; counted as revenue
    #[sea_orm(string_value = "concluída")]
    Completed,
}

impl SaleStatus {
    /// The other status, used by the status toggle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }

    /// Label as stored and shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Completed => "concluída",
        }
    }
}

/// Payment status of a sale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PaymentStatus {
    /// Customer still owes part of the total
    #[sea_orm(string_value = "pendente")]
    Pending,
    /// Fully paid
    #[sea_orm(string_value = "pago")]
    Paid,
}

/// Sale database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    /// Unique identifier for the sale
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Company that made the sale
    pub company_id: i64,
    /// Order number as printed on the order form
    pub order_number: String,
    /// Optional customer name
    pub customer_name: Option<String>,
    /// Calendar date of the sale
    pub sale_date: Date,
    /// Sum of the line items at creation time
    pub total_price: Decimal,
    /// Fulfilment status
    pub status: SaleStatus,
    /// Payment status
    pub payment_status: PaymentStatus,
    /// Amount paid at signing
    pub entry_value: Decimal,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the sale was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Sale and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each sale belongs to one company
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,
    /// One sale has many line items
    #[sea_orm(has_many = "super::sale_item::Entity")]
    Items,
    /// One sale has many extra costs
    #[sea_orm(has_many = "super::sale_cost::Entity")]
    Costs,
    /// One sale has one or more salespersons
    #[sea_orm(has_many = "super::sale_salesperson::Entity")]
    SalespersonLinks,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::sale_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::sale_cost::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Costs.def()
    }
}

impl Related<super::sale_salesperson::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalespersonLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
