//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod company;
pub mod contract;
pub mod cost;
pub mod fixed_cost;
pub mod inventory_item;
pub mod sale;
pub mod sale_cost;
pub mod sale_item;
pub mod sale_salesperson;
pub mod salesperson;

// Re-export specific types to avoid conflicts
pub use company::{Column as CompanyColumn, Entity as Company, Model as CompanyModel};
pub use contract::{Column as ContractColumn, Entity as Contract, Model as ContractModel};
pub use cost::{Column as CostColumn, Entity as Cost, Model as CostModel};
pub use fixed_cost::{Column as FixedCostColumn, Entity as FixedCost, Model as FixedCostModel};
pub use inventory_item::{
    Column as InventoryItemColumn, Entity as InventoryItem, Model as InventoryItemModel,
};
pub use sale::{
    Column as SaleColumn, Entity as Sale, Model as SaleModel, PaymentStatus, SaleStatus,
};
pub use sale_cost::{Column as SaleCostColumn, Entity as SaleCost, Model as SaleCostModel};
pub use sale_item::{Column as SaleItemColumn, Entity as SaleItem, Model as SaleItemModel};
pub use sale_salesperson::{
    Column as SaleSalespersonColumn, Entity as SaleSalesperson, Model as SaleSalespersonModel,
};
pub use salesperson::{
    Column as SalespersonColumn, Entity as Salesperson, Model as SalespersonModel,
};
