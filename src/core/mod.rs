//! Core business logic, independent of the Discord layer.
//!
//! Every operation takes a `DatabaseConnection` and returns structured data;
//! formatting helpers produce plain text the bot layer can send as-is.

pub mod company;
pub mod contract;
pub mod cost;
pub mod dashboard;
pub mod fixed_cost;
pub mod inventory;
pub mod money;
pub mod period;
pub mod sale;
pub mod sale_cost;
pub mod salesperson;
pub mod summary;
