//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Commission and profitability dashboard
pub mod dashboard;

/// Fixed and variable cost management
pub mod expense;

/// General utility commands
pub mod general;

/// Option parsing and replies shared by the record-keeping commands
pub mod input;

/// Read-only ledger commands (sales, costs, inventory, contracts)
pub mod ledger;

/// Sale recording and changes
pub mod sale;

/// Stock and contract management
pub mod stock;

/// Salesperson management
pub mod team;

// Export commands
pub use dashboard::*;
pub use expense::*;
pub use general::*;
pub use ledger::*;
pub use sale::*;
pub use stock::*;
pub use team::*;
