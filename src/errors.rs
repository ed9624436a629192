//! Unified error types for Commission Desk.
//!
//! Every fallible operation in `core`, `config`, and `bot` returns [`Result`].
//! The dashboard loader is the one exception: it swallows read failures and
//! degrades to zeros, logging the cause instead.

use rust_decimal::Decimal;
use thiserror::Error;

/// Application error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed, or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Any error reported by the database layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No company exists with the given code
    #[error("Company not found: {code}")]
    CompanyNotFound {
        /// Company code that was looked up
        code: String,
    },

    /// No sale exists with the given id
    #[error("Sale not found: {id}")]
    SaleNotFound {
        /// Sale id that was looked up
        id: i64,
    },

    /// No salesperson exists with the given id
    #[error("Salesperson not found: {id}")]
    SalespersonNotFound {
        /// Salesperson id that was looked up
        id: i64,
    },

    /// Generic lookup miss for the smaller ledgers (costs, inventory, contracts)
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record, e.g. `"fixed cost"`
        entity: &'static str,
        /// Id that was looked up
        id: i64,
    },

    /// Monetary amount that is negative or otherwise not acceptable
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Commission percentage outside 0-100
    #[error("Invalid commission percentage: {value} (must be between 0 and 100)")]
    InvalidPercentage {
        /// The rejected percentage
        value: Decimal,
    },

    /// Month index or year outside the supported range
    #[error("Invalid reporting period: {message}")]
    InvalidPeriod {
        /// What was wrong with the period
        message: String,
    },

    /// Input failed a business rule
    #[error("Validation error: {message}")]
    Validation {
        /// Which rule failed
        message: String,
    },

    /// I/O error, mostly from reading `config.toml`
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable missing
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// `config.toml` could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Whether the error was caused by bad input rather than by the system.
    ///
    /// Commands show these to the user and carry on; anything else is
    /// propagated to the framework's error handler.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::CompanyNotFound { .. }
                | Self::SaleNotFound { .. }
                | Self::SalespersonNotFound { .. }
                | Self::NotFound { .. }
                | Self::InvalidAmount { .. }
                | Self::InvalidPercentage { .. }
                | Self::InvalidPeriod { .. }
                | Self::Validation { .. }
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
