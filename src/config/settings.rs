//! Seed configuration loading from config.toml
//!
//! `config.toml` lists the companies and salespersons that should exist on
//! startup. Seeding is idempotent: records already present (matched by company
//! code and salesperson name) are left untouched.

use crate::errors::{Error, Result};
use std::collections::HashSet;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Companies to seed
    #[serde(default)]
    pub companies: Vec<CompanyConfig>,
}

/// Configuration for a single company
#[derive(Debug, Deserialize, Clone)]
pub struct CompanyConfig {
    /// Display name
    pub name: String,
    /// Unique short code used in commands
    pub code: String,
    /// Salespersons working for this company
    #[serde(default)]
    pub salespersons: Vec<SalespersonConfig>,
}

/// Configuration for a single salesperson
#[derive(Debug, Deserialize, Clone)]
pub struct SalespersonConfig {
    /// Display name
    pub name: String,
    /// Commission percentage (0-100)
    pub commission_percentage: Decimal,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    debug!("Loading settings from {:?}", path);
    let contents = std::fs::read_to_string(path)?;

    parse_settings(&contents)
}

/// Parses seed configuration from TOML text.
///
/// Company codes must be non-blank and unique, ignoring case.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents)?;

    let mut seen = HashSet::new();
    for company in &settings.companies {
        let code = company.code.trim().to_lowercase();
        if code.is_empty() {
            return Err(Error::Config {
                message: format!("Company '{}' has a blank code", company.name),
            });
        }
        if !seen.insert(code) {
            return Err(Error::Config {
                message: format!("Company code '{}' is used more than once", company.code),
            });
        }
    }
    Ok(settings)
}

/// Loads `./config.toml`, or empty settings when the file does not exist.
pub fn load_default_settings() -> Result<Settings> {
    let path = Path::new("config.toml");
    if path.exists() {
        load_settings(path)
    } else {
        debug!("No config.toml found, nothing to seed");
        Ok(Settings::default())
    }
}
