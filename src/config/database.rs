//! Database configuration module for Commission Desk.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. Parents are created before children
//! because the generated tables carry foreign keys.

use crate::entities::{
    Company, Contract, Cost, FixedCost, InventoryItem, Sale, SaleCost, SaleItem, SaleSalesperson,
    Salesperson,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info, instrument};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/commission_desk.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file when the variable is unset.
#[instrument]
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all tables that do not exist yet.
///
/// Safe to call on every startup.
#[instrument(skip(db))]
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Company).await?;
    create_table(db, &schema, Salesperson).await?;
    create_table(db, &schema, Sale).await?;
    create_table(db, &schema, SaleItem).await?;
    create_table(db, &schema, SaleCost).await?;
    create_table(db, &schema, SaleSalesperson).await?;
    create_table(db, &schema, FixedCost).await?;
    create_table(db, &schema, Cost).await?;
    create_table(db, &schema, InventoryItem).await?;
    create_table(db, &schema, Contract).await?;

    info!("Database tables ensured.");
    Ok(())
}
