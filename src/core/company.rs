//! Company business logic - Registration, lookup, and seeding from config.toml.

use crate::{
    config::settings::Settings,
    core::salesperson,
    entities::{Company, company},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Registers a company. Codes are trimmed, lower-cased, and must be unique.
#[instrument(skip(db))]
pub async fn create_company(
    db: &DatabaseConnection,
    name: &str,
    code: &str,
) -> Result<company::Model> {
    let code = code.trim().to_lowercase();
    if name.trim().is_empty() || code.is_empty() {
        return Err(Error::Validation {
            message: "Company name and code cannot be empty".to_string(),
        });
    }
    if get_company_by_code(db, &code).await?.is_some() {
        return Err(Error::Validation {
            message: format!("Company code '{code}' is already in use"),
        });
    }

    let company = company::ActiveModel {
        name: Set(name.trim().to_string()),
        code: Set(code),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created company {} ({})", company.name, company.code);
    Ok(company)
}

/// Finds a company by code (case-insensitive).
pub async fn get_company_by_code(
    db: &DatabaseConnection,
    code: &str,
) -> Result<Option<company::Model>> {
    Company::find()
        .filter(company::Column::Code.eq(code.trim().to_lowercase()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Like [`get_company_by_code`], but a miss is an error.
pub async fn require_company_by_code(
    db: &DatabaseConnection,
    code: &str,
) -> Result<company::Model> {
    get_company_by_code(db, code)
        .await?
        .ok_or_else(|| Error::CompanyNotFound {
            code: code.to_string(),
        })
}

/// All companies, ordered by name.
pub async fn list_companies(db: &DatabaseConnection) -> Result<Vec<company::Model>> {
    Company::find()
        .order_by_asc(company::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates the companies and salespersons listed in the settings that do not exist yet.
///
/// Returns how many records were created. Running it twice creates nothing the
/// second time.
#[instrument(skip(db, settings))]
pub async fn seed_companies(db: &DatabaseConnection, settings: &Settings) -> Result<usize> {
    let mut created = 0;

    for company_config in &settings.companies {
        let company = if let Some(existing) = get_company_by_code(db, &company_config.code).await?
        {
            debug!("Company '{}' already exists", existing.code);
            existing
        } else {
            created += 1;
            create_company(db, &company_config.name, &company_config.code).await?
        };

        let existing_people = salesperson::list_salespersons(db, company.id).await?;
        for person in &company_config.salespersons {
            if existing_people.iter().any(|p| p.name == person.name.trim()) {
                continue;
            }
            salesperson::create_salesperson(
                db,
                company.id,
                &person.name,
                person.commission_percentage,
            )
            .await?;
            created += 1;
        }
    }

    info!("Seeding created {} records", created);
    Ok(created)
}
