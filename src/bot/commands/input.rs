//! Parsing and reply helpers shared by the commands that write records.
//!
//! Slash command options arrive as plain text, so amounts, dates, line items,
//! and seller lists are parsed here before reaching the core modules.

use crate::{
    bot::BotData,
    core::{
        company, money,
        sale::{NewSaleItem, SellerShare},
        salesperson::validate_percentage,
    },
    entities::{company as company_entity, salesperson as salesperson_entity},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Looks a company up by code, telling the user when it does not exist.
pub async fn find_company(
    ctx: poise::Context<'_, BotData, Error>,
    code: &str,
) -> Result<Option<company_entity::Model>> {
    let found = company::get_company_by_code(&ctx.data().database, code).await?;
    if found.is_none() {
        ctx.say(format!("❌ Empresa '{code}' não encontrada."))
            .await?;
    }
    Ok(found)
}

/// Replies with input errors and propagates everything else.
pub async fn reply_or_fail(ctx: poise::Context<'_, BotData, Error>, error: Error) -> Result<()> {
    if error.is_user_error() {
        ctx.say(format!("❌ {error}")).await?;
        Ok(())
    } else {
        Err(error)
    }
}

/// Parses `dd/mm/yyyy` or `yyyy-mm-dd`.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .map_err(|_| Error::Validation {
            message: format!("'{input}' is not a date (use dd/mm/aaaa)"),
        })
}

/// Parses an optional date, defaulting to `today`.
pub fn parse_date_or(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match input.map(str::trim) {
        Some(text) if !text.is_empty() => parse_date(text),
        _ => Ok(today),
    }
}

/// Parses a commission percentage such as `7,5` or `10%`.
pub fn parse_percentage(input: &str) -> Result<Decimal> {
    let value = money::parse_amount(input.trim().trim_end_matches('%'))?;
    validate_percentage(value)?;
    Ok(value)
}

/// Parses line items written as `product:quantity:unit price`, separated by `;`.
///
/// The quantity may be left out (`Mesa:300`), meaning one unit.
pub fn parse_items(input: &str) -> Result<Vec<NewSaleItem>> {
    let mut items = Vec::new();
    for entry in input.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
        let (product_name, quantity, price) = match parts.as_slice() {
            [name, price] => (*name, 1, *price),
            [name, quantity, price] => {
                let quantity = quantity.parse::<i32>().map_err(|_| Error::Validation {
                    message: format!("Invalid quantity '{quantity}' in '{entry}'"),
                })?;
                (*name, quantity, *price)
            }
            _ => {
                return Err(Error::Validation {
                    message: format!("Item '{entry}' must look like produto:qtd:preço"),
                });
            }
        };
        items.push(NewSaleItem {
            product_name: product_name.to_string(),
            quantity,
            unit_price: money::parse_amount(price)?,
        });
    }

    if items.is_empty() {
        return Err(Error::Validation {
            message: "A sale needs at least one item".to_string(),
        });
    }
    Ok(items)
}

/// Parses salespersons written as `name` or `name:percentage`, separated by `;`.
///
/// Names are matched case-insensitively against `roster`. Without an explicit
/// percentage the salesperson's default rate applies.
pub fn parse_sellers(
    input: &str,
    roster: &[salesperson_entity::Model],
) -> Result<Vec<SellerShare>> {
    let mut sellers = Vec::new();
    for entry in input.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, percentage) = match entry.split_once(':') {
            Some((name, pct)) => (name.trim(), Some(parse_percentage(pct)?)),
            None => (entry, None),
        };

        let person = roster
            .iter()
            .find(|p| p.name.to_lowercase() == name.to_lowercase())
            .ok_or_else(|| Error::Validation {
                message: format!("No active salesperson named '{name}'"),
            })?;

        sellers.push(SellerShare {
            salesperson_id: person.id,
            commission_percentage: percentage.unwrap_or(person.commission_percentage),
        });
    }
    Ok(sellers)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::salesperson_fixture;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(parse_date("09/03/2026").unwrap(), expected);
        assert_eq!(parse_date(" 2026-03-09 ").unwrap(), expected);
        assert!(matches!(
            parse_date("31/02/2026"),
            Err(Error::Validation { .. })
        ));

        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(parse_date_or(None, today).unwrap(), today);
        assert_eq!(parse_date_or(Some("  "), today).unwrap(), today);
        assert_eq!(parse_date_or(Some("09/03/2026"), today).unwrap(), expected);
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("7,5").unwrap(), dec!(7.5));
        assert_eq!(parse_percentage("10%").unwrap(), dec!(10));
        assert!(matches!(
            parse_percentage("120"),
            Err(Error::InvalidPercentage { .. })
        ));
    }

    #[test]
    fn test_parse_items() {
        let items = parse_items("Sofá:2:1.500,00; Mesa:300 ;").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_name, "Sofá");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].unit_price, dec!(1500));
        assert_eq!(items[1].quantity, 1);
        assert_eq!(items[1].unit_price, dec!(300));

        assert!(parse_items("Sofá:dois:100").is_err());
        assert!(parse_items("Sofá").is_err());
        assert!(parse_items(" ; ").is_err());
    }

    #[test]
    fn test_parse_sellers_uses_roster_rate_by_default() {
        let roster = vec![
            salesperson_fixture(1, "Ana", dec!(10), true),
            salesperson_fixture(2, "Bruno", dec!(5), true),
        ];

        let sellers = parse_sellers("ana; Bruno:7,5", &roster).unwrap();
        assert_eq!(sellers.len(), 2);
        assert_eq!(sellers[0].salesperson_id, 1);
        assert_eq!(sellers[0].commission_percentage, dec!(10));
        assert_eq!(sellers[1].salesperson_id, 2);
        assert_eq!(sellers[1].commission_percentage, dec!(7.5));

        assert!(parse_sellers("", &roster).unwrap().is_empty());
        assert!(matches!(
            parse_sellers("Carla", &roster),
            Err(Error::Validation { .. })
        ));
    }
}
