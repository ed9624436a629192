//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions are best-effort: a failed lookup yields no suggestions rather
//! than an error, so typing is never interrupted.

use crate::{bot::BotData, core::company, entities::company as company_entity, errors::Error};

/// Discord accepts at most this many suggestions.
const MAX_SUGGESTIONS: usize = 25;

/// Filters companies whose code or name contains `partial` (case-insensitive)
/// and returns their codes, sorted.
#[must_use]
pub fn matching_company_codes(companies: &[company_entity::Model], partial: &str) -> Vec<String> {
    let partial_lower = partial.trim().to_lowercase();

    let mut matching: Vec<String> = companies
        .iter()
        .filter(|c| {
            c.code.contains(&partial_lower) || c.name.to_lowercase().contains(&partial_lower)
        })
        .map(|c| c.code.clone())
        .collect();
    matching.sort();
    matching.truncate(MAX_SUGGESTIONS);
    matching
}

/// Provides autocomplete suggestions for company codes.
pub async fn autocomplete_company_code(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(companies) = company::list_companies(db).await else {
        return Vec::new();
    };
    matching_company_codes(&companies, partial)
}

/// Suggests common month selections (`"1,2,3"` style, one-based).
#[allow(clippy::unused_async)] // poise awaits every autocomplete callback
pub async fn autocomplete_months(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    month_suggestions(partial)
}

fn month_suggestions(partial: &str) -> Vec<String> {
    let presets = [
        "1,2,3",
        "4,5,6",
        "7,8,9",
        "10,11,12",
        "1,2,3,4,5,6",
        "7,8,9,10,11,12",
    ];
    let partial = partial.replace(' ', "");

    let mut suggestions: Vec<String> = Vec::new();
    if !partial.is_empty() {
        suggestions.push(partial.clone());
    }
    suggestions.extend(
        presets
            .iter()
            .filter(|p| p.starts_with(&partial) && **p != partial)
            .map(|&p| p.to_string()),
    );
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn company(id: i64, name: &str, code: &str) -> company_entity::Model {
        company_entity::Model {
            id,
            name: name.to_string(),
            code: code.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_matching_company_codes() {
        let companies = vec![
            company(1, "Móveis Sul", "sul"),
            company(2, "Acme Estofados", "acme"),
            company(3, "Beta", "beta"),
        ];

        assert_eq!(matching_company_codes(&companies, ""), vec!["acme", "beta", "sul"]);
        assert_eq!(matching_company_codes(&companies, "ESTOF"), vec!["acme"]);
        assert_eq!(matching_company_codes(&companies, "su"), vec!["sul"]);
        assert!(matching_company_codes(&companies, "zzz").is_empty());
    }

    #[test]
    fn test_month_suggestions() {
        assert_eq!(month_suggestions("")[0], "1,2,3");
        let typed = month_suggestions("1,2");
        assert_eq!(typed[0], "1,2");
        assert!(typed.contains(&"1,2,3".to_string()));
        assert!(typed.contains(&"1,2,3,4,5,6".to_string()));
    }
}
