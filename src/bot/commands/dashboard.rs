//! Dashboard Discord command - commission and profitability report per company.
//!
//! Each invocation loads and aggregates its own snapshot and replies with it,
//! so a slow report can never overwrite a newer one.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            company, dashboard,
            period::{ReportPeriod, parse_month_list},
        },
        errors::{Error, Result},
    };
    use chrono::Datelike;
    use poise::serenity_prelude as serenity;

    /// Builds the reporting period from the optional command arguments.
    ///
    /// Year defaults to the current year; a missing or blank month list selects
    /// the whole year.
    pub fn period_from_args(year: Option<i32>, months: Option<&str>) -> Result<ReportPeriod> {
        let year = year.unwrap_or_else(|| chrono::Local::now().year());
        let months = months.map(parse_month_list).transpose()?.unwrap_or_default();
        ReportPeriod::new(year, months)
    }

    /// Shows revenue, costs, net profit, and commissions for a company.
    ///
    /// Months are one-based and comma-separated (`1,2,3`). Leave them out to
    /// report on the whole year.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dashboard(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Company code"]
        #[autocomplete = "autocomplete::autocomplete_company_code"]
        company_code: String,
        #[description = "Year (defaults to the current year)"] year: Option<i32>,
        #[description = "Months, e.g. 1,2,3 (defaults to the whole year)"]
        #[autocomplete = "autocomplete::autocomplete_months"]
        months: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let period = match period_from_args(year, months.as_deref()) {
            Ok(period) => period,
            Err(e) => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        };

        let Some(company) = company::get_company_by_code(db, &company_code).await? else {
            ctx.say(format!("❌ Empresa '{company_code}' não encontrada."))
                .await?;
            return Ok(());
        };

        // Acknowledge command quickly
        ctx.defer().await?;

        let report = dashboard::load_dashboard(db, company.id, &period).await;
        let description = dashboard::format_dashboard(&company.name, &period, &report);

        let embed = serenity::CreateEmbed::default()
            .title("📊 Dashboard de Comissões")
            .description(description)
            .color(0x0034_98DB)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} | {} vendedor{}",
                company.code,
                report.salespersons.len(),
                if report.salespersons.len() == 1 { "" } else { "es" }
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        #![allow(clippy::unwrap_used)]
        use super::*;

        #[test]
        fn test_period_from_args() {
            let period = period_from_args(Some(2026), Some("1, 2,3")).unwrap();
            assert_eq!(period, ReportPeriod::new(2026, [0, 1, 2]).unwrap());

            let whole = period_from_args(Some(2025), None).unwrap();
            assert!(whole.is_whole_year());

            let blank = period_from_args(Some(2025), Some("  ")).unwrap();
            assert!(blank.is_whole_year());

            assert!(matches!(
                period_from_args(Some(2025), Some("13")),
                Err(Error::InvalidPeriod { .. })
            ));
        }
    }
}

// Re-export all commands
pub use inner::*;
