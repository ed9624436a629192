//! Salesperson Discord commands - the `/salesperson` group.
//!
//! Salespersons are added per company with a default commission rate. They
//! are deactivated rather than deleted so their past sales keep their names.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::input::{find_company, parse_percentage, reply_or_fail},
            handlers::autocomplete,
        },
        core::salesperson,
        entities::salesperson as salesperson_entity,
        errors::{Error, Result},
    };
    use std::fmt::Write;

    /// Every salesperson with id, default rate, and whether they are active.
    #[must_use]
    pub fn format_salespersons(people: &[salesperson_entity::Model]) -> String {
        if people.is_empty() {
            return "Nenhum vendedor cadastrado.".to_string();
        }
        let mut out = format!("**Vendedores** ({})\n", people.len());
        for person in people {
            let _ = writeln!(
                out,
                "  #{} {} ({}%){}",
                person.id,
                person.name,
                person.commission_percentage.normalize(),
                if person.is_active { "" } else { " - inativo" }
            );
        }
        out
    }

    /// Parent command for managing salespersons.
    #[poise::command(
        slash_command,
        rename = "salesperson",
        subcommands(
            "salesperson_add",
            "salesperson_list",
            "salesperson_rate",
            "salesperson_active"
        )
    )]
    pub async fn salesperson_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say(
            "Comandos de vendedores:\n\
            `/salesperson add` - Cadastra um vendedor\n\
            `/salesperson list` - Lista os vendedores\n\
            `/salesperson rate` - Altera a comissão padrão\n\
            `/salesperson active` - Ativa ou desativa um vendedor",
        )
        .await?;
        Ok(())
    }

    /// Adds a salesperson to a company.
    #[poise::command(slash_command, rename = "add")]
    pub async fn salesperson_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Company code"]
        #[autocomplete = "autocomplete::autocomplete_company_code"]
        company_code: String,
        #[description = "Name"] name: String,
        #[description = "Default commission % (e.g. 7,5)"] commission: String,
    ) -> Result<()> {
        let Some(company) = find_company(ctx, &company_code).await? else {
            return Ok(());
        };
        let commission = match parse_percentage(&commission) {
            Ok(value) => value,
            Err(e) => return reply_or_fail(ctx, e).await,
        };

        match salesperson::create_salesperson(&ctx.data().database, company.id, &name, commission)
            .await
        {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Vendedor **#{}** {} cadastrado em {} com {}%.",
                    created.id,
                    created.name,
                    company.name,
                    created.commission_percentage.normalize()
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Lists the salespersons of a company, active or not.
    #[poise::command(slash_command, rename = "list")]
    pub async fn salesperson_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Company code"]
        #[autocomplete = "autocomplete::autocomplete_company_code"]
        company_code: String,
    ) -> Result<()> {
        let Some(company) = find_company(ctx, &company_code).await? else {
            return Ok(());
        };
        let people = salesperson::list_salespersons(&ctx.data().database, company.id).await?;

        ctx.say(format!(
            "👥 **{}**\n\n{}",
            company.name,
            format_salespersons(&people)
        ))
        .await?;
        Ok(())
    }

    /// Changes a salesperson's default commission rate.
    ///
    /// Sales already recorded keep the rate they were recorded with.
    #[poise::command(slash_command, rename = "rate")]
    pub async fn salesperson_rate(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Salesperson id (shown as #id in /salesperson list)"] salesperson_id: i64,
        #[description = "New default commission % (e.g. 10)"] commission: String,
    ) -> Result<()> {
        let commission = match parse_percentage(&commission) {
            Ok(value) => value,
            Err(e) => return reply_or_fail(ctx, e).await,
        };

        match salesperson::update_commission_percentage(
            &ctx.data().database,
            salesperson_id,
            commission,
        )
        .await
        {
            Ok(updated) => {
                ctx.say(format!(
                    "✅ {} agora tem comissão padrão de {}%.",
                    updated.name,
                    updated.commission_percentage.normalize()
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

    /// Activates or deactivates a salesperson.
    #[poise::command(slash_command, rename = "active")]
    pub async fn salesperson_active(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Salesperson id (shown as #id in /salesperson list)"] salesperson_id: i64,
        #[description = "Active?"] active: bool,
    ) -> Result<()> {
        match salesperson::set_active(&ctx.data().database, salesperson_id, active).await {
            Ok(updated) => {
                ctx.say(format!(
                    "✅ {} está {}.",
                    updated.name,
                    if updated.is_active {
                        "ativo"
                    } else {
                        "inativo"
                    }
                ))
                .await?;
                Ok(())
            }
            Err(e) => reply_or_fail(ctx, e).await,
        }
    }

}

// Re-export all commands
pub use inner::*;
