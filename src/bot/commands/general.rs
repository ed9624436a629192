//! General Discord commands - ping and help.
//! This module contains simple commands that don't require database operations.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Commission Desk - Ajuda**\n\
        Consultas e cadastros recebem o código da empresa (com autocompletar).\n\n\
        **Relatórios**\n\
        • `/dashboard <empresa> [ano] [meses]` - Receita, custos, lucro líquido e comissões. \
        Meses separados por vírgula (`1,2,3`); sem meses, o ano inteiro.\n\
        • `/sales <empresa>` - Vendas concluídas e pendentes, valores a receber.\n\n\
        **Consultas**\n\
        • `/fixed_costs <empresa>` - Custos fixos e o total do mês atual.\n\
        • `/costs <empresa>` - Custos variáveis por categoria.\n\
        • `/inventory <empresa>` - Estoque e valor total.\n\
        • `/contracts <empresa>` - Contratos e valor líquido mensal.\n\n\
        **Lançamentos** (os ids `#N` aparecem nas consultas)\n\
        • `/sale add|details|toggle|pay|delete|add_cost|remove_cost` - Vendas. \
        Itens como `Sofá:2:1500; Mesa:300`, vendedores como `Ana; Bruno:7,5`.\n\
        • `/fixed_cost add|delete` - Custos fixos mensais.\n\
        • `/cost add|delete` - Custos variáveis.\n\
        • `/stock add|set|delete` - Estoque.\n\
        • `/contract add|delete` - Contratos.\n\
        • `/salesperson add|list|rate|active` - Vendedores e comissões.\n\n\
        **Utilidades**\n\
        • `/ping` - Verifica se o bot está respondendo.\n\
        • `/help` - Mostra esta mensagem.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
