//! Shared budget commands.

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
};

use crate::{
    bot::{log, permission},
    error::AppError,
    model::ledger::{Balances, Currency, LedgerChange},
    state::AppState,
};

use super::{ephemeral, guild_member, integer_option, string_option, subcommand};

const BUDGET_COLOR: u32 = 0xFEE75C;

fn currency_option() -> CreateCommandOption {
    Currency::ALL.iter().fold(
        CreateCommandOption::new(CommandOptionType::String, "currency", "Currency to change")
            .required(true),
        |option, currency| option.add_string_choice(currency.to_string(), currency.key()),
    )
}

fn amount_option() -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::Integer, "amount", "Amount to change by")
        .required(true)
        .min_int_value(1)
}

pub fn register() -> CreateCommand {
    CreateCommand::new("budget")
        .description("Manage the team budget")
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "view",
            "Show the current budget",
        ))
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "add", "Add funds")
                .add_sub_option(currency_option())
                .add_sub_option(amount_option()),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "remove", "Remove funds")
                .add_sub_option(currency_option())
                .add_sub_option(amount_option()),
        )
}

pub async fn handle(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let (guild_id, member) = guild_member(command.guild_id, command.member.as_deref())?;
    permission::require_staff(&ctx.http, guild_id, member, &state.staff_role_name).await?;

    let options = command.data.options();

    let (verb, change) = match subcommand(&options) {
        Some(("view", _)) => {
            let response = CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(build_balances_embed(&state.ledger.balances().await)),
            );
            command.create_response(&ctx.http, response).await?;

            return Ok(());
        }
        Some(("add", options)) => {
            let currency = string_option(options, "currency")?.parse::<Currency>()?;
            let amount = integer_option(options, "amount")?;

            ("added", state.ledger.add(currency, amount).await?)
        }
        Some(("remove", options)) => {
            let currency = string_option(options, "currency")?.parse::<Currency>()?;
            let amount = integer_option(options, "amount")?;

            ("removed", state.ledger.remove(currency, amount).await?)
        }
        _ => return Err(AppError::BadRequest("Unknown budget subcommand.".to_string())),
    };

    let content = format!("✅ You {}", change_message(verb, &change));
    command.create_response(&ctx.http, ephemeral(content)).await?;

    log::post(
        &ctx.http,
        state.log_channel_id,
        format!("💰 <@{}> {}", command.user.id, change_message(verb, &change)),
    )
    .await;

    Ok(())
}

pub fn build_balances_embed(balances: &Balances) -> CreateEmbed {
    Currency::ALL.iter().fold(
        CreateEmbed::new().title("💰 Budget").color(BUDGET_COLOR),
        |embed, currency| {
            embed.field(
                currency.to_string(),
                currency.format_amount(balances.get(*currency)),
                true,
            )
        },
    )
}

/// Describes a ledger change, noting when a removal was clamped at zero.
pub fn change_message(verb: &str, change: &LedgerChange) -> String {
    format!(
        "{} **{}** {}. New {} balance: **{}**",
        verb,
        change.currency.format_amount(change.applied),
        change.currency,
        change.currency,
        change.currency.format_amount(change.balance)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the change summary.
    ///
    /// Expected: Applied amount and new balance formatted per currency
    #[test]
    fn describes_change() {
        let message = change_message(
            "removed",
            &LedgerChange {
                currency: Currency::Robux,
                applied: 30,
                balance: 0,
            },
        );

        assert_eq!(
            message,
            "removed **R$ 30** Robux. New Robux balance: **R$ 0**"
        );
    }

    /// Tests the balances embed.
    ///
    /// Expected: One field per currency
    #[test]
    fn balances_embed_lists_each_currency() {
        let embed = serde_json::to_value(build_balances_embed(&Balances {
            usd: 25,
            robux: 500,
        }))
        .unwrap();

        assert_eq!(embed["fields"][0]["name"], "USD");
        assert_eq!(embed["fields"][0]["value"], "$25");
        assert_eq!(embed["fields"][1]["value"], "R$ 500");
    }

    /// Tests the currency choices offered to Discord.
    ///
    /// Expected: Every choice parses back to a currency
    #[test]
    fn currency_choices_parse() {
        let option = serde_json::to_value(currency_option()).unwrap();

        for choice in option["choices"].as_array().unwrap() {
            assert!(choice["value"].as_str().unwrap().parse::<Currency>().is_ok());
        }
    }
}
