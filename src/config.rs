use crate::error::{config::ConfigError, AppError};

const DEFAULT_STAFF_ROLE_NAME: &str = "Ticket RDS";
const DEFAULT_TICKET_CATEGORY_NAME: &str = "tickets";

pub struct Config {
    pub discord_bot_token: String,

    /// Channel receiving audit notices, none when unset
    pub log_channel_id: Option<u64>,
    /// Channel receiving welcome messages, none when unset
    pub welcome_channel_id: Option<u64>,

    /// Name of the role allowed to run staff commands
    pub staff_role_name: String,
    /// Name of the category new tickets are created under
    pub ticket_category_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Ok(Self {
            discord_bot_token: var("DISCORD_BOT_TOKEN")
                .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            log_channel_id: parse_channel_id("LOG_CHANNEL_ID", var("LOG_CHANNEL_ID"))?,
            welcome_channel_id: parse_channel_id(
                "WELCOME_CHANNEL_ID",
                var("WELCOME_CHANNEL_ID"),
            )?,
            staff_role_name: var("STAFF_ROLE_NAME")
                .unwrap_or_else(|| DEFAULT_STAFF_ROLE_NAME.to_string()),
            ticket_category_name: var("TICKET_CATEGORY_NAME")
                .unwrap_or_else(|| DEFAULT_TICKET_CATEGORY_NAME.to_string()),
        })
    }
}

fn parse_channel_id(name: &str, value: Option<String>) -> Result<Option<u64>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };

    match value.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(Some(id)),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    /// Tests configuration with only the token set.
    ///
    /// Expected: Defaults for role and category, no channels
    #[test]
    fn applies_defaults() -> Result<(), AppError> {
        let config = Config::from_lookup(lookup(&[("DISCORD_BOT_TOKEN", "token")]))?;

        assert_eq!(config.discord_bot_token, "token");
        assert_eq!(config.staff_role_name, "Ticket RDS");
        assert_eq!(config.ticket_category_name, "tickets");
        assert_eq!(config.log_channel_id, None);
        assert_eq!(config.welcome_channel_id, None);

        Ok(())
    }

    /// Tests configuration with every variable set.
    ///
    /// Expected: All values taken from the source
    #[test]
    fn reads_all_variables() -> Result<(), AppError> {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("LOG_CHANNEL_ID", "1433248485221732455"),
            ("WELCOME_CHANNEL_ID", " 1433206382416363754 "),
            ("STAFF_ROLE_NAME", "Staff"),
            ("TICKET_CATEGORY_NAME", "support"),
        ]))?;

        assert_eq!(config.log_channel_id, Some(1433248485221732455));
        assert_eq!(config.welcome_channel_id, Some(1433206382416363754));
        assert_eq!(config.staff_role_name, "Staff");
        assert_eq!(config.ticket_category_name, "support");

        Ok(())
    }

    /// Tests a missing bot token.
    ///
    /// Expected: Err(MissingEnvVar)
    #[test]
    fn requires_token() {
        let result = Config::from_lookup(lookup(&[("DISCORD_BOT_TOKEN", "  ")]));

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) if name == "DISCORD_BOT_TOKEN"
        ));
    }

    /// Tests a channel ID that is not a snowflake.
    ///
    /// Expected: Err(InvalidEnvVar) naming the variable
    #[test]
    fn rejects_invalid_channel_id() {
        let result = Config::from_lookup(lookup(&[
            ("DISCORD_BOT_TOKEN", "token"),
            ("LOG_CHANNEL_ID", "general"),
        ]));

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { name, .. })) if name == "LOG_CHANNEL_ID"
        ));
    }
}
