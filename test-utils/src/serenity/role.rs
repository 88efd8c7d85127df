//! Test factory for creating Serenity Role objects.

use serenity::all::{Role, RoleId};
use std::collections::HashMap;

/// Creates a test Serenity Role.
///
/// All other fields are set to reasonable defaults (no color, not hoisted, not managed,
/// not mentionable, with zero permissions).
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
pub fn create_test_role(role_id: u64, name: &str) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "name": name,
        "color": 0,
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": 1,
        "permissions": "0",
        "managed": false,
        "mentionable": false,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}

/// Creates the role map of a guild, shaped like what `GuildId::roles` returns.
///
/// # Arguments
/// - `roles` - `(role_id, name)` pairs
///
/// # Examples
///
/// ```rust,ignore
/// let roles = create_test_guild_roles(&[(1, "@everyone"), (2, "Ticket RDS")]);
/// assert_eq!(roles.len(), 2);
/// ```
pub fn create_test_guild_roles(roles: &[(u64, &str)]) -> HashMap<RoleId, Role> {
    roles
        .iter()
        .map(|(role_id, name)| (RoleId::new(*role_id), create_test_role(*role_id, name)))
        .collect()
}
