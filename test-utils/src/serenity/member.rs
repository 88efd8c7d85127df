//! Test factory for creating Serenity Member objects.

use serenity::all::Member;

/// Creates a test guild member holding the given roles.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `guild_id` - Guild the member belongs to
/// - `username` - Username of the member, also used as display name
/// - `role_ids` - Roles the member holds
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
pub fn create_test_member(user_id: u64, guild_id: u64, username: &str, role_ids: &[u64]) -> Member {
    let roles: Vec<String> = role_ids.iter().map(|id| id.to_string()).collect();

    serde_json::from_value(serde_json::json!({
        "user": {
            "id": user_id.to_string(),
            "username": username,
            "discriminator": "0",
            "global_name": null,
            "avatar": null,
            "bot": false,
        },
        "guild_id": guild_id.to_string(),
        "nick": null,
        "avatar": null,
        "roles": roles,
        "joined_at": "2020-01-01T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "communication_disabled_until": null,
    }))
    .expect("Failed to create test member - invalid JSON structure")
}
