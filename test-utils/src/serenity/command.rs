//! Test factory for creating slash command data.

use serenity::all::CommandData;

/// Creates the data of a chat input command invocation.
///
/// # Arguments
/// - `name` - Command name
/// - `options` - Raw option array as Discord sends it
///
/// # Panics
/// - If the JSON cannot be deserialized into CommandData (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// let data = create_test_command_data(
///     "task",
///     serde_json::json!([{ "name": "text", "type": 3, "value": "Fix tickets" }]),
/// );
/// let options = data.options();
/// ```
pub fn create_test_command_data(name: &str, options: serde_json::Value) -> CommandData {
    serde_json::from_value(serde_json::json!({
        "id": "100000000000000001",
        "name": name,
        "type": 1,
        "options": options,
    }))
    .expect("Failed to create test command data - invalid JSON structure")
}
