use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from a string slice
///
/// # Arguments
/// - `value` - The string to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed string to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_str(value: &str) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value: value.to_string(),
            source: e,
        })?;

    Ok(result)
}

/// Splits a component custom ID of the form `<action>:<id>`.
///
/// # Arguments
/// - `custom_id` - The custom ID attached to a button
///
/// # Returns
/// - `Some((action, id))` - Custom ID contained a separator
/// - `None` - Custom ID has no `:` separator
pub fn split_custom_id(custom_id: &str) -> Option<(&str, &str)> {
    custom_id.split_once(':')
}
