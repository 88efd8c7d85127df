//! Compact duration tokens such as `30s`, `10m`, `1h` or `2d`.

use crate::error::giveaway::GiveawayError;

const SECOND_MS: u64 = 1_000;
const MINUTE_MS: u64 = 60 * SECOND_MS;
const HOUR_MS: u64 = 60 * MINUTE_MS;
const DAY_MS: u64 = 24 * HOUR_MS;

/// Parses a duration token into milliseconds.
///
/// The token must be one or more ASCII digits followed by exactly one unit character:
/// `s` (seconds), `m` (minutes), `h` (hours) or `d` (days). Signs, whitespace, fractions,
/// and anything after the unit are rejected. A zero magnitude is rejected as well, so a
/// giveaway can never be created already expired.
///
/// # Arguments
/// - `token` - The raw token typed by the user
///
/// # Returns
/// - `Ok(u64)` - Duration in milliseconds
/// - `Err(GiveawayError::InvalidDuration)` - Token has any other shape, is zero, or overflows
pub fn parse_duration_ms(token: &str) -> Result<u64, GiveawayError> {
    let invalid = || GiveawayError::InvalidDuration(token.to_string());

    let mut chars = token.chars();
    let unit = chars.next_back().ok_or_else(invalid)?;
    let digits = chars.as_str();

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let factor = match unit {
        's' => SECOND_MS,
        'm' => MINUTE_MS,
        'h' => HOUR_MS,
        'd' => DAY_MS,
        _ => return Err(invalid()),
    };

    let magnitude: u64 = digits.parse().map_err(|_| invalid())?;
    if magnitude == 0 {
        return Err(invalid());
    }

    magnitude.checked_mul(factor).ok_or_else(invalid)
}
