// raffbot-core/src/utils/duration.rs

use chrono::Duration;
use once_cell::sync::Lazy;
use regex::Regex;

use raffbot_common::Error;

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(\d+)([mhd])$").expect("duration regex is valid"));

/// Parses a duration token of the form `<integer><unit>`, unit one of
/// m/h/d (minutes, hours, days), case-insensitive. No combined units, no
/// fractions, no weeks. A zero value is rejected so `end_time` always
/// lands strictly after `start_time`, and values too large to represent
/// are rejected rather than allowed to overflow.
pub fn parse_duration(input: &str) -> Result<Duration, Error> {
    let caps = DURATION_RE
        .captures(input.trim())
        .ok_or_else(|| Error::InvalidDuration(input.to_string()))?;
    let value: i64 = caps[1]
        .parse()
        .map_err(|_| Error::InvalidDuration(input.to_string()))?;
    if value == 0 {
        return Err(Error::InvalidDuration(input.to_string()));
    }
    let duration = match caps[2].to_ascii_lowercase().as_str() {
        "m" => Duration::try_minutes(value),
        "h" => Duration::try_hours(value),
        "d" => Duration::try_days(value),
        _ => None,
    };
    duration.ok_or_else(|| Error::InvalidDuration(input.to_string()))
}
