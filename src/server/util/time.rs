//! Relative time formatting.
//!
//! Turns absolute timestamps into the short "5 minutes ago" strings shown next to users,
//! rates and comments. Months are approximated as 30 days and years as 365 days.

use chrono::NaiveDateTime;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Formats `then` relative to `now`.
///
/// Anything less than a minute old, and any timestamp in the future, is "just now".
///
/// # Example
/// ```ignore
/// let then = now - chrono::Duration::hours(3);
/// assert_eq!(format_relative(then, now), "3 hours ago");
/// ```
pub fn format_relative(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let elapsed = (now - then).num_seconds();

    let (count, unit) = match elapsed {
        s if s < MINUTE => return "just now".to_string(),
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s if s < MONTH => (s / DAY, "day"),
        s if s < YEAR => (s / MONTH, "month"),
        s => (s / YEAR, "year"),
    };

    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
