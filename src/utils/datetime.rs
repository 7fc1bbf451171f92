use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Formats a timestamp the way statistics replies show it.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Fixed-width RFC 3339 form used in the database, so that text ordering
/// matches chronological ordering.
pub fn to_db_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_db_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Renders an elapsed duration as `H:MM:SS`, prefixed with the day count
/// once it reaches a full day. Negative durations are clamped to zero.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    match days {
        0 => format!("{hours}:{minutes:02}:{seconds:02}"),
        1 => format!("1 dia, {hours}:{minutes:02}:{seconds:02}"),
        _ => format!("{days} dias, {hours}:{minutes:02}:{seconds:02}"),
    }
}
