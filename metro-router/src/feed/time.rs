//! GTFS schedule times.
//!
//! Stop times are written as `HH:MM:SS` offsets from the start of the
//! service day. Hours can run past 23 for trips that continue after
//! midnight, so these are durations rather than times of day.

use chrono::Duration;

/// Parse a GTFS `H:MM:SS` / `HH:MM:SS` offset.
///
/// Returns `None` for anything else.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use metro_router::feed::parse_gtfs_time;
///
/// assert_eq!(parse_gtfs_time("08:30:00"), Some(Duration::minutes(8 * 60 + 30)));
/// assert_eq!(parse_gtfs_time("25:00:00"), Some(Duration::hours(25)));
/// assert_eq!(parse_gtfs_time("8:30"), None);
/// ```
pub fn parse_gtfs_time(s: &str) -> Option<Duration> {
    let mut parts = s.trim().split(':');
    let hours: i64 = parse_part(parts.next()?)?;
    let minutes: i64 = parse_part(parts.next()?)?;
    let seconds: i64 = parse_part(parts.next()?)?;
    if parts.next().is_some() || hours > 999 || minutes > 59 || seconds > 59 {
        return None;
    }
    Some(Duration::hours(hours) + Duration::minutes(minutes) + Duration::seconds(seconds))
}

fn parse_part(part: &str) -> Option<i64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Convert fractional minutes to a Duration, rounded to the millisecond.
pub fn minutes_to_duration(mins: f64) -> Duration {
    Duration::milliseconds((mins * 60_000.0).round() as i64)
}

/// Minutes between leaving one stop and reaching the next.
///
/// `None` if either time is malformed or the gap is not positive.
pub(crate) fn minutes_between(departure: &str, arrival: &str) -> Option<f64> {
    let gap = parse_gtfs_time(arrival)? - parse_gtfs_time(departure)?;
    let mins = gap.num_seconds() as f64 / 60.0;
    (mins > 0.0).then_some(mins)
}
