use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Parse a feed timestamp leniently.
///
/// Accepts RFC 3339 instants (`2026-06-30T08:15:00Z`, `...+05:45`), civil
/// date-times without an offset and bare dates. Values without an offset are
/// read in `tz`. Anything else yields `None`; callers treat that the same as a
/// missing timestamp.
pub fn parse_timestamp(raw: &str, tz: &TimeZone) -> Option<Zoned> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Some(ts.to_zoned(tz.clone()));
    }
    if let Ok(dt) = raw.parse::<DateTime>() {
        return dt.to_zoned(tz.clone()).ok();
    }
    if let Ok(date) = raw.parse::<Date>() {
        return date.to_zoned(tz.clone()).ok();
    }

    tracing::trace!(raw, "unparseable timestamp");
    None
}

/// Whole days elapsed from `then` to `now`, floored. Negative when `then` lies
/// in the future.
pub fn day_difference(then: &Zoned, now: &Zoned) -> i64 {
    let elapsed = now.timestamp().as_millisecond() - then.timestamp().as_millisecond();
    elapsed.div_euclid(MILLIS_PER_DAY)
}

/// Format `then` relative to `now` as "2d ago", "3h ago", "15m ago" or
/// "just now".
pub fn format_relative(then: &Zoned, now: &Zoned) -> String {
    let delta = now.timestamp().as_second() - then.timestamp().as_second();

    // Future or same instant
    if delta <= 0 {
        return "just now".to_string();
    }

    let days = delta / 86_400;
    if days > 0 {
        return format!("{}d ago", days);
    }

    let hours = delta / 3_600;
    if hours > 0 {
        return format!("{}h ago", hours);
    }

    let minutes = delta / 60;
    if minutes > 0 {
        return format!("{}m ago", minutes);
    }

    "just now".to_string()
}
