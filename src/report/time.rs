//! Human-readable timestamps

use chrono::{DateTime, Utc};

/// Current Unix time in seconds
pub fn now() -> i64 {
    Utc::now().timestamp()
}

/// RFC 3339 rendering of a Unix timestamp, or the raw number if out of range
pub fn format_timestamp(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|time| time.to_rfc3339())
        .unwrap_or_else(|| seconds.to_string())
}

fn plural(count: i64, unit: &str) -> String {
    format!("{} {}s", count, unit)
}

/// Relative description of `then` as seen from `now`, e.g. "in 3 hours" or
/// "2 days ago". Thresholds follow the usual humanizing conventions, so 40
/// minutes is "40 minutes" but 50 minutes is "an hour".
pub fn relative_label(then: i64, now: i64) -> String {
    let delta = then.saturating_sub(now);
    let seconds = delta.saturating_abs();
    let minutes = (seconds as f64 / 60.0).round() as i64;
    let hours = (seconds as f64 / 3_600.0).round() as i64;
    let days = (seconds as f64 / 86_400.0).round() as i64;

    let span = if seconds < 45 {
        "a few seconds".to_string()
    } else if seconds < 90 {
        "a minute".to_string()
    } else if minutes < 45 {
        plural(minutes, "minute")
    } else if minutes < 90 {
        "an hour".to_string()
    } else if hours < 22 {
        plural(hours, "hour")
    } else if hours < 36 {
        "a day".to_string()
    } else if days < 26 {
        plural(days, "day")
    } else if days < 45 {
        "a month".to_string()
    } else if days < 320 {
        plural((days as f64 / 30.4).round() as i64, "month")
    } else if days < 548 {
        "a year".to_string()
    } else {
        plural((days as f64 / 365.0).round() as i64, "year")
    };

    if delta < 0 {
        format!("{} ago", span)
    } else {
        format!("in {}", span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_label_future_and_past() {
        let now = 1_700_000_000;
        assert_eq!(relative_label(now + 10, now), "in a few seconds");
        assert_eq!(relative_label(now - 60, now), "a minute ago");
        assert_eq!(relative_label(now + 3 * 3_600, now), "in 3 hours");
        assert_eq!(relative_label(now - 2 * 86_400, now), "2 days ago");
        assert_eq!(relative_label(now + 24 * 3_600, now), "in a day");
        assert_eq!(relative_label(now - 40 * 60, now), "40 minutes ago");
        assert_eq!(relative_label(now - 50 * 60, now), "an hour ago");
        assert_eq!(relative_label(now - 3 * 365 * 86_400, now), "3 years ago");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00+00:00");
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }
}
