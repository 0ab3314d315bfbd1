//! Human readable "time ago" strings for the activity feed.

use chrono::{DateTime, Utc};

/// Describe `then` relative to `now` in English.
///
/// Buckets: seconds under a minute ("now" at zero), minutes under an hour,
/// hours under a day, days under 30 ("yesterday" for one), then the
/// calendar date.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);

    if seconds < 60 {
        return match seconds {
            0 => "now".to_string(),
            1 => "1 second ago".to_string(),
            n => format!("{n} seconds ago"),
        };
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    if days < 30 {
        return if days == 1 {
            "yesterday".to_string()
        } else {
            plural(days, "day")
        };
    }

    then.format("%Y-%m-%d").to_string()
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
