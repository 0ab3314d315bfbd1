//! Maintenance age arithmetic for the fleet dashboard.

use chrono::{DateTime, Duration, Utc};

/// Age reported for a vehicle that has never been serviced.
pub const DEFAULT_MAINTENANCE_AGE_DAYS: i64 = 45;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days since the last service, rounded up.
///
/// Uses the absolute difference, so a date in the future still yields a
/// positive count. A missing date is treated as exactly
/// [`DEFAULT_MAINTENANCE_AGE_DAYS`] ago.
pub fn days_since_last_maintenance(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    let last = last.unwrap_or_else(|| now - Duration::days(DEFAULT_MAINTENANCE_AGE_DAYS));
    let millis = (now - last).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}
