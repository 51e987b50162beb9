//! Local clock rendering from a UTC timestamp plus the city's UTC offset.
//!
//! The offset is applied to the timestamp and the result read back as UTC, so
//! the host timezone never leaks into the output.

use chrono::{DateTime, Utc};

fn shifted(unix_ts: i64, offset_secs: i32) -> Option<DateTime<Utc>> {
    let local = unix_ts.checked_add(i64::from(offset_secs))?;
    DateTime::from_timestamp(local, 0)
}

/// `hh:mm AM|PM`, e.g. `11:26 PM`. `None` only outside chrono's date range.
pub fn format_local_time(unix_ts: i64, offset_secs: i32) -> Option<String> {
    shifted(unix_ts, offset_secs).map(|dt| dt.format("%I:%M %p").to_string())
}

/// Forecast card label, e.g. `Fri, Jul 21`.
pub fn format_day_label(unix_ts: i64, offset_secs: i32) -> Option<String> {
    shifted(unix_ts, offset_secs).map(|dt| dt.format("%a, %b %-d").to_string())
}
