//! Timestamp rendering for the console line format
//!
//! The console format is month-day and 24-hour time with up to three
//! fractional-second digits: `01-08 10:30:45.12`. Fractions are truncated
//! to milliseconds, trailing zeros are trimmed and a zero fraction is
//! dropped together with its dot.

use chrono::{DateTime, TimeZone, Timelike};
use std::fmt::{self, Write};

/// Column width the console sink pads timestamps to.
pub const CONSOLE_TIMESTAMP_WIDTH: usize = 18;

/// Format a timestamp in the console layout.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use logadapter::core::timestamp::console_timestamp;
///
/// let ts = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(console_timestamp(&ts), "01-08 10:30:45");
/// ```
#[must_use]
pub fn console_timestamp<Tz>(datetime: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::with_capacity(CONSOLE_TIMESTAMP_WIDTH);
    let _ = write!(out, "{}", datetime.format("%m-%d %H:%M:%S"));
    push_millis(&mut out, datetime.nanosecond());
    out
}

fn push_millis(out: &mut String, nanos: u32) {
    // nanosecond() exceeds 999_999_999 during a leap second
    let millis = (nanos / 1_000_000).min(999);
    if millis == 0 {
        return;
    }
    let digits = format!("{:03}", millis);
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}
