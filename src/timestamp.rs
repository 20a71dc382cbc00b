//! Strict parsing of human-readable moments.
//!
//! The only accepted shape is `"yyyy-MM-dd HH:mm:ss.SSS <zone>"`, e.g.
//! `"2017-03-13 02:12:30.763 UTC"` or `"2017-04-21 14:22:12.000 Europe/Moscow"`.
//! Milliseconds and the zone are mandatory and there is no lenient field
//! resolution: anything that does not match is an error, never a fallback.

use chrono::NaiveDateTime;
use chrono_tz::Tz;

use crate::error::ClockError;

const MOMENT_FORMAT: &str = "%Y-%m-%d %H:%M:%S.%3f";

/// Parse a moment string into epoch milliseconds.
pub fn parse_epoch_ms(moment: &str) -> Result<i64, ClockError> {
    let (datetime_part, zone_part) = moment
        .rsplit_once(' ')
        .ok_or_else(|| ClockError::timestamp(moment, "missing time zone"))?;

    let zone: Tz = zone_part
        .parse()
        .map_err(|_| ClockError::timestamp(moment, format!("unknown time zone '{zone_part}'")))?;

    let naive = NaiveDateTime::parse_from_str(datetime_part, MOMENT_FORMAT)
        .map_err(|e| ClockError::timestamp(moment, e))?;

    let zoned = naive
        .and_local_timezone(zone)
        .single()
        .ok_or_else(|| ClockError::timestamp(moment, "ambiguous or nonexistent local time"))?;

    Ok(zoned.timestamp_millis())
}
