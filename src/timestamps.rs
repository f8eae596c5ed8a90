use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDateTime, Offset, SecondsFormat, TimeZone,
    Utc,
};
use std::fmt;

/// Service timezone: all reservations are expressed at UTC+8.
pub const SERVICE_OFFSET_SECS: i32 = 8 * 3600;

/// Formats accepted from `<input type="datetime-local">` and similar pickers.
const LOCAL_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// `%Y` accepts signed, unbounded years; reservations live in four-digit ones.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1..=9999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    Unparseable(String),
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::Unparseable(value) => {
                write!(f, "Invalid date-time '{}'. Expected YYYY-MM-DDTHH:MM or RFC3339", value)
            }
        }
    }
}

impl std::error::Error for TimestampError {}

pub fn service_offset() -> FixedOffset {
    FixedOffset::east_opt(SERVICE_OFFSET_SECS).expect("UTC+8 is within the valid offset range")
}

/// Normalizes a form date-time to an absolute UTC+8 timestamp using the
/// machine's local clock. See [`to_utc8_in`].
pub fn to_utc8(input: &str) -> Result<String, TimestampError> {
    to_utc8_in(input, &chrono::Local)
}

/// Normalizes a form date-time to an absolute RFC 3339 timestamp at `+08:00`.
///
/// - Empty input stays empty (never coerced to the epoch).
/// - A wall-clock value is first read on `local`, then shifted by the
///   difference between the local offset and UTC+8, so the result always
///   shows the entered wall time at UTC+8 whatever `local` is.
/// - An absolute RFC 3339 value keeps its instant and is re-expressed at
///   `+08:00`, which makes the conversion idempotent.
pub fn to_utc8_in<Tz: TimeZone>(input: &str, local: &Tz) -> Result<String, TimestampError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(String::new());
    }

    if let Ok(absolute) = DateTime::parse_from_rfc3339(input) {
        return Ok(encode(absolute.with_timezone(&service_offset())));
    }

    let naive = parse_wall_clock(input)?;

    let instant = match local.from_local_datetime(&naive).earliest() {
        Some(local_dt) => {
            let local_offset = local_dt.offset().fix().local_minus_utc();
            local_dt
                .with_timezone(&Utc)
                .checked_add_signed(Duration::seconds(i64::from(
                    local_offset - SERVICE_OFFSET_SECS,
                )))
                .ok_or_else(|| TimestampError::Unparseable(input.to_string()))?
        }
        // Wall time skipped by a DST jump on the local clock; the
        // compensated result is the same wall time read at UTC+8.
        None => service_offset()
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| TimestampError::Unparseable(input.to_string()))?
            .with_timezone(&Utc),
    };

    Ok(encode(instant.with_timezone(&service_offset())))
}

/// Renders a stored timestamp as `YYYY-MM-DD HH:MM` at UTC+8 for operator messages.
///
/// Returns `None` for empty input. Values that are not RFC 3339 are shown verbatim.
pub fn display_utc8(timestamp: &str) -> Option<String> {
    let timestamp = timestamp.trim();
    if timestamp.is_empty() {
        return None;
    }

    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => Some(
            dt.with_timezone(&service_offset())
                .format("%Y-%m-%d %H:%M")
                .to_string(),
        ),
        Err(e) => {
            tracing::warn!("Showing unparseable timestamp '{}' verbatim: {}", timestamp, e);
            Some(timestamp.to_string())
        }
    }
}

fn parse_wall_clock(input: &str) -> Result<NaiveDateTime, TimestampError> {
    LOCAL_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .filter(|naive| YEAR_RANGE.contains(&naive.year()))
        .ok_or_else(|| TimestampError::Unparseable(input.to_string()))
}

fn encode(dt: DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert_eq!(to_utc8_in("", &offset(9)).unwrap(), "");
        assert_eq!(to_utc8_in("   ", &Utc).unwrap(), "");
        assert_eq!(display_utc8(""), None);
    }

    #[test]
    fn test_wall_clock_lands_on_utc8() {
        let seoul = to_utc8_in("2025-03-01T10:00", &offset(9)).unwrap();
        assert_eq!(seoul, "2025-03-01T10:00:00+08:00");

        let utc = to_utc8_in("2025-03-01T10:00", &Utc).unwrap();
        assert_eq!(utc, seoul);

        let new_york = to_utc8_in("2025-03-01T10:00", &offset(-5)).unwrap();
        assert_eq!(new_york, seoul);
    }

    #[test]
    fn test_absolute_timestamp_keeps_instant() {
        let converted = to_utc8_in("2025-03-01T02:00:00.000Z", &offset(9)).unwrap();
        assert_eq!(converted, "2025-03-01T10:00:00+08:00");
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let once = to_utc8_in("2025-12-31T23:30", &offset(3)).unwrap();
        let twice = to_utc8_in(&once, &offset(-7)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rejects_garbage() {
        let err = to_utc8_in("next tuesday", &Utc).unwrap_err();
        assert_eq!(err, TimestampError::Unparseable("next tuesday".to_string()));
    }

    #[test]
    fn test_rejects_out_of_range_years() {
        let input = "-262143-01-01T00:00";
        let expected = Err(TimestampError::Unparseable(input.to_string()));
        assert_eq!(to_utc8_in(input, &offset(-12)), expected);
        assert_eq!(to_utc8_in(input, &Utc), expected);
        assert!(to_utc8_in("+262142-12-31T23:59", &offset(14)).is_err());
        assert!(to_utc8_in("0000-06-01T12:00", &offset(9)).is_err());
    }

    #[test]
    fn test_first_year_still_converts() {
        let converted = to_utc8_in("0001-01-01T00:00", &offset(-12)).unwrap();
        assert_eq!(converted, "0001-01-01T00:00:00+08:00");
    }

    #[test]
    fn test_display_utc8() {
        assert_eq!(
            display_utc8("2025-03-01T02:00:00Z").as_deref(),
            Some("2025-03-01 10:00")
        );
        assert_eq!(
            display_utc8("2025-03-01T10:00:00+08:00").as_deref(),
            Some("2025-03-01 10:00")
        );
        assert_eq!(display_utc8("soon").as_deref(), Some("soon"));
    }
}
