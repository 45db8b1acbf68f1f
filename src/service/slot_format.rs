//! Display strings for slot timestamps.
//!
//! The plain functions render in the machine's local zone; the `_in` variants
//! take the zone explicitly.

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::BookingError;

const CLOCK_FORMAT: &str = "%-I:%M %p";
const DATE_FORMAT: &str = "%Y-%m-%d";

// Offsets without a colon or without minutes, which RFC 3339 rejects.
const OFFSET_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

// Offset-less datetimes, tried last.
const LOCAL_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// `2024-03-15T14:30:00Z` -> `2:30 PM` (in local time).
pub fn format_slot_time(iso: &str) -> Result<String, BookingError> {
    format_slot_time_in(iso, &Local)
}

/// `2024-03-15T14:30:00Z` -> `2024-03-15` (in local time).
pub fn format_slot_date(iso: &str) -> Result<String, BookingError> {
    format_slot_date_in(iso, &Local)
}

pub fn format_slot_time_in<Tz: TimeZone>(iso: &str, tz: &Tz) -> Result<String, BookingError>
where
    Tz::Offset: Display,
{
    Ok(parse_iso_in(iso, tz)?.format(CLOCK_FORMAT).to_string())
}

pub fn format_slot_date_in<Tz: TimeZone>(iso: &str, tz: &Tz) -> Result<String, BookingError>
where
    Tz::Offset: Display,
{
    Ok(parse_iso_in(iso, tz)?.format(DATE_FORMAT).to_string())
}

/// Reads an ISO-8601 timestamp as an instant in `tz`.
///
/// Input without an offset is wall-clock time in `tz`; a bare date is
/// midnight.
pub fn parse_iso_in<Tz: TimeZone>(iso: &str, tz: &Tz) -> Result<DateTime<Tz>, BookingError> {
    let input = iso.trim();
    if input.is_empty() {
        return Err(BookingError::format(iso, "empty timestamp"));
    }
    let fixed = DateTime::parse_from_rfc3339(input).ok().or_else(|| {
        OFFSET_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(input, fmt).ok())
    });
    if let Some(fixed) = fixed {
        return Ok(fixed.with_timezone(tz));
    }

    let naive = LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| BookingError::format(iso, "not an ISO-8601 datetime"))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| BookingError::format(iso, "time does not exist in the display timezone"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use chrono_tz::America::New_York;

    #[test]
    fn midnight_is_twelve_am() {
        assert_eq!(format_slot_time_in("2024-03-15T00:05:00Z", &Utc).unwrap(), "12:05 AM");
    }

    #[test]
    fn noon_is_twelve_pm() {
        assert_eq!(format_slot_time_in("2024-03-15T12:00:00Z", &Utc).unwrap(), "12:00 PM");
    }

    #[test]
    fn offset_is_respected() {
        assert_eq!(
            format_slot_time_in("2024-03-15T14:30:00+02:00", &Utc).unwrap(),
            "12:30 PM"
        );
    }

    #[test]
    fn compact_and_hour_only_offsets_are_accepted() {
        for input in [
            "2024-03-15T14:30:00+0200",
            "2024-03-15T14:30:00+02",
            "2024-03-15T14:30:00.5+0200",
            "2024-03-15 14:30:00+0200",
            "2024-03-15T14:30+02",
        ] {
            assert_eq!(format_slot_time_in(input, &Utc).unwrap(), "12:30 PM", "{input}");
        }
        assert_eq!(
            format_slot_time_in("2024-03-15T14:30:00-0530", &Utc).unwrap(),
            "8:00 PM"
        );
    }

    #[test]
    fn space_separator_matches_t_separator() {
        assert_eq!(format_slot_time_in("2024-03-15 14:30:00Z", &Utc).unwrap(), "2:30 PM");
        assert_eq!(format_slot_time_in("2024-03-15 14:30:00", &Utc).unwrap(), "2:30 PM");
        assert_eq!(format_slot_time_in("2024-03-15 14:30", &Utc).unwrap(), "2:30 PM");
        assert_eq!(format_slot_date_in("2024-03-15 23:59:59.999", &Utc).unwrap(), "2024-03-15");
    }

    #[test]
    fn fractional_seconds_are_accepted() {
        assert_eq!(
            format_slot_time_in("2024-03-15T14:30:00.250Z", &Utc).unwrap(),
            "2:30 PM"
        );
    }

    #[test]
    fn naive_datetime_is_wall_clock_in_zone() {
        assert_eq!(format_slot_time_in("2024-03-15T09:15", &New_York).unwrap(), "9:15 AM");
        assert_eq!(format_slot_time_in("2024-03-15T09:15:30", &New_York).unwrap(), "9:15 AM");
    }

    #[test]
    fn bare_date_is_midnight() {
        assert_eq!(format_slot_time_in("2024-03-15", &New_York).unwrap(), "12:00 AM");
        assert_eq!(format_slot_date_in("2024-03-15", &New_York).unwrap(), "2024-03-15");
    }

    #[test]
    fn dst_gap_is_a_format_error() {
        // Clocks jump from 2:00 to 3:00 on 2024-03-10 in New York.
        let err = format_slot_time_in("2024-03-10T02:30:00", &New_York).unwrap_err();
        assert!(matches!(err, BookingError::Format { .. }));
    }

    #[test]
    fn garbage_is_a_format_error() {
        for input in ["", "tomorrow", "2024-13-01T00:00:00Z", "15/03/2024"] {
            let err = format_slot_date_in(input, &Utc).unwrap_err();
            assert!(matches!(err, BookingError::Format { .. }), "{input}");
        }
    }
}
