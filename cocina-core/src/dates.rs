//! Date handling for menu windows.
//!
//! Clients send dates as `YYYY-MM-DD HH:MM` and read them back as
//! `DD/MM/YYYY HH:MM`. Both formats are fixed by the existing front end.

use crate::error::ValidationError;
use chrono::NaiveDateTime;
use serde::Serializer;

/// Format accepted in request bodies.
pub const INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format used when rendering menus.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

pub fn parse_input(raw: &str) -> Result<NaiveDateTime, ValidationError> {
    NaiveDateTime::parse_from_str(raw, INPUT_FORMAT)
        .map_err(|_| ValidationError::MalformedDate(raw.to_string()))
}

pub fn format_display(at: NaiveDateTime) -> String {
    at.format(DISPLAY_FORMAT).to_string()
}

/// Closed-interval overlap: the windows share at least one instant.
pub fn intervals_overlap(
    existing_start: NaiveDateTime,
    existing_end: NaiveDateTime,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> bool {
    existing_end >= start && existing_start <= end
}

/// `#[serde(serialize_with = "display_format")]` for timestamps shown to clients.
pub fn display_format<S: Serializer>(at: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_display(*at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("2024-01-10 08:30").unwrap(), at(2024, 1, 10, 8, 30));
    }

    #[test]
    fn test_parse_rejects_display_format() {
        assert_eq!(
            parse_input("10/01/2024 08:30"),
            Err(ValidationError::MalformedDate("10/01/2024 08:30".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_missing_time() {
        assert!(parse_input("2024-01-10").is_err());
        assert!(parse_input("").is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display(at(2024, 1, 5, 9, 0)), "05/01/2024 09:00");
    }

    #[test]
    fn test_overlap_shared_boundary_counts() {
        let existing = (at(2024, 1, 10, 0, 0), at(2024, 1, 20, 0, 0));
        assert!(intervals_overlap(
            existing.0,
            existing.1,
            at(2024, 1, 20, 0, 0),
            at(2024, 1, 25, 0, 0)
        ));
    }

    #[test]
    fn test_overlap_disjoint_windows() {
        let existing = (at(2024, 1, 10, 0, 0), at(2024, 1, 20, 0, 0));
        assert!(!intervals_overlap(
            existing.0,
            existing.1,
            at(2024, 1, 21, 0, 0),
            at(2024, 1, 25, 0, 0)
        ));
        assert!(!intervals_overlap(
            existing.0,
            existing.1,
            at(2024, 1, 1, 0, 0),
            at(2024, 1, 9, 23, 59)
        ));
    }

    #[test]
    fn test_overlap_containment() {
        assert!(intervals_overlap(
            at(2024, 1, 10, 0, 0),
            at(2024, 1, 20, 0, 0),
            at(2024, 1, 12, 0, 0),
            at(2024, 1, 13, 0, 0)
        ));
        assert!(intervals_overlap(
            at(2024, 1, 12, 0, 0),
            at(2024, 1, 13, 0, 0),
            at(2024, 1, 10, 0, 0),
            at(2024, 1, 20, 0, 0)
        ));
    }
}
