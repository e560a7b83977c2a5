//! Date-window checks for new menus.

use crate::dates::{intervals_overlap, parse_input};
use crate::error::{MenuError, ValidationError};
use crate::menu::MenuPayload;
use crate::store::MenuStore;
use chrono::NaiveDateTime;

/// A parsed, accepted menu window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Parses the window and checks it against `now`, without touching storage.
pub fn check_window(payload: &MenuPayload, now: NaiveDateTime) -> Result<Schedule, ValidationError> {
    let start = parse_input(payload.start.as_deref().unwrap_or_default())?;
    let end = parse_input(payload.end.as_deref().unwrap_or_default())?;

    if start > end {
        return Err(ValidationError::StartAfterEnd);
    }

    if start < now || end < now {
        return Err(ValidationError::DatesInPast);
    }

    Ok(Schedule { start, end })
}

/// Full schedule validation for a menu at `restaurant_id`.
///
/// Runs [`check_window`] and then one overlap query against the restaurant's
/// existing menus. `now` is the wall clock read by the caller.
pub fn validate_schedule<S: MenuStore>(
    store: &mut S,
    payload: &MenuPayload,
    restaurant_id: i32,
    now: NaiveDateTime,
) -> Result<Schedule, MenuError<S::Error>> {
    let schedule = check_window(payload, now)?;

    let clash = store
        .find_menus_overlapping(restaurant_id, schedule.start, schedule.end)
        .map_err(MenuError::Store)?
        .into_iter()
        .find(|m| intervals_overlap(m.starts_at, m.ends_at, schedule.start, schedule.end));

    if let Some(existing) = clash {
        tracing::debug!(
            restaurant_id,
            existing_menu = existing.id,
            "rejecting menu window overlapping an existing menu"
        );
        return Err(ValidationError::OverlappingMenu.into());
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn window(start: &str, end: &str) -> MenuPayload {
        MenuPayload {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
            ..Default::default()
        }
    }

    fn rejection(result: Result<Schedule, MenuError<std::convert::Infallible>>) -> ValidationError {
        match result {
            Err(MenuError::Rejected(reason)) => reason,
            other => panic!("expected a rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_start_after_end() {
        let now = at(2024, 1, 1);
        assert_eq!(
            check_window(&window("2024-09-20 10:00", "2024-09-14 12:00"), now),
            Err(ValidationError::StartAfterEnd)
        );
    }

    #[test]
    fn test_start_after_end_wins_over_past_dates() {
        let now = at(2025, 1, 1);
        assert_eq!(
            check_window(&window("2023-09-20 10:00", "2023-09-14 12:00"), now),
            Err(ValidationError::StartAfterEnd)
        );
    }

    #[test]
    fn test_dates_in_past() {
        let now = at(2024, 1, 1);
        assert_eq!(
            check_window(&window("2023-09-13 10:00", "2023-09-14 12:00"), now),
            Err(ValidationError::DatesInPast)
        );
    }

    #[test]
    fn test_malformed_dates() {
        let now = at(2024, 1, 1);
        assert_eq!(
            check_window(&window("13/09/2024 10:00", "2024-09-14 12:00"), now),
            Err(ValidationError::MalformedDate("13/09/2024 10:00".to_string()))
        );
        assert!(matches!(
            check_window(&MenuPayload::default(), now),
            Err(ValidationError::MalformedDate(_))
        ));
    }

    #[test]
    fn test_same_instant_start_and_end_is_accepted() {
        let now = at(2024, 1, 1);
        let schedule = check_window(&window("2024-02-01 12:00", "2024-02-01 12:00"), now).unwrap();
        assert_eq!(schedule.start, schedule.end);
    }

    #[test]
    fn test_past_dates_checked_before_overlap() {
        let mut store = InMemoryStore::new().with_restaurant(1, 10);
        store.add_menu(1, "Enero", at(2023, 9, 1), at(2023, 9, 30));

        let result = validate_schedule(
            &mut store,
            &window("2023-09-13 10:00", "2023-09-14 12:00"),
            1,
            at(2024, 1, 1),
        );
        assert_eq!(rejection(result), ValidationError::DatesInPast);
    }

    #[test]
    fn test_overlap_is_scoped_to_restaurant() {
        let mut store = InMemoryStore::new()
            .with_restaurant(1, 10)
            .with_restaurant(2, 10);
        store.add_menu(2, "Otro local", at(2024, 1, 10), at(2024, 1, 20));

        let schedule = validate_schedule(
            &mut store,
            &window("2024-01-15 00:00", "2024-01-25 00:00"),
            1,
            at(2024, 1, 1),
        )
        .unwrap();
        assert_eq!(schedule.start, at(2024, 1, 15));
    }
}
