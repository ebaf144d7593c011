//! Timetable: listing, the assembled weekly view, and admin authoring.

use super::QueryPairs;
use crate::error::{ApiError, ApiResult};
use crate::gateway::ApiClient;
use crate::models::{TimetableEntry, Weekday, WeeklyTimetable};
use common::format_validation_errors;
use serde::Serialize;
use validator::Validate;

lazy_static::lazy_static! {
    static ref TIME_REGEX: regex::Regex = regex::Regex::new("^([01]\\d|2[0-3]):[0-5]\\d$").unwrap();
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewTimeSlot {
    #[validate(regex(path = "TIME_REGEX", message = "Start time must be HH:MM"))]
    pub start_time: String,
    #[validate(regex(path = "TIME_REGEX", message = "End time must be HH:MM"))]
    pub end_time: String,
    #[validate(length(min = 1, message = "Subject must not be empty"))]
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

/// One day's slots for one student, or the shared default when `student_id`
/// is absent.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewTimetable {
    pub student_id: Option<String>,
    pub day: Weekday,
    #[validate(length(min = 1, message = "At least one time slot is required"))]
    pub time_slots: Vec<NewTimeSlot>,
}

/// `GET /api/timetable`.
pub async fn list(
    client: &ApiClient,
    student_id: Option<&str>,
    day: Option<Weekday>,
) -> ApiResult<Vec<TimetableEntry>> {
    let mut q = QueryPairs::new();
    q.push_opt("student_id", student_id);
    q.push_opt("day", day);
    client.get("/api/timetable", &q.into_vec()).await
}

/// `GET /api/timetable/current-week`: one schedule per day, student-specific
/// entries taking precedence over the shared default.
pub async fn current_week(client: &ApiClient) -> ApiResult<WeeklyTimetable> {
    client.get("/api/timetable/current-week", &[]).await
}

/// `POST /api/timetable/` (admin only). Creates or replaces the day's entry.
pub async fn create(client: &ApiClient, entry: &NewTimetable) -> ApiResult<TimetableEntry> {
    entry
        .validate()
        .map_err(|errs| ApiError::Invalid(format_validation_errors(&errs)))?;
    for slot in &entry.time_slots {
        slot.validate()
            .map_err(|errs| ApiError::Invalid(format_validation_errors(&errs)))?;
    }
    client.post_json("/api/timetable/", entry).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: &str, end: &str) -> NewTimeSlot {
        NewTimeSlot {
            start_time: start.into(),
            end_time: end.into(),
            subject: "Algorithms".into(),
            faculty: None,
            room: None,
        }
    }

    #[test]
    fn valid_slot_passes() {
        assert!(slot("09:00", "10:30").validate().is_ok());
    }

    #[test]
    fn malformed_time_is_rejected() {
        let errs = slot("9am", "10:30").validate().unwrap_err();
        assert!(format_validation_errors(&errs).contains("HH:MM"));
    }

    #[test]
    fn empty_slot_list_is_rejected() {
        let entry = NewTimetable {
            student_id: None,
            day: Weekday::Monday,
            time_slots: vec![],
        };
        assert!(entry.validate().is_err());
    }

    #[test]
    fn day_filter_serializes_capitalized() {
        let mut q = QueryPairs::new();
        q.push_opt("day", Some(Weekday::Tuesday));
        assert_eq!(q.into_vec(), vec![("day", "Tuesday".to_string())]);
    }
}
