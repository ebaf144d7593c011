//! Attendance: record listing, overall and per-subject stats, manual entry,
//! and CSV bulk upload.

use super::QueryPairs;
use crate::error::{ApiError, ApiResult};
use crate::gateway::ApiClient;
use crate::models::{
    AttendanceRecord, AttendanceStats, AttendanceStatus, BulkUploadSummary, SubjectWiseStats,
};
use chrono::NaiveDate;
use common::format_validation_errors;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use validator::Validate;

#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub student_id: Option<String>,
    pub subject: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl AttendanceFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut q = QueryPairs::new();
        q.push_opt("student_id", self.student_id.as_ref());
        q.push_opt("subject", self.subject.as_ref());
        q.push_opt("start_date", self.start_date);
        q.push_opt("end_date", self.end_date);
        q.into_vec()
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewAttendance {
    #[validate(length(min = 1, message = "Student ID must not be empty"))]
    pub student_id: String,
    #[validate(length(min = 1, message = "Subject must not be empty"))]
    pub subject: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// `GET /api/attendance`. Students only ever see their own records; the
/// backend enforces that regardless of the filter.
pub async fn list(client: &ApiClient, filter: &AttendanceFilter) -> ApiResult<Vec<AttendanceRecord>> {
    client.get("/api/attendance", &filter.to_query()).await
}

/// `GET /api/attendance/stats`.
pub async fn overall_stats(
    client: &ApiClient,
    student_id: Option<&str>,
    subject: Option<&str>,
) -> ApiResult<AttendanceStats> {
    let mut q = QueryPairs::new();
    q.push_opt("student_id", student_id);
    q.push_opt("subject", subject);
    client.get("/api/attendance/stats", &q.into_vec()).await
}

/// `GET /api/attendance/stats/subject-wise`.
pub async fn subject_wise_stats(
    client: &ApiClient,
    student_id: Option<&str>,
) -> ApiResult<SubjectWiseStats> {
    let mut q = QueryPairs::new();
    q.push_opt("student_id", student_id);
    client
        .get("/api/attendance/stats/subject-wise", &q.into_vec())
        .await
}

/// `POST /api/attendance/` (admin only).
pub async fn create(client: &ApiClient, record: &NewAttendance) -> ApiResult<AttendanceRecord> {
    record
        .validate()
        .map_err(|errs| ApiError::Invalid(format_validation_errors(&errs)))?;
    client.post_json("/api/attendance/", record).await
}

/// `POST /api/attendance/bulk-upload` (admin only): multipart CSV upload.
/// Returns the inserted/skipped/total counts reported by the backend.
pub async fn bulk_upload(
    client: &ApiClient,
    file_name: &str,
    csv: Vec<u8>,
) -> ApiResult<BulkUploadSummary> {
    if !file_name.to_lowercase().ends_with(".csv") {
        return Err(ApiError::Invalid("File must be a CSV".into()));
    }

    let part = Part::bytes(csv)
        .file_name(file_name.to_string())
        .mime_str("text/csv")?;
    let form = Form::new().part("file", part);
    client
        .post_multipart("/api/attendance/bulk-upload", form, &[])
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_builds_empty_query() {
        assert!(AttendanceFilter::default().to_query().is_empty());
    }

    #[test]
    fn populated_filter_keeps_field_order() {
        let filter = AttendanceFilter {
            student_id: Some("S1".into()),
            subject: None,
            start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            end_date: None,
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("student_id", "S1".to_string()),
                ("start_date", "2024-01-15".to_string()),
            ]
        );
    }

    #[test]
    fn new_attendance_requires_subject() {
        let record = NewAttendance {
            student_id: "S1".into(),
            subject: "".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status: AttendanceStatus::Present,
        };
        assert!(record.validate().is_err());
    }
}
