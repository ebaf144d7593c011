//! Past-year question papers: filtered listing, subject index, upload, delete.

use super::QueryPairs;
use crate::error::{ApiError, ApiResult};
use crate::gateway::ApiClient;
use crate::models::{PyqRecord, SubjectList};
use common::format_validation_errors;
use reqwest::multipart::{Form, Part};
use validator::Validate;

const ALLOWED_EXTENSIONS: [&str; 3] = [".pdf", ".doc", ".docx"];

#[derive(Debug, Clone, Default)]
pub struct PyqFilter {
    pub subject: Option<String>,
    pub semester: Option<i32>,
    pub year: Option<i32>,
    pub exam_type: Option<String>,
}

impl PyqFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut q = QueryPairs::new();
        q.push_opt("subject", self.subject.as_ref());
        q.push_opt("semester", self.semester);
        q.push_opt("year", self.year);
        q.push_opt("exam_type", self.exam_type.as_ref());
        q.into_vec()
    }
}

/// Paper metadata; the backend takes it in the query string, with the file as
/// the multipart body.
#[derive(Debug, Clone, Validate)]
pub struct NewPyq {
    #[validate(length(min = 1, message = "Subject must not be empty"))]
    pub subject: String,
    #[validate(range(min = 1, max = 12, message = "Semester must be between 1 and 12"))]
    pub semester: i32,
    #[validate(range(min = 1990, max = 2100, message = "Year is out of range"))]
    pub year: i32,
    #[validate(length(min = 1, message = "Exam type must not be empty"))]
    pub exam_type: String,
}

/// `GET /api/pyq`.
pub async fn list(client: &ApiClient, filter: &PyqFilter) -> ApiResult<Vec<PyqRecord>> {
    client.get("/api/pyq", &filter.to_query()).await
}

/// `GET /api/pyq/subjects`: distinct subjects that have papers.
pub async fn subjects(client: &ApiClient) -> ApiResult<SubjectList> {
    client.get("/api/pyq/subjects", &[]).await
}

/// `POST /api/pyq/upload` (admin only).
pub async fn upload(
    client: &ApiClient,
    pyq: &NewPyq,
    file_name: &str,
    bytes: Vec<u8>,
) -> ApiResult<PyqRecord> {
    pyq.validate()
        .map_err(|errs| ApiError::Invalid(format_validation_errors(&errs)))?;

    let lower = file_name.to_lowercase();
    if !ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return Err(ApiError::Invalid("File must be PDF, DOC, or DOCX".into()));
    }

    let mut q = QueryPairs::new();
    q.push("subject", &pyq.subject);
    q.push("semester", pyq.semester);
    q.push("year", pyq.year);
    q.push("exam_type", &pyq.exam_type);

    let part = Part::bytes(bytes).file_name(file_name.to_string());
    let form = Form::new().part("file", part);
    client
        .post_multipart("/api/pyq/upload", form, &q.into_vec())
        .await
}

/// `DELETE /api/pyq/{id}` (admin only). 404 surfaces as [`ApiError::NotFound`].
pub async fn delete(client: &ApiClient, id: &str) -> ApiResult<()> {
    client.delete(&format!("/api/pyq/{id}")).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_builds_empty_query() {
        assert!(PyqFilter::default().to_query().is_empty());
    }

    #[test]
    fn full_filter_includes_all_fields() {
        let filter = PyqFilter {
            subject: Some("Networks".into()),
            semester: Some(5),
            year: Some(2023),
            exam_type: Some("midterm".into()),
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("subject", "Networks".to_string()),
                ("semester", "5".to_string()),
                ("year", "2023".to_string()),
                ("exam_type", "midterm".to_string()),
            ]
        );
    }

    #[test]
    fn semester_out_of_range_is_rejected() {
        let pyq = NewPyq {
            subject: "Networks".into(),
            semester: 0,
            year: 2023,
            exam_type: "midterm".into(),
        };
        assert!(pyq.validate().is_err());
    }
}
