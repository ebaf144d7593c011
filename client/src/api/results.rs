//! Semester results and CGPA.

use super::QueryPairs;
use crate::error::{ApiError, ApiResult};
use crate::gateway::ApiClient;
use crate::models::{CgpaReport, ResultRecord, SubjectGrade};
use common::format_validation_errors;
use reqwest::multipart::{Form, Part};
use validator::Validate;

#[derive(Debug, Clone, Default)]
pub struct ResultFilter {
    pub student_id: Option<String>,
    pub semester: Option<i32>,
}

impl ResultFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut q = QueryPairs::new();
        q.push_opt("student_id", self.student_id.as_ref());
        q.push_opt("semester", self.semester);
        q.into_vec()
    }
}

/// Result metadata. The backend takes it in the query string (subjects as a
/// JSON-encoded string), with an optional PDF as the multipart body.
#[derive(Debug, Clone, Validate)]
pub struct NewResult {
    #[validate(length(min = 1, message = "Student ID must not be empty"))]
    pub student_id: String,
    #[validate(range(min = 1, max = 12, message = "Semester must be between 1 and 12"))]
    pub semester: i32,
    #[validate(length(min = 1, message = "Academic year must not be empty"))]
    pub academic_year: String,
    pub sgpa: Option<f64>,
    pub cgpa: Option<f64>,
    pub subjects: Vec<SubjectGrade>,
}

impl NewResult {
    fn to_query(&self) -> ApiResult<Vec<(&'static str, String)>> {
        let mut q = QueryPairs::new();
        q.push("student_id", &self.student_id);
        q.push("semester", self.semester);
        q.push("academic_year", &self.academic_year);
        q.push_opt("sgpa", self.sgpa);
        q.push_opt("cgpa", self.cgpa);
        if !self.subjects.is_empty() {
            let encoded = serde_json::to_string(&self.subjects)
                .map_err(|err| ApiError::Decode(err.to_string()))?;
            q.push("subjects", encoded);
        }
        Ok(q.into_vec())
    }
}

/// `GET /api/results`. Admin callers must name a student; the backend rejects
/// an unfiltered admin listing.
pub async fn list(client: &ApiClient, filter: &ResultFilter) -> ApiResult<Vec<ResultRecord>> {
    client.get("/api/results", &filter.to_query()).await
}

/// `GET /api/results/{id}`.
pub async fn get(client: &ApiClient, id: &str) -> ApiResult<ResultRecord> {
    client.get(&format!("/api/results/{id}"), &[]).await
}

/// `POST /api/results/` (admin only). Creates or replaces the student's result
/// for that semester and academic year.
pub async fn create(
    client: &ApiClient,
    result: &NewResult,
    file: Option<(&str, Vec<u8>)>,
) -> ApiResult<ResultRecord> {
    result
        .validate()
        .map_err(|errs| ApiError::Invalid(format_validation_errors(&errs)))?;

    let mut form = Form::new();
    if let Some((file_name, bytes)) = file {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        form = form.part("file", part);
    }
    client
        .post_multipart("/api/results/", form, &result.to_query()?)
        .await
}

/// `GET /api/results/cgpa/calculate`: SGPA average across published semesters.
pub async fn cgpa(client: &ApiClient, student_id: Option<&str>) -> ApiResult<CgpaReport> {
    let mut q = QueryPairs::new();
    q.push_opt("student_id", student_id);
    client.get("/api/results/cgpa/calculate", &q.into_vec()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_builds_empty_query() {
        assert!(ResultFilter::default().to_query().is_empty());
    }

    #[test]
    fn new_result_encodes_subjects_as_json() {
        let result = NewResult {
            student_id: "S1".into(),
            semester: 3,
            academic_year: "2023-24".into(),
            sgpa: Some(8.4),
            cgpa: None,
            subjects: vec![SubjectGrade {
                subject: "Databases".into(),
                grade: "A".into(),
                marks: None,
                credits: None,
            }],
        };
        let query = result.to_query().unwrap();
        assert_eq!(query[0], ("student_id", "S1".to_string()));
        assert_eq!(query[3], ("sgpa", "8.4".to_string()));
        let (key, encoded) = &query[4];
        assert_eq!(*key, "subjects");
        assert!(encoded.contains("\"grade\":\"A\""));
    }

    #[test]
    fn new_result_without_subjects_omits_the_param() {
        let result = NewResult {
            student_id: "S1".into(),
            semester: 3,
            academic_year: "2023-24".into(),
            sgpa: None,
            cgpa: None,
            subjects: vec![],
        };
        let query = result.to_query().unwrap();
        assert!(query.iter().all(|(key, _)| *key != "subjects"));
    }
}
