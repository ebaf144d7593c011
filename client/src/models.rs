//! Wire models mirroring the records backend's JSON responses.
//!
//! Unknown fields are ignored so backend additions do not break the client;
//! fields the backend sometimes omits are `Option` with serde defaults.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile snapshot cached alongside the token. Not re-fetched until the next
/// login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    pub student_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub student_id: String,
    pub subject: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// `GET /api/attendance/stats`.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceStats {
    pub student_id: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub total_classes: u32,
    pub present: u32,
    pub absent: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubjectStats {
    pub subject: String,
    pub total_classes: u32,
    pub present: u32,
    pub absent: u32,
    pub percentage: f64,
}

/// `GET /api/attendance/stats/subject-wise`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectWiseStats {
    pub student_id: String,
    pub subjects: Vec<SubjectStats>,
}

/// `POST /api/attendance/bulk-upload`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUploadSummary {
    #[serde(default)]
    pub message: String,
    pub inserted: u32,
    pub skipped: u32,
    pub total: u32,
}

/// Days as the backend spells them ("Monday" .. "Sunday").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Monday-first week, the order the timetable is rendered in.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
}

/// One day's timetable; `student_id: None` is the shared default timetable.
#[derive(Debug, Clone, Deserialize)]
pub struct TimetableEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    pub day: Weekday,
    pub time_slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaySchedule {
    pub day: Weekday,
    pub time_slots: Vec<TimeSlot>,
}

/// `GET /api/timetable/current-week`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyTimetable {
    pub timetable: Vec<DaySchedule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PyqRecord {
    pub id: String,
    pub subject: String,
    pub semester: i32,
    pub year: i32,
    pub exam_type: String,
    pub file_url: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

/// `GET /api/pyq/subjects`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectList {
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectGrade {
    pub subject: String,
    pub grade: String,
    #[serde(default)]
    pub marks: Option<f64>,
    #[serde(default)]
    pub credits: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub student_id: String,
    pub semester: i32,
    pub academic_year: String,
    #[serde(default)]
    pub subjects: Vec<SubjectGrade>,
    #[serde(default)]
    pub sgpa: Option<f64>,
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SemesterSgpa {
    pub semester: i32,
    pub academic_year: String,
    pub sgpa: f64,
}

/// `GET /api/results/cgpa/calculate`.
#[derive(Debug, Clone, Deserialize)]
pub struct CgpaReport {
    pub student_id: String,
    #[serde(default)]
    pub cgpa: Option<f64>,
    pub total_semesters: u32,
    pub semesters: Vec<SemesterSgpa>,
}
