use client::models::{AttendanceRecord, SubjectWiseStats};

pub const EMPTY_RECORDS: &str = "No records found";

/// One line per record, input order, date | subject | status. The admin view
/// passes `with_student: true` to prefix the student id column.
pub fn attendance_table(records: &[AttendanceRecord], with_student: bool) -> String {
    if records.is_empty() {
        return EMPTY_RECORDS.to_string();
    }

    records
        .iter()
        .map(|record| {
            if with_student {
                format!(
                    "{}  {}  {}  {}",
                    record.student_id, record.subject, record.date, record.status
                )
            } else {
                format!("{}  {}  {}", record.date, record.subject, record.status)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-subject percentage cards, order as supplied by the API.
pub fn subject_stats(stats: &SubjectWiseStats) -> String {
    if stats.subjects.is_empty() {
        return "No attendance recorded yet".to_string();
    }

    stats
        .subjects
        .iter()
        .map(|s| {
            format!(
                "{}: {:.1}%  (Present: {} | Absent: {} | Total: {})",
                s.subject, s.percentage, s.present, s.absent, s.total_classes
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
