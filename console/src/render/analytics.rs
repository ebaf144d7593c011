//! Data shaping behind the dashboard numbers and charts. Numeric only; how a
//! chart is drawn is someone else's problem.

use client::models::{AttendanceRecord, AttendanceStats, AttendanceStatus, CgpaReport};

/// Present/absent totals across a record list (the doughnut-chart split).
pub fn attendance_overview(records: &[AttendanceRecord]) -> (usize, usize) {
    let present = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();
    (present, records.len() - present)
}

pub fn overview_summary(records: &[AttendanceRecord]) -> String {
    let (present, absent) = attendance_overview(records);
    format!("Present: {present} | Absent: {absent} | Total: {}", records.len())
}

/// Headline figures for the student dashboard. A metric whose load failed is
/// shown as "-" so the rest of the dashboard still renders.
pub fn dashboard_summary(
    stats: Option<&AttendanceStats>,
    cgpa: Option<&CgpaReport>,
    pyq_count: Option<usize>,
) -> String {
    let attendance = match stats {
        Some(s) if s.total_classes > 0 => format!("{:.1}%", s.percentage),
        _ => "-".to_string(),
    };
    let cgpa = match cgpa.and_then(|report| report.cgpa) {
        Some(value) => format!("{value:.2}"),
        None => "-".to_string(),
    };
    let pyqs = match pyq_count {
        Some(count) => count.to_string(),
        None => "-".to_string(),
    };
    format!("Overall attendance: {attendance}\nCGPA: {cgpa}\nAvailable PYQs: {pyqs}")
}
