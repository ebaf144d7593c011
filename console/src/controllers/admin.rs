//! Admin console: attendance management (CSV bulk upload, manual entry),
//! timetable authoring, PYQ upload/delete, result upload, and attendance
//! analytics.

use crate::guard::{GuardOutcome, SessionGuard};
use crate::panel::{Panel, PanelOutcome};
use crate::render;
use crate::tabs::TabSet;
use client::api::attendance::{self, AttendanceFilter, NewAttendance};
use client::api::pyq::{self, NewPyq, PyqFilter};
use client::api::results::{self, NewResult, ResultFilter};
use client::api::timetable::{self, NewTimetable};
use client::error::{ApiError, ApiResult};
use client::gateway::ApiClient;
use client::models::{BulkUploadSummary, Role, UserProfile};
use std::path::Path;

pub const TABS: [&str; 6] = [
    "dashboard",
    "attendance",
    "timetable",
    "pyq",
    "results",
    "analytics",
];

pub struct AdminConsole {
    client: ApiClient,
    user: UserProfile,
    tabs: TabSet,
    session_expired: bool,
    pub dashboard: Panel,
    pub attendance: Panel,
    pub timetable: Panel,
    pub pyq: Panel,
    pub results: Panel,
    pub analytics: Panel,
    /// Last action's outcome, shown in the console footer.
    pub status: Option<String>,
}

impl AdminConsole {
    pub fn mount(client: ApiClient) -> Result<Self, GuardOutcome> {
        let mut guard = SessionGuard::new();
        match guard.check(client.session(), Role::Admin) {
            GuardOutcome::Proceed(user) => Ok(Self {
                client,
                user,
                tabs: TabSet::new(TABS.to_vec()),
                session_expired: false,
                dashboard: Panel::new("Dashboard"),
                attendance: Panel::new("Attendance"),
                timetable: Panel::new("Timetable"),
                pyq: Panel::new("PYQs"),
                results: Panel::new("Results"),
                analytics: Panel::new("Analytics"),
                status: None,
            }),
            outcome => Err(outcome),
        }
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn active_tab(&self) -> &'static str {
        self.tabs.active()
    }

    pub fn session_expired(&self) -> bool {
        self.session_expired
    }

    pub async fn load_all(&mut self) {
        self.load_dashboard().await;
        self.load_attendance().await;
        self.load_pyqs().await;
        self.load_results().await;
    }

    pub async fn switch_tab(&mut self, name: &str) {
        let Some(tab) = self.tabs.activate(name) else {
            log::debug!("ignoring unknown tab {name:?}");
            return;
        };
        match tab {
            "dashboard" => self.load_dashboard().await,
            "attendance" => self.load_attendance().await,
            "timetable" => self.load_timetable(),
            "pyq" => self.load_pyqs().await,
            "results" => self.load_results().await,
            "analytics" => self.load_analytics().await,
            _ => unreachable!("tab set only contains known tabs"),
        }
    }

    pub async fn load_dashboard(&mut self) {
        let attendance_count = match attendance::list(&self.client, &AttendanceFilter::default()).await {
            Ok(records) => Some(records.len()),
            Err(err) if err.is_unauthorized() => return self.expire(),
            Err(err) => {
                log::warn!("dashboard attendance count failed: {err}");
                None
            }
        };
        let pyq_count = match pyq::list(&self.client, &PyqFilter::default()).await {
            Ok(pyqs) => Some(pyqs.len()),
            Err(err) if err.is_unauthorized() => return self.expire(),
            Err(err) => {
                log::warn!("dashboard pyq count failed: {err}");
                None
            }
        };

        let fmt = |count: Option<usize>| {
            count.map(|c| c.to_string()).unwrap_or_else(|| "-".into())
        };
        self.dashboard.set_content(format!(
            "Attendance records: {}\nPYQs: {}",
            fmt(attendance_count),
            fmt(pyq_count)
        ));
    }

    pub async fn load_attendance(&mut self) {
        let outcome = self.attendance.apply(
            attendance::list(&self.client, &AttendanceFilter::default()).await,
            |records| render::attendance::attendance_table(records, true),
        );
        if outcome == PanelOutcome::SessionExpired {
            self.expire();
        }
    }

    /// The timetable tab is the authoring form; there is nothing to fetch.
    pub fn load_timetable(&mut self) {
        self.timetable
            .set_content("Compose a day's slots and save to publish.");
    }

    pub async fn load_pyqs(&mut self) {
        let base_url = self.client.base_url().to_string();
        let outcome = self.pyq.apply(
            pyq::list(&self.client, &PyqFilter::default()).await,
            |pyqs| render::pyq::pyq_cards(pyqs, &base_url),
        );
        if outcome == PanelOutcome::SessionExpired {
            self.expire();
        }
    }

    /// Listing every student's results needs a student filter (the backend
    /// rejects an unfiltered admin query), so the panel starts as a prompt.
    pub async fn load_results(&mut self) {
        self.results
            .set_content("Pick a student to view results, or upload one above.");
    }

    pub async fn load_results_for(&mut self, student_id: &str) {
        let filter = ResultFilter {
            student_id: Some(student_id.to_string()),
            semester: None,
        };
        let outcome = self.results.apply(
            results::list(&self.client, &filter).await,
            |records| render::results::grouped_by_student(records),
        );
        if outcome == PanelOutcome::SessionExpired {
            self.expire();
        }
    }

    pub async fn load_analytics(&mut self) {
        let outcome = self.analytics.apply(
            attendance::list(&self.client, &AttendanceFilter::default()).await,
            |records| render::analytics::overview_summary(records),
        );
        if outcome == PanelOutcome::SessionExpired {
            self.expire();
        }
    }

    // --- Actions ---

    /// Bulk CSV upload; the backend's inserted/skipped/total counts go into
    /// the status line verbatim.
    pub async fn upload_attendance_csv(&mut self, path: &Path) -> ApiResult<BulkUploadSummary> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("attendance.csv");

        let summary = self
            .run(attendance::bulk_upload(&self.client, file_name, bytes).await)?;
        self.status = Some(bulk_upload_status(&summary));
        self.load_attendance().await;
        self.load_dashboard().await;
        Ok(summary)
    }

    pub async fn add_attendance(&mut self, record: &NewAttendance) -> ApiResult<()> {
        self.run(attendance::create(&self.client, record).await)?;
        self.status = Some("Attendance record added successfully!".into());
        self.load_attendance().await;
        Ok(())
    }

    pub async fn save_timetable(&mut self, entry: &NewTimetable) -> ApiResult<()> {
        self.run(timetable::create(&self.client, entry).await)?;
        self.status = Some("Timetable saved successfully!".into());
        Ok(())
    }

    pub async fn upload_pyq(
        &mut self,
        new_pyq: &NewPyq,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<()> {
        self.run(pyq::upload(&self.client, new_pyq, file_name, bytes).await)?;
        self.status = Some("PYQ uploaded successfully!".into());
        self.load_pyqs().await;
        self.load_dashboard().await;
        Ok(())
    }

    pub async fn delete_pyq(&mut self, id: &str) -> ApiResult<()> {
        self.run(pyq::delete(&self.client, id).await)?;
        self.status = Some("PYQ deleted successfully!".into());
        self.load_pyqs().await;
        self.load_dashboard().await;
        Ok(())
    }

    pub async fn upload_result(
        &mut self,
        new_result: &NewResult,
        file: Option<(&str, Vec<u8>)>,
    ) -> ApiResult<()> {
        self.run(results::create(&self.client, new_result, file).await)?;
        self.status = Some("Result uploaded successfully!".into());
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut out = [
            &self.dashboard,
            &self.attendance,
            &self.timetable,
            &self.pyq,
            &self.results,
            &self.analytics,
        ]
        .iter()
        .map(|panel| panel.render())
        .collect::<Vec<_>>()
        .join("\n");

        if let Some(status) = &self.status {
            out.push_str(&format!("\n{status}\n"));
        }
        out
    }

    /// Funnels action errors: a 401 flips the expired flag and propagates;
    /// everything else lands in the status line and propagates.
    fn run<T>(&mut self, result: ApiResult<T>) -> ApiResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(ApiError::Unauthorized) => {
                self.expire();
                Err(ApiError::Unauthorized)
            }
            Err(err) => {
                self.status = Some(format!("Error: {err}"));
                Err(err)
            }
        }
    }

    fn expire(&mut self) {
        self.session_expired = true;
    }
}

/// Success message for a CSV bulk upload, carrying the backend's counts
/// verbatim.
pub fn bulk_upload_status(summary: &BulkUploadSummary) -> String {
    format!(
        "Upload successful! Inserted: {}, Skipped: {}, Total: {}",
        summary.inserted, summary.skipped, summary.total
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_upload_status_reports_backend_counts_verbatim() {
        let summary = BulkUploadSummary {
            message: String::new(),
            inserted: 10,
            skipped: 2,
            total: 12,
        };
        assert_eq!(
            bulk_upload_status(&summary),
            "Upload successful! Inserted: 10, Skipped: 2, Total: 12"
        );
    }
}
