//! Student console: dashboard, own attendance, weekly timetable, PYQs,
//! results. Every panel load is independent; a failure lands in that panel
//! only, and a 401 stops the action without rendering anything.

use crate::guard::{GuardOutcome, SessionGuard};
use crate::panel::{Panel, PanelOutcome};
use crate::render;
use crate::tabs::TabSet;
use client::api::{attendance, pyq, results, timetable};
use client::api::attendance::AttendanceFilter;
use client::api::pyq::PyqFilter;
use client::api::results::ResultFilter;
use client::gateway::ApiClient;
use client::models::{Role, UserProfile};

pub const TABS: [&str; 5] = ["dashboard", "attendance", "timetable", "pyq", "results"];

pub struct StudentConsole {
    client: ApiClient,
    user: UserProfile,
    tabs: TabSet,
    session_expired: bool,
    pub attendance_filter: AttendanceFilter,
    pub pyq_filter: PyqFilter,
    pub dashboard: Panel,
    pub attendance: Panel,
    pub timetable: Panel,
    pub pyq: Panel,
    pub results: Panel,
}

impl StudentConsole {
    /// Runs the session guard; only a matching student session mounts.
    pub fn mount(client: ApiClient) -> Result<Self, GuardOutcome> {
        let mut guard = SessionGuard::new();
        match guard.check(client.session(), Role::Student) {
            GuardOutcome::Proceed(user) => Ok(Self {
                client,
                user,
                tabs: TabSet::new(TABS.to_vec()),
                session_expired: false,
                attendance_filter: AttendanceFilter::default(),
                pyq_filter: PyqFilter::default(),
                dashboard: Panel::new("Dashboard"),
                attendance: Panel::new("Attendance"),
                timetable: Panel::new("Timetable"),
                pyq: Panel::new("PYQs"),
                results: Panel::new("Results"),
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

    /// True once any load hit a 401; the caller should route back to login.
    pub fn session_expired(&self) -> bool {
        self.session_expired
    }

    /// Initial mount: load every tab's data. Failures stay panel-local.
    pub async fn load_all(&mut self) {
        self.load_dashboard().await;
        self.load_attendance().await;
        self.load_timetable().await;
        self.load_pyqs().await;
        self.load_results().await;
    }

    /// Switches tab and reloads just that tab. Unknown names change nothing.
    pub async fn switch_tab(&mut self, name: &str) {
        let Some(tab) = self.tabs.activate(name) else {
            log::debug!("ignoring unknown tab {name:?}");
            return;
        };
        match tab {
            "dashboard" => self.load_dashboard().await,
            "attendance" => self.load_attendance().await,
            "timetable" => self.load_timetable().await,
            "pyq" => self.load_pyqs().await,
            "results" => self.load_results().await,
            _ => unreachable!("tab set only contains known tabs"),
        }
    }

    /// Headline numbers: overall attendance, CGPA, PYQ count. Each metric is
    /// fetched on its own so one failure leaves the others in place.
    pub async fn load_dashboard(&mut self) {
        let stats = match attendance::overall_stats(&self.client, None, None).await {
            Ok(stats) => Some(stats),
            Err(err) if err.is_unauthorized() => return self.expire(),
            Err(err) => {
                log::warn!("dashboard attendance stats failed: {err}");
                None
            }
        };
        let cgpa = match results::cgpa(&self.client, None).await {
            Ok(report) => Some(report),
            Err(err) if err.is_unauthorized() => return self.expire(),
            Err(err) => {
                log::warn!("dashboard cgpa failed: {err}");
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

        self.dashboard.set_content(render::analytics::dashboard_summary(
            stats.as_ref(),
            cgpa.as_ref(),
            pyq_count,
        ));
    }

    /// Record table plus the per-subject percentage cards.
    pub async fn load_attendance(&mut self) {
        let outcome = self.attendance.apply(
            attendance::list(&self.client, &self.attendance_filter).await,
            |records| render::attendance::attendance_table(records, false),
        );
        if outcome == PanelOutcome::SessionExpired {
            return self.expire();
        }

        match attendance::subject_wise_stats(&self.client, None).await {
            Ok(stats) => self.attendance.amend(|table| {
                format!(
                    "{table}\n\nBy subject:\n{}",
                    render::attendance::subject_stats(&stats)
                )
            }),
            Err(err) if err.is_unauthorized() => self.expire(),
            Err(err) => log::warn!("subject-wise stats failed: {err}"),
        }
    }

    pub async fn load_timetable(&mut self) {
        let outcome = self.timetable.apply(
            timetable::current_week(&self.client).await,
            render::timetable::weekly,
        );
        if outcome == PanelOutcome::SessionExpired {
            self.expire();
        }
    }

    pub async fn load_pyqs(&mut self) {
        let base_url = self.client.base_url().to_string();
        let outcome = self.pyq.apply(
            pyq::list(&self.client, &self.pyq_filter).await,
            |pyqs| render::pyq::pyq_cards(pyqs, &base_url),
        );
        if outcome == PanelOutcome::SessionExpired {
            self.expire();
        }
    }

    pub async fn load_results(&mut self) {
        let outcome = self.results.apply(
            results::list(&self.client, &ResultFilter::default()).await,
            |records| render::results::result_cards(records),
        );
        if outcome == PanelOutcome::SessionExpired {
            self.expire();
        }
    }

    pub fn render(&self) -> String {
        [
            &self.dashboard,
            &self.attendance,
            &self.timetable,
            &self.pyq,
            &self.results,
        ]
        .iter()
        .map(|panel| panel.render())
        .collect::<Vec<_>>()
        .join("\n")
    }

    fn expire(&mut self) {
        self.session_expired = true;
    }
}
