//! One dashboard region: either rendered content or a panel-local error.
//!
//! Panels absorb failures so one broken load never empties its neighbours.
//! A 401 leaves the panel untouched entirely; nothing may render after the
//! session is gone.

use client::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    Updated,
    Failed,
    SessionExpired,
}

#[derive(Debug)]
pub struct Panel {
    title: &'static str,
    content: Option<String>,
    error: Option<String>,
}

impl Panel {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            content: None,
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
        self.error = None;
    }

    /// Records a failure without discarding already-rendered content.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Rewrites existing content in place. A panel holding an error is left
    /// alone so a secondary load can never bury a primary failure.
    pub fn amend(&mut self, f: impl FnOnce(&str) -> String) {
        if self.error.is_some() {
            return;
        }
        let current = self.content.as_deref().unwrap_or_default();
        self.content = Some(f(current));
    }

    /// Folds an API result into the panel: success renders, failure becomes a
    /// panel-local message, and `Unauthorized` leaves the panel untouched and
    /// tells the caller to stop the action.
    pub fn apply<T>(
        &mut self,
        result: ApiResult<T>,
        render: impl FnOnce(&T) -> String,
    ) -> PanelOutcome {
        match result {
            Ok(value) => {
                self.set_content(render(&value));
                PanelOutcome::Updated
            }
            Err(ApiError::Unauthorized) => PanelOutcome::SessionExpired,
            Err(err) => {
                self.set_error(err.to_string());
                PanelOutcome::Failed
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("== {} ==\n", self.title);
        if let Some(error) = &self.error {
            out.push_str(&format!("[error] {error}\n"));
        }
        if let Some(content) = &self.content {
            out.push_str(content);
            if !content.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_renders_on_success() {
        let mut panel = Panel::new("Attendance");
        let outcome = panel.apply(Ok(vec![1, 2, 3]), |v| format!("{} rows", v.len()));
        assert_eq!(outcome, PanelOutcome::Updated);
        assert_eq!(panel.content(), Some("3 rows"));
        assert!(panel.error().is_none());
    }

    #[test]
    fn apply_keeps_existing_content_on_failure() {
        let mut panel = Panel::new("Attendance");
        panel.set_content("old rows");
        let outcome = panel.apply(
            Err::<Vec<i32>, _>(ApiError::Validation("bad date".into())),
            |_| unreachable!(),
        );
        assert_eq!(outcome, PanelOutcome::Failed);
        assert_eq!(panel.content(), Some("old rows"));
        assert_eq!(panel.error(), Some("bad date"));
    }

    #[test]
    fn unauthorized_renders_nothing() {
        let mut panel = Panel::new("Attendance");
        let outcome = panel.apply(Err::<Vec<i32>, _>(ApiError::Unauthorized), |_| {
            unreachable!()
        });
        assert_eq!(outcome, PanelOutcome::SessionExpired);
        assert!(panel.content().is_none());
        assert!(panel.error().is_none());
    }

    #[test]
    fn amend_appends_to_existing_content() {
        let mut panel = Panel::new("Attendance");
        panel.set_content("rows");
        panel.amend(|current| format!("{current}\nstats"));
        assert_eq!(panel.content(), Some("rows\nstats"));
        assert!(panel.error().is_none());
    }

    #[test]
    fn amend_never_buries_a_failure() {
        let mut panel = Panel::new("Attendance");
        panel.apply(
            Err::<Vec<i32>, _>(ApiError::Validation("bad date".into())),
            |_| unreachable!(),
        );
        panel.amend(|current| format!("{current}\nstats"));
        assert_eq!(panel.error(), Some("bad date"));
        assert!(panel.content().is_none());
    }

    #[test]
    fn success_clears_a_previous_error() {
        let mut panel = Panel::new("Results");
        panel.set_error("boom");
        panel.apply(Ok(()), |_| "fresh".into());
        assert!(panel.error().is_none());
        assert_eq!(panel.content(), Some("fresh"));
    }
}
