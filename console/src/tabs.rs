//! Tab switching: exactly one tab is active at a time.

/// Fixed set of named tabs. Switching returns the tab whose data should be
/// reloaded; an unknown name is a no-op and leaves the active tab unchanged.
#[derive(Debug)]
pub struct TabSet {
    tabs: Vec<&'static str>,
    active: usize,
}

impl TabSet {
    /// The first tab starts active. Panics on an empty tab list.
    pub fn new(tabs: Vec<&'static str>) -> Self {
        assert!(!tabs.is_empty(), "a console needs at least one tab");
        Self { tabs, active: 0 }
    }

    pub fn names(&self) -> &[&'static str] {
        &self.tabs
    }

    pub fn active(&self) -> &'static str {
        self.tabs[self.active]
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active() == name
    }

    /// Activates `name` and reports it for a fresh data load (re-activating
    /// the current tab still reloads, matching a repeated tab click).
    /// Unknown names return `None`.
    pub fn activate(&mut self, name: &str) -> Option<&'static str> {
        let idx = self.tabs.iter().position(|tab| *tab == name)?;
        self.active = idx;
        Some(self.tabs[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs() -> TabSet {
        TabSet::new(vec!["dashboard", "attendance", "results"])
    }

    #[test]
    fn first_tab_starts_active() {
        assert_eq!(tabs().active(), "dashboard");
    }

    #[test]
    fn switching_hides_the_previous_tab() {
        let mut t = tabs();
        t.activate("attendance");
        assert_eq!(t.activate("results"), Some("results"));
        assert!(t.is_active("results"));
        assert!(!t.is_active("attendance"));
        // exactly one active
        let active: Vec<_> = t.names().iter().filter(|n| t.is_active(n)).collect();
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn unknown_tab_is_a_noop() {
        let mut t = tabs();
        t.activate("attendance");
        assert_eq!(t.activate("grades"), None);
        assert_eq!(t.active(), "attendance");
    }

    #[test]
    fn reactivating_current_tab_still_reloads() {
        let mut t = tabs();
        assert_eq!(t.activate("dashboard"), Some("dashboard"));
    }
}
