//! Session guard: decides whether a console may mount.
//!
//! `Unknown -> Unauthenticated -> Authenticated{role}`. The guard never
//! navigates; it reports an outcome and the caller routes.

use client::models::{Role, UserProfile};
use client::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unknown,
    Unauthenticated,
    Authenticated(Role),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Session matches the required role; mount tabs and load data.
    Proceed(UserProfile),
    /// No token (or no cached profile); terminal for this mount.
    RedirectToLogin,
    /// Authenticated but for the other role's console.
    RedirectTo(Role),
}

#[derive(Debug)]
pub struct SessionGuard {
    state: GuardState,
}

impl SessionGuard {
    pub fn new() -> Self {
        Self {
            state: GuardState::Unknown,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Reads the session and gates the mount. A token without a cached
    /// profile counts as unauthenticated; identity is only trusted as the
    /// login flow stored it.
    pub fn check(&mut self, store: &SessionStore, required: Role) -> GuardOutcome {
        if store.token().is_none() {
            self.state = GuardState::Unauthenticated;
            return GuardOutcome::RedirectToLogin;
        }

        let Some(user) = store.user() else {
            self.state = GuardState::Unauthenticated;
            return GuardOutcome::RedirectToLogin;
        };

        self.state = GuardState::Authenticated(user.role);
        if user.role == required {
            GuardOutcome::Proceed(user)
        } else {
            GuardOutcome::RedirectTo(user.role)
        }
    }
}

impl Default for SessionGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SessionStore {
        SessionStore::load(dir.path().join("session.json"))
    }

    fn profile(role: Role) -> UserProfile {
        UserProfile {
            id: None,
            student_id: "S1".into(),
            name: "S1".into(),
            email: None,
            role,
        }
    }

    #[test]
    fn starts_unknown() {
        assert_eq!(SessionGuard::new().state(), GuardState::Unknown);
    }

    #[test]
    fn missing_token_redirects_to_login() {
        let dir = TempDir::new().unwrap();
        let mut guard = SessionGuard::new();
        let outcome = guard.check(&store(&dir), Role::Student);
        assert_eq!(outcome, GuardOutcome::RedirectToLogin);
        assert_eq!(guard.state(), GuardState::Unauthenticated);
    }

    #[test]
    fn token_without_profile_redirects_to_login() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.set_token("tok");
        let mut guard = SessionGuard::new();
        assert_eq!(guard.check(&s, Role::Student), GuardOutcome::RedirectToLogin);
    }

    #[test]
    fn matching_role_proceeds() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.establish("tok", profile(Role::Admin));
        let mut guard = SessionGuard::new();
        let outcome = guard.check(&s, Role::Admin);
        assert!(matches!(outcome, GuardOutcome::Proceed(user) if user.role == Role::Admin));
        assert_eq!(guard.state(), GuardState::Authenticated(Role::Admin));
    }

    #[test]
    fn role_mismatch_redirects_to_own_console() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.establish("tok", profile(Role::Student));
        let mut guard = SessionGuard::new();
        assert_eq!(
            guard.check(&s, Role::Admin),
            GuardOutcome::RedirectTo(Role::Student)
        );
    }
}
