//! Durable session state: the bearer token and the cached user profile.
//!
//! The store survives process restarts via a small JSON state file. No expiry
//! is enforced here; a stale token is detected reactively when the backend
//! rejects a request and the gateway calls [`SessionStore::clear`].

use crate::models::UserProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionState {
    token: Option<String>,
    user: Option<UserProfile>,
}

pub struct SessionStore {
    path: PathBuf,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Loads the session from `path`. A missing or unreadable file yields an
    /// empty (unauthenticated) session; a corrupt file is discarded with a
    /// warning rather than failing the mount.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<SessionState>(&raw) {
                Ok(state) => state,
                Err(err) => {
                    log::warn!("discarding corrupt session file {}: {err}", path.display());
                    SessionState::default()
                }
            },
            Err(_) => SessionState::default(),
        };

        Self {
            path,
            state: RwLock::new(state),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().expect("session lock poisoned").token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.read().expect("session lock poisoned").user.clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.mutate(|state| state.token = Some(token.into()));
    }

    pub fn set_user(&self, user: UserProfile) {
        self.mutate(|state| state.user = Some(user));
    }

    /// Stores a freshly issued token together with its profile snapshot.
    pub fn establish(&self, token: impl Into<String>, user: UserProfile) {
        self.mutate(|state| {
            state.token = Some(token.into());
            state.user = Some(user);
        });
    }

    /// Clears both the token and the cached profile and rewrites the file.
    pub fn clear(&self) {
        self.mutate(|state| *state = SessionState::default());
    }

    fn mutate<F: FnOnce(&mut SessionState)>(&self, f: F) {
        let mut guard = self.state.write().expect("session lock poisoned");
        f(&mut guard);
        self.persist(&guard);
    }

    fn persist(&self, state: &SessionState) {
        if let Err(err) = Self::write_file(&self.path, state) {
            log::warn!("failed to persist session to {}: {err}", self.path.display());
        }
    }

    fn write_file(path: &Path, state: &SessionState) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use tempfile::TempDir;

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
    fn missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::load(dir.path().join("session.json"));
        assert!(store.token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        let store = SessionStore::load(&path);
        assert!(store.token().is_none());
    }

    #[test]
    fn establish_then_reload_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/session.json");

        let store = SessionStore::load(&path);
        store.establish("tok-123", profile(Role::Student));
        assert_eq!(store.token().as_deref(), Some("tok-123"));

        let reloaded = SessionStore::load(&path);
        assert_eq!(reloaded.token().as_deref(), Some("tok-123"));
        assert_eq!(reloaded.user().unwrap().role, Role::Student);
    }

    #[test]
    fn clear_empties_token_and_user() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::load(&path);
        store.establish("tok", profile(Role::Admin));
        store.clear();
        assert!(store.token().is_none());
        assert!(store.user().is_none());

        let reloaded = SessionStore::load(&path);
        assert!(reloaded.token().is_none());
        assert!(reloaded.user().is_none());
    }
}
