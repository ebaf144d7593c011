//! Authentication: login, explicit registration, and the `/me` probe.
//!
//! Login and registration are separate operations on purpose; nothing here
//! retries a failed login as a registration or guesses a role from the
//! identifier.

use crate::error::{ApiError, ApiResult};
use crate::gateway::ApiClient;
use crate::models::{LoginResponse, Role, UserProfile};
use common::format_validation_errors;
use serde::Serialize;
use validator::Validate;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    student_id: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "Student ID must not be empty"))]
    pub student_id: String,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: Role,
}

/// `POST /api/auth/login`. On success the caller stores the token and profile
/// in the session store.
pub async fn login(client: &ApiClient, student_id: &str, password: &str) -> ApiResult<LoginResponse> {
    let body = LoginRequest {
        student_id,
        password,
    };
    client.post_json("/api/auth/login", &body).await
}

/// `POST /api/auth/register`. Admin-gated on the backend.
pub async fn register(client: &ApiClient, user: &NewUser) -> ApiResult<UserProfile> {
    user.validate()
        .map_err(|errs| ApiError::Invalid(format_validation_errors(&errs)))?;
    client.post_json("/api/auth/register", user).await
}

/// `GET /api/auth/me`.
pub async fn me(client: &ApiClient) -> ApiResult<UserProfile> {
    client.get("/api/auth/me", &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> NewUser {
        NewUser {
            student_id: "S1".into(),
            name: "Sam".into(),
            email: None,
            password: "longenough".into(),
            role: Role::Student,
        }
    }

    #[test]
    fn valid_user_passes_validation() {
        assert!(user().validate().is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        let mut u = user();
        u.password = "short".into();
        let errs = u.validate().unwrap_err();
        assert!(format_validation_errors(&errs).contains("at least 8"));
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut u = user();
        u.email = Some("not-an-email".into());
        assert!(u.validate().is_err());
    }
}
