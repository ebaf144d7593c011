//! Login, logout, and explicit registration.
//!
//! A failed login fails; it is never retried as a registration, and the role
//! for a new account is an explicit argument rather than something parsed out
//! of the identifier.

use client::api::auth::{self, NewUser};
use client::error::ApiResult;
use client::gateway::ApiClient;
use client::models::{Role, UserProfile};

pub struct LoginController {
    client: ApiClient,
}

impl LoginController {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Authenticates and stores the issued token with its profile snapshot.
    /// Returns the role so the caller can route to the right console.
    pub async fn login(&self, student_id: &str, password: &str) -> ApiResult<Role> {
        let response = auth::login(&self.client, student_id, password).await?;
        self.client
            .session()
            .establish(response.access_token, response.user.clone());
        log::info!("logged in as {} ({})", response.user.student_id, response.user.role);
        Ok(response.user.role)
    }

    pub async fn register(&self, user: &NewUser) -> ApiResult<UserProfile> {
        let created = auth::register(&self.client, user).await?;
        log::info!("registered {} as {}", created.student_id, created.role);
        Ok(created)
    }

    pub fn logout(&self) {
        self.client.session().clear();
        log::info!("session cleared");
    }
}
