//! Single choke point for outbound HTTP.
//!
//! Every request goes through [`ApiClient`]: it attaches the bearer token from
//! the session store, normalizes non-2xx statuses into [`ApiError`] variants,
//! and handles 401 by clearing the session and returning
//! [`ApiError::Unauthorized`] so callers can route back to login themselves.

use crate::error::{ApiError, ApiResult};
use crate::session::SessionStore;
use reqwest::{Client, RequestBuilder, StatusCode, multipart::Form};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Shape of FastAPI error bodies: `{"detail": "..."}`.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout_secs: u64,
        session: Arc<SessionStore>,
    ) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Builds a client from the global configuration.
    pub fn from_config(session: Arc<SessionStore>) -> ApiResult<Self> {
        Self::new(
            common::config::api_base_url(),
            common::config::request_timeout_secs(),
            session,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// GET with an optional query string. Pairs are appended as-is; absent
    /// filters must already have been omitted by the caller.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let mut req = self.http.get(self.url(path));
        if !query.is_empty() {
            req = req.query(query);
        }
        self.send(path, req).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let req = self.http.post(self.url(path)).json(body);
        self.send(path, req).await
    }

    /// Multipart POST; no explicit content type so the transport sets the
    /// boundary. Metadata the backend expects in the query string goes in
    /// `query`.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let mut req = self.http.post(self.url(path));
        if !query.is_empty() {
            req = req.query(query);
        }
        self.send(path, req.multipart(form)).await
    }

    /// DELETE; succeeds on any 2xx including an empty 204 body.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let req = self.http.delete(self.url(path));
        let resp = self.dispatch(path, req).await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(());
        }
        Err(self.error_from_response(path, resp).await)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, req: RequestBuilder) -> ApiResult<T> {
        let resp = self.dispatch(path, req).await?;
        let status = resp.status();

        if status.is_success() {
            return resp.json::<T>().await.map_err(|err| {
                log::error!("malformed response body from {path}: {err}");
                ApiError::Decode(err.to_string())
            });
        }
        Err(self.error_from_response(path, resp).await)
    }

    async fn dispatch(&self, path: &str, req: RequestBuilder) -> ApiResult<reqwest::Response> {
        let mut req = req;
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }

        req.send().await.map_err(|err| {
            log::error!("request to {path} failed: {err}");
            ApiError::Network(err)
        })
    }

    async fn error_from_response(&self, path: &str, resp: reqwest::Response) -> ApiError {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("{path} rejected with 401; clearing session");
            self.session.clear();
            return ApiError::Unauthorized;
        }

        let detail = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);
        let err = classify_status(status, detail);
        log::warn!("{path} failed with {status}: {err}");
        err
    }
}

/// Maps a non-2xx, non-401 status and the backend's `detail` message onto the
/// error taxonomy. Pure so the contract is testable without a live server.
pub fn classify_status(status: StatusCode, detail: Option<String>) -> ApiError {
    let message = detail.unwrap_or_else(|| "Request failed".to_string());
    if status == StatusCode::NOT_FOUND {
        ApiError::NotFound(message)
    } else if status.is_client_error() {
        ApiError::Validation(message)
    } else {
        ApiError::Server(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, UserProfile};
    use tempfile::TempDir;

    fn client_with_session(dir: &TempDir) -> ApiClient {
        let store = Arc::new(SessionStore::load(dir.path().join("session.json")));
        ApiClient::new("http://localhost:8000/", 5, store).unwrap()
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let client = client_with_session(&dir);
        assert_eq!(client.url("/api/auth/me"), "http://localhost:8000/api/auth/me");
    }

    #[test]
    fn classify_maps_status_families() {
        let err = classify_status(StatusCode::NOT_FOUND, Some("PYQ not found".into()));
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "PYQ not found"));

        let err = classify_status(StatusCode::BAD_REQUEST, Some("bad date".into()));
        assert!(matches!(err, ApiError::Validation(ref m) if m == "bad date"));

        let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert!(matches!(err, ApiError::Server(ref m) if m == "Request failed"));
    }

    #[test]
    fn detail_message_is_carried_verbatim() {
        let err = classify_status(
            StatusCode::FORBIDDEN,
            Some("Cannot view other students' stats".into()),
        );
        assert_eq!(err.to_string(), "Cannot view other students' stats");
    }

    #[tokio::test]
    async fn unauthorized_response_clears_session() {
        let dir = TempDir::new().unwrap();
        let client = client_with_session(&dir);
        client.session().establish(
            "stale-token",
            UserProfile {
                id: None,
                student_id: "S1".into(),
                name: "S1".into(),
                email: None,
                role: Role::Student,
            },
        );

        let resp = http::Response::builder()
            .status(StatusCode::UNAUTHORIZED)
            .body("")
            .unwrap();
        let err = client
            .error_from_response("/api/auth/me", reqwest::Response::from(resp))
            .await;

        assert!(err.is_unauthorized());
        assert!(client.session().token().is_none());
        assert!(client.session().user().is_none());
    }
}
