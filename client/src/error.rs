/// Result type for all backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the gateway and the domain API modules.
///
/// `Unauthorized` is an explicit outcome, not a redirect: the gateway clears
/// the session before returning it, and callers must treat the action as
/// terminated.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthorized,

    /// 4xx with a server-reported detail message, shown verbatim to the user.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("server error: {0}")]
    Server(String),

    /// Transport-level failure (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 2xx with a body that does not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// Client-side validation rejected the payload before any request was made.
    #[error("{0}")]
    Invalid(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// True when the error means the session is gone and the caller should
    /// route back to login.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
