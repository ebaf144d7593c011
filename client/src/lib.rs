//! Typed client for the college records backend.
//!
//! The crate is layered the way requests flow: [`session::SessionStore`] owns
//! the token and cached profile, [`gateway::ApiClient`] is the single choke
//! point for outbound HTTP, and the [`api`] modules are thin typed facades over
//! it, one per backend resource.

pub mod api;
pub mod error;
pub mod gateway;
pub mod models;
pub mod session;

pub use error::{ApiError, ApiResult};
pub use gateway::ApiClient;
pub use session::SessionStore;
