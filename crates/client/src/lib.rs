//! # Folio Client
//!
//! Authenticated API client for the folio portfolio backend.
//!
//! The crate is layered leaf to root:
//!
//! - **[`store`]**: persists the session triple (access token, refresh
//!   token, cached profile); infallible from the caller's perspective
//! - **[`error`]**: the normalized `{status, message, data}` error every
//!   failure is converted into at the transport boundary
//! - **[`http`]**: the transport wrapper plus the authenticated client with
//!   the refresh-retry protocol (retry-once per request, single-flight
//!   refresh, process-wide budget)
//! - **[`auth`]**: login/logout/session-inspection facade
//! - **[`services`]**: typed wrappers for the contact, project and skill
//!   endpoints
//! - **[`config`]**: environment-driven configuration and the endpoint table
//!
//! # Usage Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use folio_client::auth::AuthSession;
//! use folio_client::config::ClientConfig;
//! use folio_client::http::ApiClient;
//! use folio_client::services::ProjectService;
//! use folio_client::store::FileSessionStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let store = Arc::new(FileSessionStore::new("session.json"));
//!     let client = Arc::new(ApiClient::new(&config, store)?);
//!
//!     let session = AuthSession::new(client.clone());
//!     session.login("admin@example.com", "Secret123!").await?;
//!
//!     let projects = ProjectService::new(client);
//!     for project in projects.featured().await? {
//!         println!("{}", project.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod services;
pub mod store;

// Re-export commonly used items
pub use auth::AuthSession;
pub use config::{ClientConfig, Endpoints};
pub use error::ApiError;
pub use http::ApiClient;
pub use services::{ContactService, ProjectService, SkillService};
pub use store::{FileSessionStore, MemorySessionStore, Session, SessionKey, SessionStore};
