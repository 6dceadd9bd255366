//! Typed domain services
//!
//! Thin wrappers translating domain calls into [`ApiClient`] requests
//! against the endpoint table. No transport or error logic lives here; every
//! rejection is already a normalized [`crate::error::ApiError`].
//!
//! [`ApiClient`]: crate::http::ApiClient

mod contact;
mod project;
mod skill;

pub use contact::{ContactListParams, ContactService};
pub use project::{ProjectListParams, ProjectService};
pub use skill::{SkillListParams, SkillService};
