//! Wire types for the backend REST contract
//!
//! Field names follow the backend's JSON (camelCase, Mongo-style `_id`),
//! mapped to Rust naming via serde attributes.

pub mod common;
pub mod contact;
pub mod project;
pub mod skill;
pub mod user;

pub use common::{Envelope, Paginated, Pagination};
pub use contact::{ContactInput, ContactMessage, ContactStats, ContactStatus, StatusCount};
pub use project::{
    Project, ProjectImage, ProjectInput, ProjectLink, ProjectLinkKind, ProjectStatus,
    ProjectUpdate, Technology,
};
pub use skill::{Skill, SkillCategory, SkillInput, SkillUpdate};
pub use user::{AuthResponse, Credentials, RefreshRequest, Role, UserProfile};
