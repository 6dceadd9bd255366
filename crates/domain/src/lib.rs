//! # Folio Domain
//!
//! Shared types and models for the folio portfolio client.
//!
//! This crate contains:
//! - Wire types for the backend REST contract (users, projects, skills,
//!   contact messages, pagination envelopes)
//! - Domain error types and Result definitions
//! - Domain constants (storage keys, API defaults)
//!
//! ## Architecture
//! - No dependencies on other folio crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
