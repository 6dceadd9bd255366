//! HTTP client core
//!
//! [`Transport`] owns the reqwest client and normalizes transport failures;
//! [`ApiClient`] layers bearer authentication and the refresh-retry protocol
//! on top of it.

mod client;
mod transport;

pub use client::ApiClient;
pub use transport::{Transport, TransportBuilder};
