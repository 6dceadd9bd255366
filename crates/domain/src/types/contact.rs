//! Contact form wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow status of a contact submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Read,
    Replied,
    Archived,
}

impl ContactStatus {
    /// Wire name of the status, as used in query strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
            Self::Archived => "archived",
        }
    }
}

/// A contact form submission as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(default)]
    pub is_spam: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replied_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replied_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields submitted through the public contact form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Per-status submission count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: ContactStatus,
    pub count: u64,
}

/// Aggregate contact statistics (admin only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactStats {
    pub stats: Vec<StatusCount>,
    pub total: u64,
}

impl ContactStats {
    /// Count of submissions still in the `new` status.
    #[must_use]
    pub fn unread(&self) -> u64 {
        self.stats
            .iter()
            .find(|s| s.status == ContactStatus::New)
            .map_or(0, |s| s.count)
    }
}
