//! Contact form service

use std::sync::Arc;

use folio_domain::{
    ContactInput, ContactMessage, ContactStats, ContactStatus, Envelope, Paginated,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Deserialize)]
struct ContactData {
    contact: ContactMessage,
}

#[derive(Debug, Deserialize)]
struct ContactListData {
    contacts: Vec<ContactMessage>,
}

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: ContactStatus,
}

/// Filter and pagination parameters for listing submissions
#[derive(Debug, Clone, Default)]
pub struct ContactListParams {
    pub status: Option<ContactStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
}

impl ContactListParams {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(sort) = &self.sort {
            query.push(("sort".to_string(), sort.clone()));
        }
        query
    }
}

/// Contact form submission and admin moderation operations
pub struct ContactService {
    client: Arc<ApiClient>,
}

impl ContactService {
    /// Create a service over the given client.
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Submit the public contact form.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn submit(&self, input: &ContactInput) -> Result<ContactMessage, ApiError> {
        let envelope: Envelope<ContactData> =
            self.client.post(&self.client.endpoints().contact(), input).await?;
        Ok(envelope.data.contact)
    }

    /// List submissions with filtering and pagination (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn list(
        &self,
        params: &ContactListParams,
    ) -> Result<Paginated<ContactMessage>, ApiError> {
        let envelope: Envelope<ContactListData> = self
            .client
            .get_with_query(&self.client.endpoints().contact(), &params.to_query())
            .await?;
        Ok(Paginated { items: envelope.data.contacts, pagination: envelope.pagination })
    }

    /// Fetch a single submission (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn get(&self, id: &str) -> Result<ContactMessage, ApiError> {
        let envelope: Envelope<ContactData> =
            self.client.get(&self.client.endpoints().contact_by_id(id)).await?;
        Ok(envelope.data.contact)
    }

    /// Aggregate statistics over all submissions (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn stats(&self) -> Result<ContactStats, ApiError> {
        let envelope: Envelope<ContactStats> =
            self.client.get(&self.client.endpoints().contact_stats()).await?;
        Ok(envelope.data)
    }

    /// Move a submission to the given status (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn update_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> Result<ContactMessage, ApiError> {
        let envelope: Envelope<ContactData> = self
            .client
            .patch(&self.client.endpoints().contact_status(id), &StatusUpdate { status })
            .await?;
        Ok(envelope.data.contact)
    }

    /// Delete a submission (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&self.client.endpoints().contact_by_id(id)).await
    }

    /// Mark a submission as read (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn mark_read(&self, id: &str) -> Result<ContactMessage, ApiError> {
        self.update_status(id, ContactStatus::Read).await
    }

    /// Mark a submission as replied (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn mark_replied(&self, id: &str) -> Result<ContactMessage, ApiError> {
        self.update_status(id, ContactStatus::Replied).await
    }

    /// Archive a submission (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn archive(&self, id: &str) -> Result<ContactMessage, ApiError> {
        self.update_status(id, ContactStatus::Archived).await
    }

    /// Count of submissions still in the `new` status (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn unread_count(&self) -> Result<u64, ApiError> {
        Ok(self.stats().await?.unread())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_build_expected_query() {
        let params = ContactListParams {
            status: Some(ContactStatus::New),
            page: Some(2),
            limit: Some(25),
            sort: Some("-createdAt".to_string()),
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("status".to_string(), "new".to_string()),
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "25".to_string()),
                ("sort".to_string(), "-createdAt".to_string()),
            ]
        );
    }

    #[test]
    fn default_params_build_empty_query() {
        assert!(ContactListParams::default().to_query().is_empty());
    }
}
