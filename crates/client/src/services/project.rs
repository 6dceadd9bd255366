//! Project service

use std::sync::Arc;

use folio_domain::{Envelope, Paginated, Project, ProjectInput, ProjectUpdate};
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Deserialize)]
struct ProjectData {
    project: Project,
}

#[derive(Debug, Deserialize)]
struct ProjectListData {
    projects: Vec<Project>,
}

/// Filter and pagination parameters for listing projects
#[derive(Debug, Clone, Default)]
pub struct ProjectListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub fields: Option<String>,
    pub search: Option<String>,
    pub tag: Option<String>,
}

impl ProjectListParams {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(sort) = &self.sort {
            query.push(("sort".to_string(), sort.clone()));
        }
        if let Some(fields) = &self.fields {
            query.push(("fields".to_string(), fields.clone()));
        }
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        if let Some(tag) = &self.tag {
            query.push(("tags".to_string(), tag.clone()));
        }
        query
    }
}

/// Portfolio project read and admin CRUD operations
pub struct ProjectService {
    client: Arc<ApiClient>,
}

impl ProjectService {
    /// Create a service over the given client.
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List projects with filtering and pagination.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn list(&self, params: &ProjectListParams) -> Result<Paginated<Project>, ApiError> {
        let envelope: Envelope<ProjectListData> = self
            .client
            .get_with_query(&self.client.endpoints().projects(), &params.to_query())
            .await?;
        Ok(Paginated { items: envelope.data.projects, pagination: envelope.pagination })
    }

    /// Fetch a single project.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn get(&self, id: &str) -> Result<Project, ApiError> {
        let envelope: Envelope<ProjectData> =
            self.client.get(&self.client.endpoints().project_by_id(id)).await?;
        Ok(envelope.data.project)
    }

    /// Fetch the featured projects.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn featured(&self) -> Result<Vec<Project>, ApiError> {
        let envelope: Envelope<ProjectListData> =
            self.client.get(&self.client.endpoints().featured_projects()).await?;
        Ok(envelope.data.projects)
    }

    /// Create a project (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn create(&self, input: &ProjectInput) -> Result<Project, ApiError> {
        let envelope: Envelope<ProjectData> =
            self.client.post(&self.client.endpoints().projects(), input).await?;
        Ok(envelope.data.project)
    }

    /// Apply a partial update to a project (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn update(&self, id: &str, update: &ProjectUpdate) -> Result<Project, ApiError> {
        let envelope: Envelope<ProjectData> =
            self.client.patch(&self.client.endpoints().project_by_id(id), update).await?;
        Ok(envelope.data.project)
    }

    /// Delete a project (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&self.client.endpoints().project_by_id(id)).await
    }

    /// Full-text search over projects.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn search(&self, query: &str) -> Result<Vec<Project>, ApiError> {
        let params = ProjectListParams { search: Some(query.to_string()), ..Default::default() };
        Ok(self.list(&params).await?.items)
    }

    /// Projects carrying the given tag.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn by_tag(&self, tag: &str) -> Result<Vec<Project>, ApiError> {
        let params = ProjectListParams { tag: Some(tag.to_string()), ..Default::default() };
        Ok(self.list(&params).await?.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_build_expected_query() {
        let params = ProjectListParams {
            page: Some(1),
            limit: Some(10),
            search: Some("rust".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("search".to_string(), "rust".to_string()),
            ]
        );
    }
}
