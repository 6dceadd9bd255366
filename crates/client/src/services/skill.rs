//! Skill service

use std::collections::HashMap;
use std::sync::Arc;

use folio_domain::{Envelope, Skill, SkillCategory, SkillInput, SkillUpdate};
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Deserialize)]
struct SkillData {
    skill: Skill,
}

#[derive(Debug, Deserialize)]
struct GroupedSkillsData {
    skills: HashMap<String, Vec<Skill>>,
}

#[derive(Debug, Deserialize)]
struct SkillListData {
    skills: Vec<Skill>,
}

#[derive(Debug, Deserialize)]
struct CategoriesData {
    categories: Vec<SkillCategory>,
}

/// Filter parameters for listing skills
#[derive(Debug, Clone, Default)]
pub struct SkillListParams {
    pub category: Option<SkillCategory>,
    pub featured: Option<bool>,
}

impl SkillListParams {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(category) = self.category {
            query.push(("category".to_string(), category.as_str().to_string()));
        }
        if let Some(featured) = self.featured {
            query.push(("featured".to_string(), featured.to_string()));
        }
        query
    }
}

/// Skill read and admin CRUD operations
pub struct SkillService {
    client: Arc<ApiClient>,
}

impl SkillService {
    /// Create a service over the given client.
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// List skills grouped by category, optionally filtered.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn list(
        &self,
        params: &SkillListParams,
    ) -> Result<HashMap<String, Vec<Skill>>, ApiError> {
        let envelope: Envelope<GroupedSkillsData> = self
            .client
            .get_with_query(&self.client.endpoints().skills(), &params.to_query())
            .await?;
        Ok(envelope.data.skills)
    }

    /// Fetch a single skill.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn get(&self, id: &str) -> Result<Skill, ApiError> {
        let envelope: Envelope<SkillData> =
            self.client.get(&self.client.endpoints().skill_by_id(id)).await?;
        Ok(envelope.data.skill)
    }

    /// All categories that currently have skills.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn categories(&self) -> Result<Vec<SkillCategory>, ApiError> {
        let envelope: Envelope<CategoriesData> =
            self.client.get(&self.client.endpoints().skill_categories()).await?;
        Ok(envelope.data.categories)
    }

    /// Skills in a single category.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn by_category(&self, category: SkillCategory) -> Result<Vec<Skill>, ApiError> {
        let envelope: Envelope<SkillListData> = self
            .client
            .get(&self.client.endpoints().skills_by_category(category.as_str()))
            .await?;
        Ok(envelope.data.skills)
    }

    /// All featured skills, flattened across categories.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn featured(&self) -> Result<Vec<Skill>, ApiError> {
        let params = SkillListParams { featured: Some(true), ..Default::default() };
        let grouped = self.list(&params).await?;
        Ok(grouped.into_values().flatten().collect())
    }

    /// Create a skill (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn create(&self, input: &SkillInput) -> Result<Skill, ApiError> {
        let envelope: Envelope<SkillData> =
            self.client.post(&self.client.endpoints().skills(), input).await?;
        Ok(envelope.data.skill)
    }

    /// Apply a partial update to a skill (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn update(&self, id: &str, update: &SkillUpdate) -> Result<Skill, ApiError> {
        let envelope: Envelope<SkillData> =
            self.client.patch(&self.client.endpoints().skill_by_id(id), update).await?;
        Ok(envelope.data.skill)
    }

    /// Delete a skill (admin only).
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&self.client.endpoints().skill_by_id(id)).await
    }
}
