//! Backend endpoint table
//!
//! All URL construction lives here; the HTTP client and services only ever
//! see absolute URLs.

/// Absolute endpoint URLs rooted at a base URL
#[derive(Debug, Clone)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    /// Create an endpoint table for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    /// The base URL this table is rooted at.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // Auth

    #[must_use]
    pub fn login(&self) -> String {
        format!("{}/auth/login", self.base_url)
    }

    #[must_use]
    pub fn logout(&self) -> String {
        format!("{}/auth/logout", self.base_url)
    }

    #[must_use]
    pub fn refresh_token(&self) -> String {
        format!("{}/auth/refresh-token", self.base_url)
    }

    #[must_use]
    pub fn me(&self) -> String {
        format!("{}/auth/me", self.base_url)
    }

    // Projects

    #[must_use]
    pub fn projects(&self) -> String {
        format!("{}/projects", self.base_url)
    }

    #[must_use]
    pub fn project_by_id(&self, id: &str) -> String {
        format!("{}/projects/{id}", self.base_url)
    }

    #[must_use]
    pub fn featured_projects(&self) -> String {
        format!("{}/projects/featured", self.base_url)
    }

    // Skills

    #[must_use]
    pub fn skills(&self) -> String {
        format!("{}/skills", self.base_url)
    }

    #[must_use]
    pub fn skill_by_id(&self, id: &str) -> String {
        format!("{}/skills/{id}", self.base_url)
    }

    #[must_use]
    pub fn skill_categories(&self) -> String {
        format!("{}/skills/categories", self.base_url)
    }

    #[must_use]
    pub fn skills_by_category(&self, category: &str) -> String {
        format!("{}/skills/categories/{category}", self.base_url)
    }

    // Contact

    #[must_use]
    pub fn contact(&self) -> String {
        format!("{}/contact", self.base_url)
    }

    #[must_use]
    pub fn contact_by_id(&self, id: &str) -> String {
        format!("{}/contact/{id}", self.base_url)
    }

    #[must_use]
    pub fn contact_stats(&self) -> String {
        format!("{}/contact/stats", self.base_url)
    }

    #[must_use]
    pub fn contact_status(&self, id: &str) -> String {
        format!("{}/contact/{id}/status", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_rooted_at_base() {
        let endpoints = Endpoints::new("https://api.example.com/v1");
        assert_eq!(endpoints.login(), "https://api.example.com/v1/auth/login");
        assert_eq!(endpoints.refresh_token(), "https://api.example.com/v1/auth/refresh-token");
        assert_eq!(endpoints.project_by_id("p1"), "https://api.example.com/v1/projects/p1");
        assert_eq!(
            endpoints.skills_by_category("backend"),
            "https://api.example.com/v1/skills/categories/backend"
        );
        assert_eq!(endpoints.contact_status("c9"), "https://api.example.com/v1/contact/c9/status");
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let endpoints = Endpoints::new("https://api.example.com/");
        assert_eq!(endpoints.me(), "https://api.example.com/auth/me");
    }
}
