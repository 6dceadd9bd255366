//! Auth session facade
//!
//! Composes the session store and the API client into the operations the
//! application layer consumes: login, logout, cached-profile access and the
//! backend liveness probe. The facade makes no UI decisions; a
//! [`ApiError::SessionExpired`] rejection is the signal to redirect to a
//! login entry point.

use std::sync::Arc;

use folio_domain::{AuthResponse, Credentials, Envelope, UserProfile};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::store::SessionKey;

/// Login, logout and session inspection over an [`ApiClient`]
pub struct AuthSession {
    client: Arc<ApiClient>,
}

impl AuthSession {
    /// Create a facade over the given client.
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// The client this facade issues requests through.
    #[must_use]
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Log in with email and password.
    ///
    /// On success the token triple is persisted atomically and the refresh
    /// budget is restored. All failures come back as normalized values;
    /// nothing panics.
    ///
    /// # Errors
    /// Returns the normalized error from the login call.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        let credentials =
            Credentials { email: email.to_string(), password: password.to_string() };

        let envelope: Envelope<AuthResponse> =
            self.client.post(&self.client.endpoints().login(), &credentials).await?;
        let auth = envelope.data;

        let user_json = serde_json::to_string(&auth.user)
            .map_err(|e| ApiError::Request(format!("Failed to serialize profile: {e}")))?;
        self.client.store().set(&auth.token, &auth.refresh_token, &user_json).await;
        self.client.reset_refresh_budget();

        info!(user = %auth.user.email, "login successful");
        Ok(auth.user)
    }

    /// Log out: best-effort remote notify, then unconditional local clear.
    ///
    /// Never fails; a rejected remote call is logged and the local session
    /// is cleared regardless. Safe to call when already logged out.
    pub async fn logout(&self) {
        if self.is_authenticated().await {
            let result: Result<(), ApiError> =
                self.client.post_empty(&self.client.endpoints().logout()).await;
            if let Err(e) = result {
                warn!(error = %e, "remote logout failed, clearing local session anyway");
            }
        }

        self.client.store().clear().await;
        debug!("session cleared");
    }

    /// Cached user profile from the session store, if any.
    ///
    /// Returns `None` when logged out or when the cached profile does not
    /// parse.
    pub async fn current_user(&self) -> Option<UserProfile> {
        let raw = self.client.store().get(SessionKey::User).await?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "stored user profile is unreadable");
                None
            }
        }
    }

    /// Re-read the cached profile. The profile only changes on re-login or
    /// refresh, so this is a cheap store read, not a network call.
    pub async fn refresh_user(&self) -> Option<UserProfile> {
        self.current_user().await
    }

    /// Whether an access token is currently stored.
    pub async fn is_authenticated(&self) -> bool {
        self.client.store().get(SessionKey::AccessToken).await.is_some()
    }

    /// Whether the cached profile carries the admin role.
    pub async fn is_admin(&self) -> bool {
        self.current_user().await.is_some_and(|u| u.is_admin())
    }

    /// Validate the current session against the backend.
    ///
    /// Probes `GET /auth/me` through the full request pipeline, so an
    /// expired access token triggers the refresh-retry protocol before this
    /// reports false.
    pub async fn check_auth(&self) -> bool {
        if !self.is_authenticated().await {
            return false;
        }

        let probe: Result<serde_json::Value, ApiError> =
            self.client.get(&self.client.endpoints().me()).await;

        match probe {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "auth probe failed");
                false
            }
        }
    }
}
