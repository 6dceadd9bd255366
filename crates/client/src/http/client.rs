//! Authenticated API client
//!
//! Issues JSON requests against absolute endpoint URLs, attaches the bearer
//! token from the session store, and runs every unauthorized response
//! through the refresh-retry protocol:
//!
//! - a request is retried at most once after a successful token refresh
//! - concurrent unauthorized requests share a single in-flight refresh
//!   (single-flight guard) and all observe its outcome
//! - a process-wide budget bounds total refresh attempts; once exhausted,
//!   unauthorized responses are terminal until the next successful login
//! - a failed refresh clears the stored session and surfaces
//!   [`ApiError::SessionExpired`]

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use folio_domain::constants::AUTH_HEADER;
use folio_domain::{AuthResponse, Envelope, RefreshRequest};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::{ClientConfig, Endpoints};
use crate::error::ApiError;
use crate::http::Transport;
use crate::store::{SessionKey, SessionStore};

/// Single-flight refresh coordination
///
/// `generation` increments after every completed refresh attempt; a request
/// that observed an older generation adopts the completed refresh's outcome
/// instead of issuing its own. The mutex holds whether the last refresh
/// failed.
struct RefreshGate {
    last_failed: Mutex<bool>,
    generation: AtomicU64,
    budget: AtomicU32,
    initial_budget: u32,
}

enum Reauth {
    /// A valid token is in the store; reissue the original request.
    Refreshed,
    /// No refresh attempts left; the unauthorized response is terminal.
    BudgetExhausted,
    /// There was no session to refresh; the unauthorized response stands.
    NoSession,
    /// Refresh failed; the session is over.
    Failed(ApiError),
}

enum Body {
    None,
    Json(serde_json::Value),
    Multipart {
        bytes: Vec<u8>,
        file_name: String,
        field_name: String,
        extra_fields: Vec<(String, String)>,
    },
}

struct RequestSpec {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    body: Body,
}

impl RequestSpec {
    fn new(method: Method, url: &str) -> Self {
        Self { method, url: url.to_string(), query: Vec::new(), body: Body::None }
    }
}

/// HTTP client core with bearer authentication and refresh-retry
pub struct ApiClient {
    transport: Transport,
    store: Arc<dyn SessionStore>,
    endpoints: Endpoints,
    refresh: RefreshGate,
}

impl ApiClient {
    /// Create a client from configuration and an injected session store.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the transport cannot be built.
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let transport = Transport::builder().timeout(config.timeout).build()?;
        Ok(Self {
            transport,
            store,
            endpoints: config.endpoints(),
            refresh: RefreshGate {
                last_failed: Mutex::new(false),
                generation: AtomicU64::new(0),
                budget: AtomicU32::new(config.max_refresh_attempts),
                initial_budget: config.max_refresh_attempts,
            },
        })
    }

    /// Endpoint table this client is configured against.
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Session store backing this client.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Restore the refresh budget to its configured value.
    ///
    /// Called on successful login; the budget otherwise only resets with the
    /// process.
    pub fn reset_refresh_budget(&self) {
        self.refresh.budget.store(self.refresh.initial_budget, Ordering::SeqCst);
    }

    // Public verbs

    /// GET the given URL.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`]; never a raw transport error.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.execute(RequestSpec::new(Method::GET, url)).await
    }

    /// GET with query parameters.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let mut spec = RequestSpec::new(Method::GET, url);
        spec.query = query.to_vec();
        self.execute(spec).await
    }

    /// POST a JSON body.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let mut spec = RequestSpec::new(Method::POST, url);
        spec.body = Body::Json(to_json(body)?);
        self.execute(spec).await
    }

    /// POST without a body.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn post_empty<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.execute(RequestSpec::new(Method::POST, url)).await
    }

    /// PUT a JSON body.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let mut spec = RequestSpec::new(Method::PUT, url);
        spec.body = Body::Json(to_json(body)?);
        self.execute(spec).await
    }

    /// PATCH a JSON body.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let mut spec = RequestSpec::new(Method::PATCH, url);
        spec.body = Body::Json(to_json(body)?);
        self.execute(spec).await
    }

    /// DELETE the given URL.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn delete<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.execute(RequestSpec::new(Method::DELETE, url)).await
    }

    /// Upload a file as a multipart form, with optional extra text fields.
    ///
    /// # Errors
    /// Rejects with a normalized [`ApiError`].
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        url: &str,
        bytes: Vec<u8>,
        file_name: &str,
        field_name: &str,
        extra_fields: &[(String, String)],
    ) -> Result<T, ApiError> {
        let mut spec = RequestSpec::new(Method::POST, url);
        spec.body = Body::Multipart {
            bytes,
            file_name: file_name.to_string(),
            field_name: field_name.to_string(),
            extra_fields: extra_fields.to_vec(),
        };
        self.execute(spec).await
    }

    // Core pipeline

    async fn execute<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T, ApiError> {
        // Explicit retried flag: a request is replayed at most once after a
        // refresh, no matter what the second response says.
        let mut retried = false;

        loop {
            let observed_generation = self.refresh.generation.load(Ordering::Acquire);
            let response = self.attempt(&spec).await?;
            let status = response.status();

            if status.is_success() {
                return parse_body(response).await;
            }

            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status.as_u16(), &body);

            if status == StatusCode::UNAUTHORIZED && !retried {
                match self.reauthorize(observed_generation).await {
                    Reauth::Refreshed => {
                        debug!(url = %spec.url, "retrying request after token refresh");
                        retried = true;
                        continue;
                    }
                    Reauth::BudgetExhausted | Reauth::NoSession => return Err(err),
                    Reauth::Failed(e) => return Err(e),
                }
            }

            return Err(err);
        }
    }

    /// Build and send one attempt of the request.
    ///
    /// The store is read on every attempt so a retry always picks up the
    /// freshest token.
    async fn attempt(&self, spec: &RequestSpec) -> Result<Response, ApiError> {
        let mut builder = self.transport.request(spec.method.clone(), &spec.url);

        if !spec.query.is_empty() {
            builder = builder.query(&spec.query);
        }

        builder = match &spec.body {
            Body::None => builder,
            Body::Json(value) => builder.json(value),
            Body::Multipart { bytes, file_name, field_name, extra_fields } => {
                // Multipart forms are not clonable, so each attempt rebuilds
                // the form from the captured parts.
                let part = Part::bytes(bytes.clone()).file_name(file_name.clone());
                let mut form = Form::new().part(field_name.clone(), part);
                for (key, value) in extra_fields {
                    form = form.text(key.clone(), value.clone());
                }
                builder.multipart(form)
            }
        };

        if let Some(token) = self.store.get(SessionKey::AccessToken).await {
            builder = builder.header(AUTH_HEADER, format!("Bearer {token}"));
        }

        self.transport.send(builder).await
    }

    /// Run the refresh protocol for a request that observed a 401.
    ///
    /// `observed_generation` is the refresh generation at the time the
    /// failed attempt read its token; if it is stale, a refresh completed in
    /// the meantime and its outcome is adopted without another refresh call.
    async fn reauthorize(&self, observed_generation: u64) -> Reauth {
        let mut last_failed = self.refresh.last_failed.lock().await;

        if self.refresh.generation.load(Ordering::Acquire) != observed_generation {
            return if *last_failed {
                Reauth::Failed(ApiError::SessionExpired)
            } else {
                Reauth::Refreshed
            };
        }

        let Some(refresh_token) = self.store.get(SessionKey::RefreshToken).await else {
            // An unauthenticated caller got a 401 (e.g. bad login
            // credentials): there is no session to refresh or to end.
            if self.store.get(SessionKey::AccessToken).await.is_none() {
                return Reauth::NoSession;
            }
            // Access token without a refresh token is a broken session.
            warn!("unauthorized response with no refresh token, ending session");
            self.store.clear().await;
            *last_failed = true;
            self.refresh.generation.fetch_add(1, Ordering::Release);
            return Reauth::Failed(ApiError::SessionExpired);
        };

        if self
            .refresh
            .budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |b| b.checked_sub(1))
            .is_err()
        {
            warn!("refresh budget exhausted, unauthorized response is terminal");
            return Reauth::BudgetExhausted;
        }

        match self.call_refresh(&refresh_token).await {
            Ok(auth) => {
                let user = serde_json::to_string(&auth.user).unwrap_or_default();
                self.store.set(&auth.token, &auth.refresh_token, &user).await;
                *last_failed = false;
                self.refresh.generation.fetch_add(1, Ordering::Release);
                info!("access token refreshed");
                Reauth::Refreshed
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed, ending session");
                self.store.clear().await;
                *last_failed = true;
                self.refresh.generation.fetch_add(1, Ordering::Release);
                Reauth::Failed(ApiError::SessionExpired)
            }
        }
    }

    /// Exchange the refresh token for a new token pair.
    async fn call_refresh(&self, refresh_token: &str) -> Result<AuthResponse, ApiError> {
        let body = RefreshRequest { refresh_token: refresh_token.to_string() };
        let builder = self
            .transport
            .request(Method::POST, &self.endpoints.refresh_token())
            .json(&body);

        let response = self.transport.send(builder).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        let envelope: Envelope<AuthResponse> = parse_body(response).await?;
        Ok(envelope.data)
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::Request(format!("Failed to serialize body: {e}")))
}

async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    // 204/205 responses carry no body; deserialize from JSON null so () and
    // Option targets succeed.
    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
            ApiError::Request(format!(
                "no-content response ({status}) cannot satisfy the expected type"
            ))
        });
    }

    response.json().await.map_err(|e| ApiError::Request(format!("Failed to parse response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySessionStore;

    fn test_client(base_url: &str) -> ApiClient {
        let config = ClientConfig::new(base_url);
        ApiClient::new(&config, Arc::new(MemorySessionStore::new())).unwrap()
    }

    #[tokio::test]
    async fn budget_reset_restores_configured_value() {
        let client = test_client("http://localhost:0");
        client.refresh.budget.store(0, Ordering::SeqCst);
        client.reset_refresh_budget();
        assert_eq!(client.refresh.budget.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn request_without_session_sends_no_auth_header() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let _: serde_json::Value = client.get(&format!("{}/public", server.uri())).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get(AUTH_HEADER).is_none());
    }

    #[tokio::test]
    async fn request_with_session_sends_bearer_token() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.store().set("tok-1", "ref-1", "{}").await;
        let _: serde_json::Value = client.get(&format!("{}/private", server.uri())).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let auth = requests[0].headers.get(AUTH_HEADER).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer tok-1");
    }

    #[tokio::test]
    async fn delete_accepts_no_content_response() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("DELETE"))
            .respond_with(wiremock::ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result: Result<(), ApiError> = client.delete(&format!("{}/x/1", server.uri())).await;
        assert!(result.is_ok());
    }
}
