//! JSON-over-HTTP client for the dashboard API.
//!
//! Every request to the dashboard API carries `Authorization: Bearer <token>`
//! when the session store holds a token. Non-2xx responses are decoded into
//! [`WordbookError::Api`] from their `{status, message, error}` body.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config;
use crate::error::{Result, WordbookError};
use crate::models::{ApiErrorBody, LoginRequest, RegistrationPayload, RegistrationRequest, User};
use crate::session::{AuthBackend, SessionStore};

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Blocking HTTP client bound to one API base URL.
///
/// Cheap to clone: clones share the connection pool and the session store.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    store: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, store: SessionStore) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Absolute URLs pass through; anything else is appended to the base URL.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.execute(Method::GET, path, None, true)?;
        decode(&body)
    }

    /// GET without the bearer token, for third-party endpoints.
    pub fn get_public<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.execute(Method::GET, url, None, false)?;
        decode(&body)
    }

    pub fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, data: &B) -> Result<T> {
        let body = self.execute(Method::POST, path, Some(serde_json::to_value(data)?), true)?;
        decode(&body)
    }

    pub fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, data: &B) -> Result<T> {
        let body = self.execute(Method::PUT, path, Some(serde_json::to_value(data)?), true)?;
        decode(&body)
    }

    /// DELETE; the response body, if any, is ignored.
    pub fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, None, true)?;
        Ok(())
    }

    /// POST without a body whose response body is ignored.
    pub fn post_empty(&self, path: &str) -> Result<()> {
        self.execute(Method::POST, path, None, true)?;
        Ok(())
    }

    /// Send one request and return the raw body of a 2xx response.
    fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        authenticated: bool,
    ) -> Result<String> {
        let url = self.resolve(path);
        tracing::debug!(%method, %url, "api request");

        let mut request = self
            .http
            .request(method, url.as_str())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        if authenticated {
            if let Some(token) = self.store.load_token() {
                request = request.header(AUTHORIZATION, format!("Bearer {}", token));
            }
        }
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(&body)?);
        }

        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            let parsed: ApiErrorBody = serde_json::from_str(&text).unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "api error response");
            return Err(WordbookError::Api {
                status: status.as_u16(),
                message: parsed.message,
                error: parsed.error,
            });
        }
        Ok(text)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}

// ---------------------------------------------------------------------------
// HttpAuthBackend
// ---------------------------------------------------------------------------

/// [`AuthBackend`] talking to the dashboard's `/Api/Client/*` endpoints.
#[derive(Clone)]
pub struct HttpAuthBackend {
    client: ApiClient,
}

impl HttpAuthBackend {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl AuthBackend for HttpAuthBackend {
    fn register(&self, details: &RegistrationRequest) -> Result<User> {
        self.client
            .post(config::REGISTER_PATH, &RegistrationPayload::from(details))
    }

    fn login(&self, credentials: &LoginRequest) -> Result<User> {
        self.client.post(config::LOGIN_PATH, credentials)
    }

    fn logout(&self) -> Result<()> {
        self.client.post_empty(config::LOGOUT_PATH)
    }
}
