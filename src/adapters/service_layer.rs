//! Service Layer adapter: session-cookie REST access to the B1 Service Layer.
//!
//! The adapter is a two-state machine around one piece of state, the session
//! id. [`authenticate`](ServiceLayerAdapter::authenticate) transitions it to
//! authenticated (overwriting any previous session), every
//! [`request`](ServiceLayerAdapter::request) reads it, and
//! [`logout`](ServiceLayerAdapter::logout) resets it. No expiry tracking and
//! no automatic re-authentication: a stale session surfaces as the server's
//! own authorization error.

use crate::error::AdapterError;
use crate::Result;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Connection settings for a Service Layer endpoint.
#[derive(Debug, Clone)]
pub struct ServiceLayerConfig {
    /// Scheme-qualified host, e.g. `https://b1.example.com`.
    pub host: String,
    /// Service Layer port (50000 on typical installations).
    pub port: u16,
    /// API version path segment, e.g. `v1`.
    pub version: String,
    /// Company database the login applies to (`CompanyDB`).
    pub company: String,
    /// Skip TLS certificate verification. On by default because Service
    /// Layer endpoints commonly run with self-signed certificates; turn this
    /// off when the endpoint has a real certificate chain.
    pub accept_invalid_certs: bool,
}

impl ServiceLayerConfig {
    /// Creates a configuration that accepts invalid certificates, the
    /// posture required by stock self-signed Service Layer installs.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        version: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            version: version.into(),
            company: company.into(),
            accept_invalid_certs: true,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns a configuration error if the host is not an http(s) URL, the
    /// port is zero, or the version/company is empty.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.host).map_err(|e| {
            AdapterError::configuration(format!(
                "Service Layer host must be a scheme-qualified URL: {e}"
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AdapterError::configuration(format!(
                "Service Layer host must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.port == 0 {
            return Err(AdapterError::configuration(
                "Service Layer port must not be zero",
            ));
        }
        if self.version.trim().is_empty() {
            return Err(AdapterError::configuration(
                "Service Layer version must not be empty",
            ));
        }
        if self.company.trim().is_empty() {
            return Err(AdapterError::configuration(
                "Service Layer company must not be empty",
            ));
        }
        Ok(())
    }
}

/// Authentication state of a [`ServiceLayerAdapter`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No login has succeeded yet (or the session was reset).
    #[default]
    Unauthenticated,
    /// A login succeeded; the contained id is sent with every request.
    Authenticated(String),
}

impl SessionState {
    /// The session id, if authenticated.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated => None,
            Self::Authenticated(id) => Some(id),
        }
    }

    /// The `Cookie` header value sent with requests.
    ///
    /// Unauthenticated adapters send an empty-valued cookie (`B1SESSION=;`)
    /// rather than refusing the request: whether an anonymous call is
    /// acceptable is the server's decision, not this adapter's.
    #[must_use]
    pub fn cookie_value(&self) -> String {
        format!("B1SESSION={};", self.session_id().unwrap_or(""))
    }
}

/// Login request body, field names as the Service Layer expects them.
#[derive(Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "UserName")]
    user_name: &'a str,
    #[serde(rename = "Password")]
    password: &'a str,
    #[serde(rename = "CompanyDB")]
    company_db: &'a str,
}

/// Payload returned by a successful `Login` call.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Session id to be carried as the `B1SESSION` cookie.
    #[serde(rename = "SessionId")]
    pub session_id: String,
    /// Service Layer version string, when the server reports one.
    #[serde(rename = "Version", default)]
    pub version: Option<String>,
    /// Session timeout in minutes, when the server reports one.
    #[serde(rename = "SessionTimeout", default)]
    pub session_timeout: Option<u32>,
}

/// Service Layer adapter. Construction performs no network I/O.
pub struct ServiceLayerAdapter {
    http: Client,
    base_url: String,
    company: String,
    session: SessionState,
}

impl ServiceLayerAdapter {
    /// Creates a new adapter from a validated configuration.
    ///
    /// The HTTP client built here honors
    /// [`accept_invalid_certs`](ServiceLayerConfig::accept_invalid_certs) for
    /// every request made through this instance.
    ///
    /// # Errors
    /// Returns a configuration error if validation fails or the HTTP client
    /// cannot be built.
    pub fn new(config: ServiceLayerConfig) -> Result<Self> {
        config.validate()?;

        let http = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| {
                AdapterError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            base_url: format!("{}:{}/b1s/{}", config.host, config.port, config.version),
            company: config.company,
            session: SessionState::Unauthenticated,
        })
    }

    /// Current session state.
    #[must_use]
    pub fn session_state(&self) -> &SessionState {
        &self.session
    }

    /// Session id of the last successful login, if any.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session.session_id()
    }

    /// Logs in against `POST {base}/Login` with the configured company.
    ///
    /// On success the returned session id replaces any previously stored one
    /// (re-authentication is always allowed) and the full login payload is
    /// returned. On any failure the session state is left unchanged.
    ///
    /// # Errors
    /// Returns a transport error if the request never reached the server, or
    /// an authentication error if the server rejected the login or returned
    /// an undecodable payload.
    pub async fn authenticate(&mut self, username: &str, password: &str) -> Result<LoginResponse> {
        let url = format!("{}/Login", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                user_name: username,
                password,
                company_db: &self.company,
            })
            .send()
            .await
            .map_err(|e| AdapterError::transport_failed(format!("POST {url}"), e))?;

        let response = response
            .error_for_status()
            .map_err(|e| AdapterError::authentication_failed(format!("POST {url}"), e))?;

        let login: LoginResponse = response.json().await.map_err(|e| {
            AdapterError::authentication_failed(format!("decoding login payload from {url}"), e)
        })?;

        self.session = SessionState::Authenticated(login.session_id.clone());
        tracing::debug!(company = %self.company, "service layer session established");
        Ok(login)
    }

    /// Issues an arbitrary request against `{base}/{endpoint}`, carrying the
    /// current session id as the `B1SESSION` cookie and the given JSON body
    /// if present.
    ///
    /// No session check is performed first: an unauthenticated request sends
    /// an empty-valued cookie and fails per the server's authorization rules.
    /// An empty response body resolves to [`Value::Null`]; anything else is
    /// returned as parsed JSON, untouched.
    ///
    /// # Errors
    /// Returns a transport error if the request failed in transit, the
    /// server answered with a non-success status, or the body was not JSON.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let context = format!("{method} {url}");

        let mut request = self
            .http
            .request(method, url.as_str())
            .header("Cookie", self.session.cookie_value());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AdapterError::transport_failed(context.clone(), e))?;

        let response = response
            .error_for_status()
            .map_err(|e| AdapterError::transport_failed(context.clone(), e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AdapterError::transport_failed(context.clone(), e))?;

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| AdapterError::transport_failed(format!("decoding payload of {context}"), e))
    }

    /// Resets the session to unauthenticated.
    ///
    /// Purely a local state transition; the server-side session is left to
    /// expire on its own. Subsequent requests send the empty-valued cookie
    /// again until the next [`authenticate`](Self::authenticate).
    pub fn logout(&mut self) {
        self.session = SessionState::Unauthenticated;
        tracing::debug!(company = %self.company, "service layer session reset");
    }
}
