//! Authenticated HTTP client for API testing
//!
//! Wraps a reqwest session with a base URL, a fixed timeout and a bearer
//! token. Responses are returned raw; status interpretation is left to the
//! calling scenario.

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, COOKIE},
    Client, Method,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

use super::token::{extract_token, TOKEN_STRATEGIES};

/// Default login path for the booking service
const DEFAULT_LOGIN_PATH: &str = "/auth";

/// HTTP client errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Authentication failed: {status} {body}")]
    Authentication { status: u16, body: String },

    #[error("Unauthorized response from {url}")]
    Authorization { url: String },

    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    Build(String),
}

/// HTTP client holding the session state of one test run
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    login_path: String,
    timeout: Duration,
    token: Option<String>,
    cookie_auth: bool,
    default_headers: HeaderMap,
}

impl ApiClient {
    /// Create a client for `base_url` with a fixed request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            timeout,
            token: None,
            cookie_auth: false,
            default_headers: HeaderMap::new(),
        })
    }

    /// Set the path `authenticate` posts credentials to
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Also send the token as `Cookie: token=<token>`
    pub fn cookie_auth(mut self, enabled: bool) -> Self {
        self.cookie_auth = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Current Authorization header value, if any
    pub fn authorization_header(&self) -> Option<&str> {
        self.default_headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }

    /// Current Cookie header value, if any
    pub fn cookie_header(&self) -> Option<&str> {
        self.default_headers
            .get(COOKIE)
            .and_then(|v| v.to_str().ok())
    }

    /// Log in and store the returned token.
    ///
    /// Any 2xx response is returned as is, whether or not it carried a token.
    pub async fn authenticate(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<HttpResponse, ClientError> {
        let path = self.login_path.clone();
        let options =
            RequestOptions::new().json(json!({ "username": username, "password": password }));
        let response = self.request("POST", &path, options).await?;

        if !response.is_success() {
            return Err(ClientError::Authentication {
                status: response.status_code,
                body: response.body,
            });
        }

        let token = extract_token(&response.json_or_text(), TOKEN_STRATEGIES);
        debug!(
            "Authenticated against {}{} (token found: {})",
            self.base_url,
            path,
            token.is_some()
        );
        self.set_token(token.as_deref())?;
        Ok(response)
    }

    /// Set or clear the token directly, bypassing authentication
    pub fn set_token(&mut self, token: Option<&str>) -> Result<(), ClientError> {
        let token = token.filter(|t| !t.is_empty());

        match token {
            Some(t) => {
                let bearer = header_value("authorization", &format!("Bearer {t}"))?;
                let cookie = if self.cookie_auth {
                    Some(header_value("cookie", &format!("token={t}"))?)
                } else {
                    None
                };

                self.default_headers.insert(AUTHORIZATION, bearer);
                match cookie {
                    Some(c) => {
                        self.default_headers.insert(COOKIE, c);
                    }
                    None => {
                        self.default_headers.remove(COOKIE);
                    }
                }
            }
            None => {
                self.default_headers.remove(AUTHORIZATION);
                self.default_headers.remove(COOKIE);
            }
        }

        self.token = token.map(str::to_string);
        Ok(())
    }

    /// Build full URL
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send a request and return the raw response
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError> {
        let url = self.build_url(path);
        let method = Method::from_bytes(method.to_uppercase().as_bytes())
            .map_err(|_| ClientError::InvalidMethod(method.to_string()))?;
        debug!("Sending {} request to {}", method, url);

        let mut req_builder = self
            .client
            .request(method, &url)
            .headers(self.default_headers.clone());

        if !options.query.is_empty() {
            req_builder = req_builder.query(&options.query);
        }

        if let Some(json) = &options.json {
            req_builder = req_builder.json(json);
        }

        let timeout = options.timeout.unwrap_or(self.timeout);
        req_builder = req_builder.timeout(timeout);

        let start = Instant::now();

        let response = req_builder
            .send()
            .await
            .map_err(|e| translate_error(&url, timeout, e))?;

        let status = response.status();
        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| translate_error(&url, timeout, e))?;
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Response: {} {} in {}ms",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration_ms
        );

        Ok(HttpResponse {
            status_code: status.as_u16(),
            headers,
            body,
            duration_ms,
        })
    }

    /// Same as `request`, but a 401 response becomes `ClientError::Authorization`
    pub async fn request_raise_on_unauthorized(
        &self,
        method: &str,
        path: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError> {
        let response = self.request(method, path, options).await?;
        if response.status_code == 401 {
            return Err(ClientError::Authorization {
                url: self.build_url(path),
            });
        }
        Ok(response)
    }

    /// Convenience method for GET request
    pub async fn get(&self, path: &str) -> Result<HttpResponse, ClientError> {
        self.request("GET", path, RequestOptions::new()).await
    }
}

fn translate_error(url: &str, timeout: Duration, e: reqwest::Error) -> ClientError {
    let reason = if e.is_timeout() {
        format!("timeout after {}ms", timeout.as_millis())
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        format!("request failed: {e}")
    };
    ClientError::Request {
        url: url.to_string(),
        reason,
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
        name,
        reason: e.to_string(),
    })
}

/// Per-request options
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub json: Option<Value>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    pub fn json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub duration_ms: u64,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Body parsed as JSON, if it is JSON
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// Body as JSON, falling back to a JSON string of the raw text
    pub fn json_or_text(&self) -> Value {
        self.json().unwrap_or_else(|| Value::String(self.body.clone()))
    }
}
