//! REST access to the Threadly backend
//!
//! Every network call in the client goes through the [`Backend`] trait so
//! screens and stores can be exercised against a recording mock in tests.
//! [`HttpBackend`] is the browser implementation built on reqwest.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::AppConfig;

/// Fallback text for failures that carry no message of their own
pub const GENERIC_ERROR: &str = "Something went wrong";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport failure: offline, DNS, CORS, aborted fetch
    #[error("network error: {0}")]
    Network(String),
    /// Session missing or expired
    #[error("{0}")]
    Unauthorized(String),
    /// Entity does not exist (already deleted, wrong id)
    #[error("{0}")]
    NotFound(String),
    /// Any other non-2xx reply
    #[error("request failed with status {code}: {message}")]
    Status { code: u16, message: String },
    /// Body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build an error from a non-2xx status and the raw body text
    pub fn from_status(code: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_default();

        match code {
            401 | 403 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Status { code, message },
        }
    }

    /// Text suitable for a toast
    pub fn user_message(&self) -> String {
        let specific = match self {
            ApiError::Unauthorized(m) | ApiError::NotFound(m) => m.as_str(),
            ApiError::Status { message, .. } => message.as_str(),
            ApiError::Network(_) | ApiError::Decode(_) => "",
        };
        if specific.trim().is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            specific.to_string()
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Which backend service a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Api,
    Auth,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub service: Service,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            service: Service::Api,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn auth(mut self) -> Self {
        self.service = Service::Auth;
        self
    }

    /// Value of a query parameter, if set
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Network seam for the whole client
#[async_trait(?Send)]
pub trait Backend {
    /// Issue a REST call and return the parsed body (`Value::Null` when empty)
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;

    /// PUT raw bytes to a pre-signed object storage URL
    async fn put_object(&self, url: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), ApiError>;
}

/// Join a base URL, a path and query pairs
pub fn build_url(base: &str, path: &str, query: &[(String, String)]) -> Result<url::Url, ApiError> {
    let mut url = url::Url::parse(&format!("{}{}", base.trim_end_matches('/'), path))
        .map_err(|e| ApiError::Network(format!("invalid url: {}", e)))?;
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    Ok(url)
}

/// reqwest-backed [`Backend`]; sends session cookies along on wasm
pub struct HttpBackend {
    client: reqwest::Client,
    config: AppConfig,
}

impl HttpBackend {
    pub fn new(config: AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn base(&self, service: Service) -> &str {
        match service {
            Service::Api => &self.config.api_base,
            Service::Auth => &self.config.auth_base,
        }
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = build_url(self.base(request.service), &request.path, &request.query)?;
        log::debug!("{:?} {}", request.method, url);

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };

        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.fetch_credentials_include();
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            log::warn!("{:?} {} failed with {}", request.method, request.path, status);
            return Err(ApiError::from_status(status.as_u16(), &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn put_object(&self, url: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), ApiError> {
        log::info!("Uploading {} bytes ({})", bytes.len(), content_type);

        let response = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    /// A recorded pre-signed PUT
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedPut {
        pub url: String,
        pub len: usize,
        pub content_type: String,
    }

    /// Recording backend with scripted replies keyed by method and path.
    /// Unscripted calls succeed with `Value::Null`.
    #[derive(Default)]
    pub struct MockBackend {
        pub calls: RefCell<Vec<ApiRequest>>,
        pub puts: RefCell<Vec<RecordedPut>>,
        replies: RefCell<HashMap<(Method, String), VecDeque<Result<Value, ApiError>>>>,
        put_failure: RefCell<Option<ApiError>>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(&self, method: Method, path: &str, result: Result<Value, ApiError>) {
            self.replies
                .borrow_mut()
                .entry((method, path.to_string()))
                .or_default()
                .push_back(result);
        }

        pub fn fail_puts(&self, error: ApiError) {
            *self.put_failure.borrow_mut() = Some(error);
        }

        pub fn calls_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
            self.calls
                .borrow()
                .iter()
                .filter(|c| c.method == method && c.path == path)
                .cloned()
                .collect()
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl Backend for MockBackend {
        async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
            let key = (request.method, request.path.clone());
            self.calls.borrow_mut().push(request);
            self.replies
                .borrow_mut()
                .get_mut(&key)
                .and_then(|queue| queue.pop_front())
                .unwrap_or(Ok(Value::Null))
        }

        async fn put_object(&self, url: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), ApiError> {
            self.puts.borrow_mut().push(RecordedPut {
                url: url.to_string(),
                len: bytes.len(),
                content_type: content_type.to_string(),
            });
            match self.put_failure.borrow().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }
}
