//! Authenticated JSON client
//!
//! Every backend call goes through [`dispatch`]:
//! - attaches `Authorization: Bearer <access>` when a token is available
//! - on 401 asks the [`TokenSource`] for a new access token and re-issues
//!   the request once with it
//! - if the refresh fails, reports [`HttpError::Unauthenticated`]; the token
//!   source has already cleared the session by then
//!
//! Concurrent requests that hit 401 together each refresh on their own.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::core::error::{HttpError, RefreshError};

/// Supplies and renews the bearer token for outgoing requests
#[async_trait(?Send)]
pub trait TokenSource: Send + Sync {
    /// Current access token, if logged in
    fn access_token(&self) -> Option<String>;

    /// Exchange the refresh token for a new access token.
    ///
    /// On failure the implementation must have cleared the session.
    async fn refresh_access_token(&self) -> Result<String, RefreshError>;
}

/// Per-request knobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Query string parameters, URL-encoded on send
    pub query: Vec<(String, String)>,
    /// Attach the bearer token
    pub authenticate: bool,
    /// Refresh the token and retry once on 401
    pub refresh_on_unauthorized: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            query: Vec::new(),
            authenticate: true,
            refresh_on_unauthorized: true,
        }
    }
}

impl RequestOptions {
    /// Options for endpoints that must not see a token or trigger a refresh
    pub fn anonymous() -> Self {
        Self {
            query: Vec::new(),
            authenticate: false,
            refresh_on_unauthorized: false,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a query parameter only when the value is present
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }
}

/// Backend call relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub options: RequestOptions,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            options: RequestOptions::default(),
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

/// In-flight call plus its one-shot retry flag
#[derive(Debug)]
struct PendingRequest {
    request: ApiRequest,
    retried: bool,
    token_override: Option<String>,
}

/// Join base URL, path and encoded query
pub fn build_url(base_url: &str, path: &str, query: &[(String, String)]) -> String {
    let mut url = if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    };

    if !query.is_empty() {
        let encoded = query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&encoded);
    }

    url
}

fn to_http_request(base_url: &str, request: &ApiRequest, token: Option<&str>) -> HttpRequest {
    let mut headers = vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ];
    if let Some(token) = token {
        headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
    }

    HttpRequest {
        method: request.method,
        url: build_url(base_url, &request.path, &request.options.query),
        headers,
        body: request.body.as_ref().map(Value::to_string),
    }
}

/// Run one request through the auth pipeline.
///
/// `tokens` is `None` for calls made before any session exists.
pub async fn dispatch(
    transport: &dyn Transport,
    base_url: &str,
    tokens: Option<&dyn TokenSource>,
    request: ApiRequest,
) -> Result<HttpResponse, HttpError> {
    let mut pending = PendingRequest {
        request,
        retried: false,
        token_override: None,
    };

    loop {
        let token = if pending.request.options.authenticate {
            pending
                .token_override
                .clone()
                .or_else(|| tokens.and_then(|t| t.access_token()))
        } else {
            None
        };

        let http_request = to_http_request(base_url, &pending.request, token.as_deref());
        tracing::debug!(
            method = %http_request.method,
            url = %http_request.url,
            retried = pending.retried,
            "Sending request"
        );

        let response = transport.execute(http_request).await?;

        let refreshable = response.status == 401
            && !pending.retried
            && pending.request.options.refresh_on_unauthorized;
        if let (true, Some(tokens)) = (refreshable, tokens) {
            pending.retried = true;
            match tokens.refresh_access_token().await {
                Ok(access) => {
                    tracing::debug!(path = %pending.request.path, "Retrying after token refresh");
                    pending.token_override = Some(access);
                    continue;
                }
                Err(e) => {
                    tracing::warn!(path = %pending.request.path, "Token refresh failed: {}", e);
                    return Err(HttpError::Unauthenticated);
                }
            }
        }

        if !response.is_success() {
            return Err(HttpError::from_status(response.status, &response.body));
        }

        return Ok(response);
    }
}

/// Shared request pipeline bound to a base URL and a token source
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenSource>,
    base_url: String,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            transport,
            tokens,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and return the raw response
    pub async fn send_raw(&self, request: ApiRequest) -> Result<HttpResponse, HttpError> {
        dispatch(
            self.transport.as_ref(),
            &self.base_url,
            Some(self.tokens.as_ref()),
            request,
        )
        .await
    }

    /// Send a request and decode the JSON body
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: RequestOptions,
    ) -> Result<Value, HttpError> {
        let mut request = ApiRequest::new(method, path).options(options);
        request.body = body;
        self.send_raw(request).await?.json()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        self.send_raw(ApiRequest::new(Method::Get, path))
            .await?
            .json()
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, HttpError> {
        self.send_raw(ApiRequest::new(Method::Get, path).options(options))
            .await?
            .json()
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.with_body(Method::Post, path, body).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.with_body(Method::Put, path, body).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.with_body(Method::Patch, path, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, HttpError> {
        self.send_raw(ApiRequest::new(Method::Delete, path))
            .await?
            .json()
    }

    /// GET a binary payload (e.g. a CSV report)
    pub async fn download(&self, path: &str) -> Result<Vec<u8>, HttpError> {
        Ok(self
            .send_raw(ApiRequest::new(Method::Get, path))
            .await?
            .body)
    }

    async fn with_body<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| HttpError::Encode(e.to_string()))?;
        self.send_raw(ApiRequest::new(method, path).body(body))
            .await?
            .json()
    }
}
