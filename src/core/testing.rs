//! Test doubles for the HTTP layer.
//!
//! `MockTransport` replays scripted responses in order and records every
//! request it receives.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::core::error::{RefreshError, TransportError};
use crate::core::http::{ApiClient, HttpRequest, HttpResponse, Method, TokenSource, Transport};

pub const TEST_BASE_URL: &str = "http://backend/api";
pub const TEST_ACCESS_TOKEN: &str = "test-access";

struct Expectation {
    method: Method,
    path: String,
    result: Result<HttpResponse, TransportError>,
}

#[derive(Default)]
pub struct MockTransport {
    expected: Mutex<VecDeque<Expectation>>,
    received: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response for the next request, which must match `method`
    /// and whose URL path must end with `path`
    pub fn push(&self, method: Method, path: &str, response: HttpResponse) {
        self.expected.lock().unwrap().push_back(Expectation {
            method,
            path: path.to_string(),
            result: Ok(response),
        });
    }

    pub fn push_json(&self, method: Method, path: &str, status: u16, body: Value) {
        self.push(method, path, HttpResponse::new(status, body.to_string()));
    }

    pub fn push_error(&self, method: Method, path: &str, error: TransportError) {
        self.expected.lock().unwrap().push_back(Expectation {
            method,
            path: path.to_string(),
            result: Err(error),
        });
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.received.lock().unwrap().clone()
    }

    /// Body of the n-th request parsed as JSON
    pub fn request_json(&self, index: usize) -> Value {
        let requests = self.requests();
        let body = requests[index]
            .body
            .as_deref()
            .expect("request has no body");
        serde_json::from_str(body).expect("request body is not JSON")
    }

    pub fn remaining(&self) -> usize {
        self.expected.lock().unwrap().len()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.received.lock().unwrap().push(request.clone());

        let expectation = self
            .expected
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {} {}", request.method, request.url));

        let path = request.url.split('?').next().unwrap_or_default();
        assert_eq!(
            request.method, expectation.method,
            "wrong method for {}",
            request.url
        );
        assert!(
            path.ends_with(&expectation.path),
            "expected request to {}, got {}",
            expectation.path,
            request.url
        );

        expectation.result
    }
}

/// Token source with a fixed access token that cannot be refreshed
pub struct StaticTokens;

#[async_trait(?Send)]
impl TokenSource for StaticTokens {
    fn access_token(&self) -> Option<String> {
        Some(TEST_ACCESS_TOKEN.to_string())
    }

    async fn refresh_access_token(&self) -> Result<String, RefreshError> {
        Err(RefreshError::MissingToken)
    }
}

/// Client against the mock transport with a fixed bearer token
pub fn api_client(transport: &Arc<MockTransport>) -> ApiClient {
    ApiClient::new(TEST_BASE_URL, transport.clone(), Arc::new(StaticTokens))
}
