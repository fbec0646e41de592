//! Error types shared by the HTTP client, session store and auth manager

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Network failure, no response was received
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("network error: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure of a backend call
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HttpError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("request failed with status {status}{}", message_suffix(.message))]
    Status {
        status: u16,
        /// Human readable message provided by the backend, if any
        message: Option<String>,
        /// Raw response body
        body: String,
    },

    /// The access token expired and could not be refreshed
    #[error("session expired, please log in again")]
    Unauthenticated,

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid request body: {0}")]
    Encode(String),
}

impl HttpError {
    /// Build a status error from a non-2xx response body
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body).into_owned();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|json| backend_message(&json));
        HttpError::Status {
            status,
            message,
            body,
        }
    }

    /// HTTP status code, if a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            HttpError::Unauthenticated => Some(401),
            _ => None,
        }
    }

    /// Backend-provided message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            HttpError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, HttpError::Unauthenticated)
    }

    /// Body parsed as JSON, if it is JSON
    pub fn json_body(&self) -> Option<Value> {
        match self {
            HttpError::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// Extract the message the backend puts in error payloads
pub fn backend_message(json: &Value) -> Option<String> {
    ["error", "detail", "message"]
        .iter()
        .find_map(|key| json.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Field level validation messages returned by the backend on 400
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Parse a backend error payload.
    ///
    /// Values may be a single string or a list of strings; anything else is
    /// kept in its JSON text form. A non-object payload is stored under
    /// `non_field_errors`.
    pub fn from_json(json: &Value) -> Self {
        let mut errors = Self::new();
        match json {
            Value::Object(map) => {
                for (field, value) in map {
                    match value {
                        Value::String(message) => errors.add(field, message),
                        Value::Array(items) => {
                            for item in items {
                                match item {
                                    Value::String(message) => errors.add(field, message),
                                    other => errors.add(field, other.to_string()),
                                }
                            }
                        }
                        other => errors.add(field, other.to_string()),
                    }
                }
            }
            Value::String(message) => errors.add("non_field_errors", message),
            Value::Null => {}
            other => errors.add("non_field_errors", other.to_string()),
        }
        errors
    }

    /// Messages for one field
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;
                if field == "non_field_errors" {
                    write!(f, "{message}")?;
                } else {
                    write!(f, "{field}: {message}")?;
                }
            }
        }
        Ok(())
    }
}

/// Durable storage failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to write {key}: {message}")]
    Write { key: String, message: String },
}

/// Login or registration failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthError {
    /// Credentials or MFA code rejected
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("unexpected auth response: {0}")]
    InvalidResponse(String),

    #[error("failed to persist session: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Http(#[from] HttpError),
}

/// Access token could not be renewed; the session has been cleared
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RefreshError {
    #[error("no refresh token available")]
    MissingToken,

    #[error("refresh token rejected: {0}")]
    Rejected(HttpError),

    #[error("failed to persist refreshed token: {0}")]
    Storage(#[from] StorageError),
}
