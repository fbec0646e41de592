//! Authenticator-app (TOTP) enrollment
//!
//! Setup returns a secret and a provisioning URI to render as a QR code;
//! the first valid code turns MFA on. Callers refresh the cached profile
//! afterwards so `mfa_enabled` reflects the change.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::endpoints;
use crate::core::error::HttpError;
use crate::core::http::ApiClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaSetup {
    pub secret: String,
    pub provisioning_uri: String,
}

/// Confirmation returned by verify and disable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfaStatus {
    #[serde(default)]
    pub message: String,
}

pub struct MfaService<'a> {
    client: &'a ApiClient,
}

impl<'a> MfaService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Generate a new secret. Fails with 400 when MFA is already on.
    pub async fn setup(&self) -> Result<MfaSetup, HttpError> {
        self.client.get(endpoints::auth::MFA_SETUP).await
    }

    pub async fn verify(&self, code: &str) -> Result<MfaStatus, HttpError> {
        self.client
            .post(endpoints::auth::MFA_VERIFY, &json!({ "token": code.trim() }))
            .await
    }

    pub async fn disable(&self) -> Result<MfaStatus, HttpError> {
        self.client
            .post(endpoints::auth::MFA_DISABLE, &json!({}))
            .await
    }
}
