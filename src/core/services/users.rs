//! Current user, user administration and role catalogue

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::auth::MfaService;
use crate::core::endpoints;
use crate::core::error::HttpError;
use crate::core::http::ApiClient;
use crate::core::roles::Role;
use crate::core::session::UserProfile;

/// Role as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: serde_json::Value,
    pub name: String,
}

pub struct UsersService<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn me(&self) -> Result<UserProfile, HttpError> {
        self.client.get(endpoints::auth::ME).await
    }

    pub fn mfa(&self) -> MfaService<'a> {
        MfaService::new(self.client)
    }

    /// All users. Admin only; others get 403.
    pub async fn list(&self) -> Result<Vec<UserProfile>, HttpError> {
        self.client.get(endpoints::users::LIST).await
    }

    /// Replace a user's roles
    pub async fn update_roles(
        &self,
        user_id: &str,
        roles: &[Role],
    ) -> Result<UserProfile, HttpError> {
        let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
        self.client
            .patch(&endpoints::users::update_roles(user_id), &json!({ "roles": names }))
            .await
    }

    pub async fn roles(&self) -> Result<Vec<RoleRecord>, HttpError> {
        self.client.get(endpoints::users::ROLES).await
    }
}
