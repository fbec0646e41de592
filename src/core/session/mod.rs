//! Session data model and its durable persistence
//!
//! A [`Session`] bundles the token pair with the cached [`UserProfile`].
//! Tokens are held as a pair, so a session can never carry an access token
//! without its refresh token.

mod storage;
mod store;

use serde::{Deserialize, Serialize};

use crate::core::roles::{Role, RoleSet};

#[cfg(feature = "hydrate")]
pub use storage::LocalStorage;
pub use storage::{MemoryStorage, Storage, StorageOp};
pub use store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SessionStore, USER_KEY};

/// User information from the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub roles: RoleSet,
    #[serde(default)]
    pub mfa_enabled: bool,
}

impl UserProfile {
    /// "First Last", or the email when no name is set
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.roles.contains(*role))
    }

    pub fn has_all_roles(&self, roles: &[Role]) -> bool {
        roles.iter().all(|role| self.roles.contains(*role))
    }
}

/// Access/refresh token pair as issued by the backend
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .finish()
    }
}

/// Tokens plus cached profile of the logged-in user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    tokens: Option<TokenPair>,
    user: Option<UserProfile>,
}

impl Session {
    pub fn new(tokens: TokenPair, user: Option<UserProfile>) -> Self {
        Self {
            tokens: Some(tokens),
            user,
        }
    }

    /// Logged-out session
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_none() && self.user.is_none()
    }

    /// True when both tokens are present
    pub fn has_tokens(&self) -> bool {
        self.tokens.is_some()
    }

    pub fn tokens(&self) -> Option<&TokenPair> {
        self.tokens.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.refresh.as_str())
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Copy with the access token replaced; refresh token and profile kept.
    /// Returns `None` for a session without tokens.
    pub fn with_access_token(&self, access: impl Into<String>) -> Option<Self> {
        let tokens = self.tokens.as_ref()?;
        Some(Self {
            tokens: Some(TokenPair {
                access: access.into(),
                refresh: tokens.refresh.clone(),
            }),
            user: self.user.clone(),
        })
    }

    /// Copy with the cached profile replaced
    pub fn with_user(&self, user: UserProfile) -> Self {
        Self {
            tokens: self.tokens.clone(),
            user: Some(user),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_profile(id: &str, roles: &[Role]) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        email: format!("{id}@school.test"),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        roles: RoleSet::from(roles),
        mfa_enabled: false,
    }
}
