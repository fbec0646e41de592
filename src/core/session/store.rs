//! Durable persistence of the session under three string keys

use std::sync::Arc;

use super::storage::{Storage, StorageOp};
use super::{Session, TokenPair, UserProfile};
use crate::core::error::StorageError;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// Reads and writes the session fields as a unit
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Reconstruct the persisted session.
    ///
    /// Never fails: unreadable storage, a missing token or a malformed
    /// profile all degrade to absent fields.
    pub fn load(&self) -> Session {
        let values = match self
            .storage
            .read_all(&[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY])
        {
            Ok(values) => values,
            Err(e) => {
                tracing::error!("Failed to read session from storage: {}", e);
                return Session::empty();
            }
        };

        let mut values = values.into_iter();
        let access = values.next().flatten().filter(|t| !t.is_empty());
        let refresh = values.next().flatten().filter(|t| !t.is_empty());
        let user_json = values.next().flatten();

        let (Some(access), Some(refresh)) = (access, refresh) else {
            return Session::empty();
        };

        let user = user_json.and_then(|json| match serde_json::from_str::<UserProfile>(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Discarding malformed cached user profile: {}", e);
                None
            }
        });

        Session::new(TokenPair { access, refresh }, user)
    }

    /// Persist every field of `session` in one batch; absent fields are removed
    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let user_json = session
            .user()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| StorageError::Write {
                key: USER_KEY.to_string(),
                message: e.to_string(),
            })?;

        let mut ops = Vec::with_capacity(3);
        match session.tokens() {
            Some(tokens) => {
                ops.push(StorageOp::Set(ACCESS_TOKEN_KEY, tokens.access.clone()));
                ops.push(StorageOp::Set(REFRESH_TOKEN_KEY, tokens.refresh.clone()));
            }
            None => {
                ops.push(StorageOp::Remove(ACCESS_TOKEN_KEY));
                ops.push(StorageOp::Remove(REFRESH_TOKEN_KEY));
            }
        }
        match user_json {
            Some(json) => ops.push(StorageOp::Set(USER_KEY, json)),
            None => ops.push(StorageOp::Remove(USER_KEY)),
        }

        self.storage.apply(&ops)
    }

    /// Remove all session fields
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.apply(&[
            StorageOp::Remove(ACCESS_TOKEN_KEY),
            StorageOp::Remove(REFRESH_TOKEN_KEY),
            StorageOp::Remove(USER_KEY),
        ])
    }
}
