//! Auth context for the component tree
//!
//! Wraps the [`AuthSessionManager`] and mirrors its state into signals:
//! - `state` follows every manager state change
//! - `invalidated` is bumped when the session is cleared after a failed refresh
//! - `loading`/`error` track the last login or registration attempt
//!
//! Server rendering and the first client render both start in `Loading`, so
//! hydration sees the same markup; the stored session is resolved afterwards.

use std::sync::Arc;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos::task::spawn_local;

use crate::core::http::{ApiClient, default_transport};
#[cfg(feature = "hydrate")]
use crate::core::session::LocalStorage;
#[cfg(not(feature = "hydrate"))]
use crate::core::session::MemoryStorage;
use crate::core::session::Storage;
use crate::core::{
    AuthError, AuthSessionManager, AuthState, Config, LoginOutcome, RegisterRequest, Role,
    SessionEvent, UserProfile,
};

/// Auth context providing authentication state and actions
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    /// A login or registration request is in flight
    pub loading: RwSignal<bool>,
    /// Error message from the last operation
    pub error: RwSignal<Option<String>>,
    /// Incremented each time the session is invalidated
    pub invalidated: RwSignal<u32>,
    manager: StoredValue<Arc<AuthSessionManager>>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.state.with(AuthState::is_authenticated)
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.with(|state| state.user().cloned())
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.state
            .with(|state| state.user().is_some_and(|user| user.has_role(role)))
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.state
            .with(|state| state.user().is_some_and(|user| user.has_any_role(roles)))
    }

    pub fn manager(&self) -> Arc<AuthSessionManager> {
        self.manager.get_value()
    }

    /// Client for feature calls with token refresh
    pub fn api(&self) -> ApiClient {
        self.manager().api()
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    pub async fn login(
        &self,
        email: &str,
        password: &str,
        mfa_code: Option<&str>,
    ) -> Result<LoginOutcome, AuthError> {
        self.loading.set(true);
        self.error.set(None);

        let result = self.manager().login(email, password, mfa_code).await;

        self.loading.set(false);
        if let Err(e) = &result {
            self.error.set(Some(e.to_string()));
        }
        result
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, AuthError> {
        self.loading.set(true);
        self.error.set(None);

        let result = self.manager().register(request).await;

        self.loading.set(false);
        match &result {
            // field errors are shown next to the inputs
            Err(AuthError::Validation(_)) => {}
            Err(e) => self.error.set(Some(e.to_string())),
            Ok(_) => {}
        }
        result
    }

    pub fn cancel_mfa(&self) {
        self.error.set(None);
        self.manager().cancel_mfa();
    }

    pub fn logout(&self) {
        self.error.set(None);
        self.manager().logout();
    }

    /// Re-fetch the profile, e.g. after MFA was toggled
    pub async fn refresh_profile(&self) -> Option<UserProfile> {
        self.manager().refresh_profile().await
    }
}

fn session_storage() -> Arc<dyn Storage> {
    #[cfg(feature = "hydrate")]
    let storage: Arc<dyn Storage> = Arc::new(LocalStorage);
    #[cfg(not(feature = "hydrate"))]
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    storage
}

/// Create the session manager and provide the auth context
pub fn provide_auth_context() -> AuthContext {
    let config = Config::from_env();
    let manager = Arc::new(AuthSessionManager::new(
        &config,
        default_transport(&config),
        session_storage(),
    ));

    let state = RwSignal::new(AuthState::Loading);
    let invalidated = RwSignal::new(0u32);

    manager.subscribe(move |event| match event {
        SessionEvent::StateChanged(next) => {
            // owner may already be disposed
            let _ = state.try_set(next.clone());
        }
        SessionEvent::SessionInvalidated => {
            let _ = invalidated.try_update(|count| *count += 1);
        }
    });

    let ctx = AuthContext {
        state,
        loading: RwSignal::new(false),
        error: RwSignal::new(None),
        invalidated,
        manager: StoredValue::new(manager),
    };

    // Resolve the stored session after hydration (client-side only):
    // show the cached profile right away, then verify it with the backend
    #[cfg(feature = "hydrate")]
    Effect::new(move |_| {
        let manager = ctx.manager();
        if !manager.restore().is_authenticated() {
            return;
        }
        spawn_local(async move {
            let state = manager.initialize().await;
            tracing::debug!(authenticated = state.is_authenticated(), "Session restored");
        });
    });

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}
