//! Auth session manager
//!
//! The only component that mutates the [`Session`]. Everything else gets
//! clones (read-only views) or observes [`SessionEvent`]s.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::core::config::Config;
use crate::core::endpoints;
use crate::core::error::{AuthError, HttpError, RefreshError, StorageError, ValidationErrors};
use crate::core::http::{
    ApiClient, ApiRequest, HttpResponse, Method, RequestOptions, TokenSource, Transport, dispatch,
};
use crate::core::roles::Role;
use crate::core::session::{Session, SessionStore, Storage, TokenPair, UserProfile};

/// Authentication state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Initial state, stored session not resolved yet
    #[default]
    Loading,
    /// No user is logged in
    Unauthenticated,
    /// Login or registration in flight
    Authenticating,
    /// Credentials accepted, second factor required before tokens are issued
    MfaPending { email: String },
    /// Tokens and profile present
    Authenticated(UserProfile),
}

impl AuthState {
    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// True while the outcome of a restore or login is still unknown
    pub fn is_resolving(&self) -> bool {
        matches!(self, AuthState::Loading | AuthState::Authenticating)
    }
}

/// Result of a successful login call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Call `login` again with the MFA code
    MfaRequired,
    Success(UserProfile),
}

/// Notification sent to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    StateChanged(AuthState),
    /// The access token expired and could not be renewed; the UI should
    /// send the user to the login page
    SessionInvalidated,
}

/// Registration form fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    mfa_required: bool,
    tokens: Option<TokenPair>,
    user: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    tokens: TokenPair,
    user: UserProfile,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the session and drives login, registration, refresh and logout
pub struct AuthSessionManager {
    transport: Arc<dyn Transport>,
    base_url: String,
    store: SessionStore,
    session: RwLock<Session>,
    state: RwLock<AuthState>,
    listeners: RwLock<Vec<Listener>>,
}

impl AuthSessionManager {
    pub fn new(config: &Config, transport: Arc<dyn Transport>, storage: Arc<dyn Storage>) -> Self {
        Self {
            transport,
            base_url: config.api_url.clone(),
            store: SessionStore::new(storage),
            session: RwLock::new(Session::empty()),
            state: RwLock::new(AuthState::Loading),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Client for feature calls, using this manager as token source
    pub fn api(self: &Arc<Self>) -> ApiClient {
        ApiClient::new(self.base_url.clone(), self.transport.clone(), self.clone())
    }

    /// Register an observer for state changes and invalidation
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        write(&self.listeners).push(Arc::new(listener));
    }

    pub fn state(&self) -> AuthState {
        read(&self.state).clone()
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Session {
        read(&self.session).clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        read(&self.session).user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// Load the stored session without contacting the backend
    pub fn restore(&self) -> AuthState {
        let session = self.store.load();
        let state = match session.user() {
            Some(user) if session.has_tokens() => AuthState::Authenticated(user.clone()),
            _ => AuthState::Unauthenticated,
        };
        *write(&self.session) = session;
        self.set_state(state.clone());
        state
    }

    /// Load the stored session and verify it against `/users/me/`.
    ///
    /// A session the backend does not accept is cleared.
    pub async fn initialize(&self) -> AuthState {
        let session = self.store.load();
        if !session.has_tokens() {
            *write(&self.session) = Session::empty();
            self.set_state(AuthState::Unauthenticated);
            return AuthState::Unauthenticated;
        }
        *write(&self.session) = session;

        match self.fetch_profile().await {
            Ok(user) => self.update_profile(user),
            // refresh already cleared the session
            Err(e) if e.is_unauthenticated() => {}
            Err(e) => {
                tracing::warn!("Stored session could not be verified: {}", e);
                self.logout();
            }
        }
        self.state()
    }

    /// Log in with email and password, optionally with an MFA code
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        mfa_code: Option<&str>,
    ) -> Result<LoginOutcome, AuthError> {
        let mfa_code = mfa_code.map(str::trim).filter(|code| !code.is_empty());
        let fallback = match (self.state(), mfa_code) {
            // the existing session stays valid when a new login fails
            (previous @ AuthState::Authenticated(_), _) => previous,
            (_, Some(_)) => AuthState::MfaPending {
                email: email.to_string(),
            },
            (_, None) => AuthState::Unauthenticated,
        };

        let mut body = json!({ "email": email, "password": password });
        if let Some(code) = mfa_code {
            body["mfa_token"] = Value::from(code);
        }

        self.set_state(AuthState::Authenticating);

        let response = match self
            .post_anonymous(endpoints::auth::LOGIN, body)
            .await
            .and_then(|r| r.json::<LoginResponse>())
        {
            Ok(response) => response,
            Err(e) => {
                self.set_state(fallback);
                return Err(login_error(e));
            }
        };

        if response.mfa_required {
            tracing::info!("Second factor required for login");
            self.set_state(AuthState::MfaPending {
                email: email.to_string(),
            });
            return Ok(LoginOutcome::MfaRequired);
        }

        let (Some(tokens), Some(user)) = (response.tokens, response.user) else {
            self.set_state(fallback);
            return Err(AuthError::InvalidResponse(
                "login response has neither tokens nor mfa_required".to_string(),
            ));
        };

        self.establish(tokens, user.clone())?;
        tracing::info!(user_id = %user.id, "Logged in");
        Ok(LoginOutcome::Success(user))
    }

    /// Abandon a pending second-factor step
    pub fn cancel_mfa(&self) {
        if matches!(self.state(), AuthState::MfaPending { .. }) {
            self.set_state(AuthState::Unauthenticated);
        }
    }

    /// Create an account; on success the user is logged in
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, AuthError> {
        let body = serde_json::to_value(request).map_err(|e| HttpError::Encode(e.to_string()))?;
        let fallback = match self.state() {
            previous @ AuthState::Authenticated(_) => previous,
            _ => AuthState::Unauthenticated,
        };

        self.set_state(AuthState::Authenticating);

        match self
            .post_anonymous(endpoints::auth::REGISTER, body)
            .await
            .and_then(|r| r.json::<AuthResponse>())
        {
            Ok(AuthResponse { tokens, user }) => {
                self.establish(tokens, user.clone())?;
                tracing::info!(user_id = %user.id, "Registered and logged in");
                Ok(user)
            }
            Err(e) => {
                self.set_state(fallback);
                Err(register_error(e))
            }
        }
    }

    /// Clear the session. Safe to call repeatedly.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!("Failed to clear stored session: {}", e);
        }
        *write(&self.session) = Session::empty();
        self.set_state(AuthState::Unauthenticated);
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Only the access token changes. Any failure clears the session and
    /// emits [`SessionEvent::SessionInvalidated`].
    pub async fn refresh(&self) -> Result<String, RefreshError> {
        let Some(refresh_token) = read(&self.session).refresh_token().map(str::to_string) else {
            self.invalidate("no refresh token");
            return Err(RefreshError::MissingToken);
        };

        tracing::info!("Refreshing access token");
        let access = match self
            .post_anonymous(
                endpoints::auth::TOKEN_REFRESH,
                json!({ "refresh": refresh_token }),
            )
            .await
            .and_then(|r| r.json::<RefreshResponse>())
        {
            Ok(response) => response.access,
            Err(e) => {
                self.invalidate("refresh token rejected");
                return Err(RefreshError::Rejected(e));
            }
        };

        let outcome = {
            let mut session = write(&self.session);
            if session.refresh_token() == Some(refresh_token.as_str()) {
                match session.with_access_token(access.clone()) {
                    Some(updated) => match self.store.save(&updated) {
                        Ok(()) => {
                            *session = updated;
                            Ok(access)
                        }
                        Err(e) => Err(RefreshError::Storage(e)),
                    },
                    None => Err(RefreshError::MissingToken),
                }
            } else {
                // Logged out or logged in again while the refresh was in flight
                tracing::debug!("Session changed during refresh, discarding new token");
                session
                    .access_token()
                    .map(str::to_string)
                    .ok_or(RefreshError::MissingToken)
            }
        };

        if let Err(RefreshError::Storage(e)) = &outcome {
            tracing::error!("Failed to persist refreshed token: {}", e);
            self.invalidate("refreshed token could not be stored");
        }
        outcome
    }

    /// Re-fetch the current user's profile.
    ///
    /// Best effort: failures are logged and leave the auth state alone.
    pub async fn refresh_profile(&self) -> Option<UserProfile> {
        match self.fetch_profile().await {
            Ok(user) => {
                self.update_profile(user.clone());
                Some(user)
            }
            Err(e) => {
                tracing::warn!("Failed to refresh user profile: {}", e);
                None
            }
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        read(&self.session)
            .user()
            .is_some_and(|user| user.has_role(role))
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        read(&self.session)
            .user()
            .is_some_and(|user| user.has_any_role(roles))
    }

    pub fn has_all_roles(&self, roles: &[Role]) -> bool {
        read(&self.session)
            .user()
            .is_some_and(|user| user.has_all_roles(roles))
    }

    async fn post_anonymous(&self, path: &str, body: Value) -> Result<HttpResponse, HttpError> {
        let request = ApiRequest::new(Method::Post, path)
            .body(body)
            .options(RequestOptions::anonymous());
        dispatch(self.transport.as_ref(), &self.base_url, None, request).await
    }

    async fn fetch_profile(&self) -> Result<UserProfile, HttpError> {
        let request = ApiRequest::new(Method::Get, endpoints::auth::ME);
        dispatch(
            self.transport.as_ref(),
            &self.base_url,
            Some(self as &dyn TokenSource),
            request,
        )
        .await?
        .json()
    }

    fn establish(&self, tokens: TokenPair, user: UserProfile) -> Result<(), StorageError> {
        let session = Session::new(tokens, Some(user.clone()));
        if let Err(e) = self.store.save(&session) {
            tracing::error!("Failed to persist session: {}", e);
            self.logout();
            return Err(e);
        }
        *write(&self.session) = session;
        self.set_state(AuthState::Authenticated(user));
        Ok(())
    }

    fn update_profile(&self, user: UserProfile) {
        let updated = {
            let mut session = write(&self.session);
            if !session.has_tokens() {
                return;
            }
            *session = session.with_user(user.clone());
            session.clone()
        };
        if let Err(e) = self.store.save(&updated) {
            tracing::error!("Failed to persist refreshed profile: {}", e);
        }
        self.set_state(AuthState::Authenticated(user));
    }

    fn invalidate(&self, reason: &str) {
        tracing::warn!("Session invalidated: {}", reason);
        if let Err(e) = self.store.clear() {
            tracing::error!("Failed to clear stored session: {}", e);
        }
        *write(&self.session) = Session::empty();
        self.set_state(AuthState::Unauthenticated);
        self.emit(&SessionEvent::SessionInvalidated);
    }

    fn set_state(&self, state: AuthState) {
        *write(&self.state) = state.clone();
        self.emit(&SessionEvent::StateChanged(state));
    }

    fn emit(&self, event: &SessionEvent) {
        let listeners: Vec<Listener> = read(&self.listeners).clone();
        for listener in listeners {
            listener(event);
        }
    }
}

#[async_trait(?Send)]
impl TokenSource for AuthSessionManager {
    fn access_token(&self) -> Option<String> {
        read(&self.session).access_token().map(str::to_string)
    }

    async fn refresh_access_token(&self) -> Result<String, RefreshError> {
        self.refresh().await
    }
}

fn login_error(error: HttpError) -> AuthError {
    match error {
        HttpError::Status { message, .. } => {
            AuthError::Rejected(message.unwrap_or_else(|| "Login failed".to_string()))
        }
        other => AuthError::Http(other),
    }
}

fn register_error(error: HttpError) -> AuthError {
    if !matches!(error, HttpError::Status { .. }) {
        return AuthError::Http(error);
    }
    if error.status() == Some(400) {
        let errors = ValidationErrors::from_json(&error.json_body().unwrap_or(Value::Null));
        if !errors.is_empty() {
            return AuthError::Validation(errors);
        }
    }
    AuthError::Rejected(
        error
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| "Registration failed".to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TransportError;
    use crate::core::session::{ACCESS_TOKEN_KEY, MemoryStorage, USER_KEY, test_profile};
    use crate::core::testing::MockTransport;
    use std::sync::Mutex;

    struct Harness {
        manager: Arc<AuthSessionManager>,
        transport: Arc<MockTransport>,
        storage: Arc<MemoryStorage>,
        events: Arc<Mutex<Vec<SessionEvent>>>,
    }

    impl Harness {
        fn new() -> Self {
            let transport = MockTransport::new();
            let storage = Arc::new(MemoryStorage::new());
            let config = Config::default().with_api_url("http://backend/api");
            let manager = Arc::new(AuthSessionManager::new(
                &config,
                transport.clone(),
                storage.clone(),
            ));
            let events = Arc::new(Mutex::new(Vec::new()));
            let sink = events.clone();
            manager.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
            Self {
                manager,
                transport,
                storage,
                events,
            }
        }

        /// Harness with an already persisted session
        fn logged_in(roles: &[Role]) -> Self {
            let harness = Self::new();
            let session = Session::new(
                TokenPair {
                    access: "access-1".to_string(),
                    refresh: "refresh-1".to_string(),
                },
                Some(test_profile("u1", roles)),
            );
            SessionStore::new(harness.storage.clone())
                .save(&session)
                .unwrap();
            harness.manager.restore();
            harness
        }

        fn stored(&self) -> Session {
            SessionStore::new(self.storage.clone()).load()
        }

        fn events(&self) -> Vec<SessionEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    fn user_json(roles: &[&str]) -> Value {
        json!({
            "id": "u1",
            "email": "t@x.com",
            "first_name": "Tess",
            "last_name": "Ng",
            "roles": roles,
            "mfa_enabled": true
        })
    }

    fn auth_json(roles: &[&str]) -> Value {
        json!({
            "tokens": { "access": "access-1", "refresh": "refresh-1" },
            "user": user_json(roles)
        })
    }

    #[test]
    fn test_initial_state_is_loading() {
        let harness = Harness::new();
        assert_eq!(harness.manager.state(), AuthState::Loading);
    }

    #[tokio::test]
    async fn test_login_success_persists_tokens() {
        let h = Harness::new();
        h.transport
            .push_json(Method::Post, "/users/login/", 200, auth_json(&["TEACHER"]));

        let outcome = h.manager.login("t@x.com", "secret1", None).await.unwrap();

        let LoginOutcome::Success(user) = outcome else {
            panic!("expected success, got {:?}", outcome);
        };
        assert!(user.has_role(Role::Teacher));
        assert!(h.manager.is_authenticated());
        assert_eq!(h.stored().access_token(), Some("access-1"));
        assert_eq!(h.stored().refresh_token(), Some("refresh-1"));
        assert_eq!(h.stored().user(), Some(&user));

        let body = h.transport.request_json(0);
        assert_eq!(body, json!({"email": "t@x.com", "password": "secret1"}));
        assert_eq!(h.transport.requests()[0].header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_login_with_mfa_two_steps() {
        let h = Harness::new();
        h.transport.push_json(
            Method::Post,
            "/users/login/",
            200,
            json!({"mfa_required": true}),
        );
        h.transport
            .push_json(Method::Post, "/users/login/", 200, auth_json(&["TEACHER"]));

        let first = h.manager.login("t@x.com", "secret1", None).await.unwrap();

        assert_eq!(first, LoginOutcome::MfaRequired);
        assert_eq!(
            h.manager.state(),
            AuthState::MfaPending {
                email: "t@x.com".to_string()
            }
        );
        assert!(h.stored().is_empty());

        let second = h
            .manager
            .login("t@x.com", "secret1", Some("123456"))
            .await
            .unwrap();

        assert!(matches!(second, LoginOutcome::Success(_)));
        assert_eq!(h.transport.request_json(1)["mfa_token"], "123456");
        assert_eq!(h.stored().access_token(), Some("access-1"));
        assert_eq!(h.stored().refresh_token(), Some("refresh-1"));
        assert!(h.manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_bad_credentials() {
        let h = Harness::new();
        h.transport.push_json(
            Method::Post,
            "/users/login/",
            401,
            json!({"error": "Invalid credentials"}),
        );

        let err = h.manager.login("t@x.com", "wrong", None).await.unwrap_err();

        assert_eq!(err, AuthError::Rejected("Invalid credentials".to_string()));
        assert_eq!(h.manager.state(), AuthState::Unauthenticated);
        // a rejected login never triggers a token refresh
        assert_eq!(h.transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_login_without_backend_message_uses_default() {
        let h = Harness::new();
        h.transport
            .push(Method::Post, "/users/login/", HttpResponse::new(500, "oops"));

        let err = h.manager.login("t@x.com", "pw", None).await.unwrap_err();

        assert_eq!(err, AuthError::Rejected("Login failed".to_string()));
    }

    #[tokio::test]
    async fn test_rejected_mfa_code_stays_pending() {
        let h = Harness::new();
        h.transport.push_json(
            Method::Post,
            "/users/login/",
            401,
            json!({"error": "Invalid MFA token"}),
        );

        let err = h
            .manager
            .login("t@x.com", "secret1", Some("000000"))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::Rejected("Invalid MFA token".to_string()));
        assert!(matches!(h.manager.state(), AuthState::MfaPending { .. }));

        h.manager.cancel_mfa();
        assert_eq!(h.manager.state(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_login_transport_failure() {
        let h = Harness::new();
        h.transport.push_error(
            Method::Post,
            "/users/login/",
            TransportError::new("connection refused"),
        );

        let err = h.manager.login("t@x.com", "pw", None).await.unwrap_err();

        assert!(matches!(err, AuthError::Http(HttpError::Transport(_))));
        assert_eq!(h.manager.state(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_login_passes_through_authenticating() {
        let h = Harness::new();
        h.transport
            .push_json(Method::Post, "/users/login/", 200, auth_json(&["STUDENT"]));

        h.manager.login("t@x.com", "pw", None).await.unwrap();

        let events = h.events();
        assert_eq!(
            events[0],
            SessionEvent::StateChanged(AuthState::Authenticating)
        );
        assert!(matches!(
            events.last(),
            Some(SessionEvent::StateChanged(AuthState::Authenticated(_)))
        ));
    }

    #[tokio::test]
    async fn test_register_logs_in() {
        let h = Harness::new();
        h.transport.push_json(
            Method::Post,
            "/users/register/",
            201,
            auth_json(&["STUDENT"]),
        );
        let request = RegisterRequest {
            email: "t@x.com".to_string(),
            password: "secret123".to_string(),
            password_confirm: "secret123".to_string(),
            first_name: "Tess".to_string(),
            last_name: "Ng".to_string(),
        };

        let user = h.manager.register(&request).await.unwrap();

        assert!(user.has_role(Role::Student));
        assert!(h.manager.is_authenticated());
        assert_eq!(h.stored().access_token(), Some("access-1"));
        assert_eq!(h.transport.request_json(0)["password_confirm"], "secret123");
    }

    #[tokio::test]
    async fn test_register_validation_errors() {
        let h = Harness::new();
        h.transport.push_json(
            Method::Post,
            "/users/register/",
            400,
            json!({
                "email": ["user with this email already exists."],
                "non_field_errors": ["Passwords don't match"]
            }),
        );

        let err = h
            .manager
            .register(&RegisterRequest::default())
            .await
            .unwrap_err();

        let AuthError::Validation(errors) = err else {
            panic!("expected validation error, got {:?}", err);
        };
        assert_eq!(
            errors.field("email"),
            ["user with this email already exists."]
        );
        assert_eq!(errors.field("non_field_errors"), ["Passwords don't match"]);
        assert_eq!(h.manager.state(), AuthState::Unauthenticated);
        assert!(h.stored().is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_existing_session() {
        let h = Harness::logged_in(&[Role::Admin]);
        h.transport.push_json(
            Method::Post,
            "/users/login/",
            401,
            json!({"error": "Invalid credentials"}),
        );

        h.manager.login("x@y.com", "bad", None).await.unwrap_err();

        assert!(h.manager.is_authenticated());
        assert_eq!(h.manager.state().user(), h.manager.user().as_ref());
        assert!(h.manager.has_role(Role::Admin));
        assert_eq!(h.stored().access_token(), Some("access-1"));
    }

    #[tokio::test]
    async fn test_failed_register_keeps_existing_session() {
        let h = Harness::logged_in(&[Role::Teacher]);
        h.transport.push_error(
            Method::Post,
            "/users/register/",
            TransportError::new("connection refused"),
        );

        h.manager
            .register(&RegisterRequest::default())
            .await
            .unwrap_err();

        assert!(h.manager.is_authenticated());
        assert_eq!(h.manager.session().access_token(), Some("access-1"));
        assert_eq!(h.stored().access_token(), Some("access-1"));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let h = Harness::logged_in(&[Role::Teacher]);

        h.manager.logout();
        assert!(h.stored().is_empty());
        assert!(h.manager.session().is_empty());

        h.manager.logout();
        assert!(h.stored().is_empty());
        assert_eq!(h.manager.state(), AuthState::Unauthenticated);
    }

    #[test]
    fn test_restore_from_storage() {
        let h = Harness::logged_in(&[Role::Admin]);

        assert!(h.manager.is_authenticated());
        assert_eq!(h.manager.session().access_token(), Some("access-1"));
        assert!(h.manager.has_role(Role::Admin));
    }

    #[test]
    fn test_restore_empty_storage() {
        let h = Harness::new();
        assert_eq!(h.manager.restore(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_refresh_updates_only_access_token() {
        let h = Harness::logged_in(&[Role::Teacher]);
        h.transport.push_json(
            Method::Post,
            "/users/token/refresh/",
            200,
            json!({"access": "access-2", "refresh": "rotated"}),
        );

        let access = h.manager.refresh().await.unwrap();

        assert_eq!(access, "access-2");
        assert_eq!(h.transport.request_json(0), json!({"refresh": "refresh-1"}));
        let stored = h.stored();
        assert_eq!(stored.access_token(), Some("access-2"));
        assert_eq!(stored.refresh_token(), Some("refresh-1"));
        assert_eq!(stored.user(), h.manager.session().user());
        assert!(h.manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_refresh_rejected_clears_session() {
        let h = Harness::logged_in(&[Role::Teacher]);
        h.transport.push_json(
            Method::Post,
            "/users/token/refresh/",
            401,
            json!({"detail": "Token is invalid or expired"}),
        );

        let err = h.manager.refresh().await.unwrap_err();

        assert!(matches!(err, RefreshError::Rejected(_)));
        assert!(h.stored().is_empty());
        assert_eq!(h.stored().access_token(), None);
        assert_eq!(h.stored().user(), None);
        assert_eq!(h.manager.state(), AuthState::Unauthenticated);
        assert!(h.events().contains(&SessionEvent::SessionInvalidated));
    }

    #[tokio::test]
    async fn test_refresh_without_token() {
        let h = Harness::new();
        h.manager.restore();

        let err = h.manager.refresh().await.unwrap_err();

        assert_eq!(err, RefreshError::MissingToken);
        assert!(h.transport.requests().is_empty());
        assert!(h.events().contains(&SessionEvent::SessionInvalidated));
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed_transparently() {
        let h = Harness::logged_in(&[Role::Teacher]);
        h.transport
            .push_json(Method::Get, "/classes/subjects/", 401, json!({}));
        h.transport.push_json(
            Method::Post,
            "/users/token/refresh/",
            200,
            json!({"access": "newtoken"}),
        );
        h.transport.push_json(
            Method::Get,
            "/classes/subjects/",
            200,
            json!([{"id": "s1", "name": "Physics", "code": "PHY101"}]),
        );

        let subjects: Value = h.manager.api().get("/classes/subjects/").await.unwrap();

        assert_eq!(subjects[0]["code"], "PHY101");
        let requests = h.transport.requests();
        assert_eq!(requests[0].bearer_token(), Some("access-1"));
        assert_eq!(requests[1].header("Authorization"), None);
        assert_eq!(h.transport.request_json(1), json!({"refresh": "refresh-1"}));
        assert_eq!(requests[2].bearer_token(), Some("newtoken"));
        assert_eq!(h.stored().access_token(), Some("newtoken"));
    }

    #[tokio::test]
    async fn test_failed_refresh_during_request_logs_out() {
        let h = Harness::logged_in(&[Role::Teacher]);
        h.transport
            .push_json(Method::Get, "/classes/classes/", 401, json!({}));
        h.transport
            .push_json(Method::Post, "/users/token/refresh/", 401, json!({}));

        let err = h
            .manager
            .api()
            .get::<Value>("/classes/classes/")
            .await
            .unwrap_err();

        assert_eq!(err, HttpError::Unauthenticated);
        assert!(h.stored().is_empty());
        assert!(h.events().contains(&SessionEvent::SessionInvalidated));
        assert_eq!(h.transport.remaining(), 0);
    }

    #[tokio::test]
    async fn test_refresh_profile_updates_cache() {
        let h = Harness::logged_in(&[Role::Teacher]);
        h.transport
            .push_json(Method::Get, "/users/me/", 200, user_json(&["TEACHER", "ADMIN"]));

        let user = h.manager.refresh_profile().await.unwrap();

        assert!(user.mfa_enabled);
        assert!(h.manager.has_role(Role::Admin));
        let cached = h.storage.get_item(USER_KEY).unwrap().unwrap();
        assert!(cached.contains("ADMIN"));
        assert_eq!(h.stored().access_token(), Some("access-1"));
    }

    #[tokio::test]
    async fn test_refresh_profile_failure_is_swallowed() {
        let h = Harness::logged_in(&[Role::Teacher]);
        h.transport.push_json(
            Method::Get,
            "/users/me/",
            500,
            json!({"detail": "server error"}),
        );

        assert!(h.manager.refresh_profile().await.is_none());
        assert!(h.manager.is_authenticated());
        assert!(h.manager.has_role(Role::Teacher));
    }

    #[tokio::test]
    async fn test_initialize_verifies_stored_session() {
        let h = Harness::logged_in(&[Role::Teacher]);
        h.transport
            .push_json(Method::Get, "/users/me/", 200, user_json(&["TEACHER"]));

        let state = h.manager.initialize().await;

        assert!(state.is_authenticated());
        assert_eq!(h.transport.requests()[0].bearer_token(), Some("access-1"));
    }

    #[tokio::test]
    async fn test_initialize_clears_rejected_session() {
        let h = Harness::logged_in(&[Role::Teacher]);
        h.transport.push_error(
            Method::Get,
            "/users/me/",
            TransportError::new("offline"),
        );

        let state = h.manager.initialize().await;

        assert_eq!(state, AuthState::Unauthenticated);
        assert!(h.stored().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_with_expired_session_invalidates_once() {
        let h = Harness::logged_in(&[Role::Teacher]);
        h.transport
            .push_json(Method::Get, "/users/me/", 401, json!({"detail": "expired"}));
        h.transport.push_json(
            Method::Post,
            "/users/token/refresh/",
            401,
            json!({"detail": "Token is invalid or expired"}),
        );

        let state = h.manager.initialize().await;

        assert_eq!(state, AuthState::Unauthenticated);
        assert!(h.stored().is_empty());
        let events = h.events();
        let count = |wanted: SessionEvent| events.iter().filter(|e| **e == wanted).count();
        assert_eq!(count(SessionEvent::SessionInvalidated), 1);
        assert_eq!(count(SessionEvent::StateChanged(AuthState::Unauthenticated)), 1);
    }

    #[tokio::test]
    async fn test_initialize_without_session_makes_no_requests() {
        let h = Harness::new();

        assert_eq!(h.manager.initialize().await, AuthState::Unauthenticated);
        assert!(h.transport.requests().is_empty());
    }

    /// Runs a hook while a request is in flight
    struct InterruptingTransport {
        hook: Mutex<Option<Box<dyn FnOnce() + Send>>>,
        response: HttpResponse,
    }

    #[async_trait(?Send)]
    impl Transport for InterruptingTransport {
        async fn execute(
            &self,
            _request: crate::core::http::HttpRequest,
        ) -> Result<HttpResponse, TransportError> {
            if let Some(hook) = self.hook.lock().unwrap().take() {
                hook();
            }
            Ok(self.response.clone())
        }
    }

    #[tokio::test]
    async fn test_logout_during_refresh_does_not_resurrect_session() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store
            .save(&Session::new(
                TokenPair {
                    access: "access-1".to_string(),
                    refresh: "refresh-1".to_string(),
                },
                Some(test_profile("u1", &[Role::Teacher])),
            ))
            .unwrap();
        let transport = Arc::new(InterruptingTransport {
            hook: Mutex::new(None),
            response: HttpResponse::new(200, json!({"access": "late"}).to_string()),
        });
        let manager = Arc::new(AuthSessionManager::new(
            &Config::default(),
            transport.clone(),
            storage.clone(),
        ));
        manager.restore();
        let during = manager.clone();
        *transport.hook.lock().unwrap() = Some(Box::new(move || during.logout()));

        let result = manager.refresh().await;

        assert_eq!(result, Err(RefreshError::MissingToken));
        assert!(store.load().is_empty());
        assert_eq!(storage.get_item(ACCESS_TOKEN_KEY).unwrap(), None);
        assert_eq!(manager.state(), AuthState::Unauthenticated);
    }

    #[test]
    fn test_role_predicates_without_user() {
        let h = Harness::new();

        assert!(!h.manager.has_role(Role::Admin));
        assert!(!h.manager.has_any_role(&[Role::Admin]));
        assert!(!h.manager.has_all_roles(&[]));
    }

    #[test]
    fn test_has_any_role_by_profile() {
        let teacher_student = Harness::logged_in(&[Role::Teacher, Role::Student]);
        assert!(!teacher_student.manager.has_any_role(&[Role::Admin]));

        let admin = Harness::logged_in(&[Role::Admin]);
        assert!(admin.manager.has_any_role(&[Role::Admin]));
    }
}
