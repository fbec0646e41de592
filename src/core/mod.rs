//! Framework-free client core: HTTP pipeline, session persistence,
//! authentication state and role-based access control

pub mod access;
pub mod auth;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod roles;
pub mod routes;
pub mod services;
pub mod session;
#[cfg(test)]
pub mod testing;

pub use access::{
    AccessControl, AccessDecision, MatchPolicy, MenuEntry, PathPattern, RouteAccessRule,
};
pub use auth::{AuthSessionManager, AuthState, LoginOutcome, RegisterRequest, SessionEvent};
pub use config::Config;
pub use error::{AuthError, HttpError, RefreshError, StorageError, TransportError, ValidationErrors};
pub use roles::{Role, RoleSet};
pub use session::{Session, SessionStore, TokenPair, UserProfile};
