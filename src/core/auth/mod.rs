//! Authentication: session lifecycle and second-factor management
//!
//! - [`AuthSessionManager`] owns the session and the auth state machine
//! - [`mfa`] wraps the authenticator setup endpoints for the settings page

mod manager;
pub mod mfa;

pub use manager::{AuthSessionManager, AuthState, LoginOutcome, RegisterRequest, SessionEvent};
pub use mfa::{MfaService, MfaSetup, MfaStatus};
