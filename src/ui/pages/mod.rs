//! Application pages
//!
//! Feature screens without a dedicated page render [`PlaceholderPage`].

mod admin_users;
mod analytics;
mod dashboard;
mod login;
mod mfa_settings;
mod not_found;
mod placeholder;
mod profile;
mod register;

pub use admin_users::AdminUsersPage;
pub use analytics::AnalyticsPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use mfa_settings::MfaSettingsPage;
pub use not_found::NotFoundPage;
pub use placeholder::PlaceholderPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
