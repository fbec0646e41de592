//! Authentication UI: context, forms, guards and the user menu

mod context;
mod login_form;
mod register_form;
mod role_guard;
mod user_menu;

pub use context::{AuthContext, provide_auth_context, use_auth_context};
pub use login_form::LoginForm;
pub use register_form::RegisterForm;
pub use role_guard::{AccessDenied, RoleGuard, render_decision};
pub use user_menu::{UserAvatar, UserMenu};
