//! Gate that renders its children only for permitted users

use leptos::prelude::*;
use leptos_router::components::{A, Redirect};

use super::context::use_auth_context;
use crate::core::Role;
use crate::core::access::{AccessDecision, RouteAccessRule, check_access};
use crate::core::routes;
use crate::ui::common::LoadingScreen;

/// Shown when the user is logged in but lacks the required roles
#[component]
pub fn AccessDenied() -> impl IntoView {
    view! {
        <div class="flex flex-col justify-center items-center h-96 gap-4">
            <h2 class="text-2xl font-bold text-gray-900">"Access Denied"</h2>
            <p class="text-gray-600">"You don't have permission to access this page."</p>
            <A
                href=routes::DASHBOARD
                attr:class="px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white rounded-lg"
            >
                "Back to dashboard"
            </A>
        </div>
    }
}

/// View for one access decision; `granted` renders the protected content
pub fn render_decision(decision: AccessDecision, granted: impl FnOnce() -> AnyView) -> AnyView {
    match decision {
        AccessDecision::Pending => view! { <LoadingScreen /> }.into_any(),
        AccessDecision::RedirectToLogin => view! { <Redirect path=routes::LOGIN /> }.into_any(),
        AccessDecision::Denied => view! { <AccessDenied /> }.into_any(),
        AccessDecision::Granted => granted(),
    }
}

/// Role-restricted section
#[component]
pub fn RoleGuard(
    /// Allowed roles
    roles: Vec<Role>,
    /// Require every role instead of any one of them
    #[prop(default = false)]
    require_all: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth_context();
    let rule = if require_all {
        RouteAccessRule::all(&roles)
    } else {
        RouteAccessRule::any(&roles)
    };
    let decision = Memo::new(move |_| auth.state.with(|state| check_access(state, Some(&rule))));

    move || render_decision(decision.get(), || children().into_any())
}
