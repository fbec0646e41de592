//! Login page component
//!
//! Redirects to the dashboard once a session is established.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::core::routes;
use crate::ui::auth::{LoginForm, use_auth_context};
use crate::ui::layout::AuthLayout;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_context();

    // Redirect if already authenticated
    Effect::new(move |_| {
        if auth.is_authenticated() {
            let navigate = use_navigate();
            navigate(routes::DASHBOARD, Default::default());
        }
    });

    let on_register_click = move |_| {
        let navigate = use_navigate();
        navigate(routes::REGISTER, Default::default());
    };

    view! {
        <AuthLayout>
            <LoginForm on_register_click=on_register_click />
        </AuthLayout>
    }
}
