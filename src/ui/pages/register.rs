//! Register page component

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::core::routes;
use crate::ui::auth::{RegisterForm, use_auth_context};
use crate::ui::layout::AuthLayout;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth_context();

    // Registration logs the user in, which also lands here
    Effect::new(move |_| {
        if auth.is_authenticated() {
            let navigate = use_navigate();
            navigate(routes::DASHBOARD, Default::default());
        }
    });

    let on_login_click = move |_| {
        let navigate = use_navigate();
        navigate(routes::LOGIN, Default::default());
    };

    view! {
        <AuthLayout>
            <RegisterForm on_login_click=on_login_click />
        </AuthLayout>
    }
}
