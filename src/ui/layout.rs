//! Authenticated page chrome: navbar, sidebar and the routed content
//!
//! Access to the nested route is decided from the route table for the
//! current path before the page is rendered.

use leptos::prelude::*;
use leptos_router::components::{A, Outlet};
use leptos_router::hooks::use_location;

use crate::core::routes;
use crate::ui::auth::{UserMenu, render_decision, use_auth_context};
use crate::ui::sidebar::Sidebar;

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <header class="h-16 bg-white border-b border-gray-200 flex items-center justify-between px-6">
            <A href=routes::DASHBOARD attr:class="flex items-center gap-3">
                <i class="fi fi-ss-graduation-cap text-2xl text-blue-600"></i>
                <span class="text-xl font-bold text-gray-900">"Attendance"</span>
            </A>
            <UserMenu />
        </header>
    }
}

#[component]
pub fn DashboardLayout() -> impl IntoView {
    let auth = use_auth_context();
    let pathname = use_location().pathname;

    let decision = Memo::new(move |_| {
        let path = pathname.get();
        auth.state
            .with(|state| routes::access_control().decide(&path, state))
    });

    view! {
        <div class="min-h-screen bg-gray-50">
            <Navbar />
            <div class="flex">
                <Sidebar />
                <main class="flex-1 p-8">
                    {move || render_decision(decision.get(), || view! { <Outlet /> }.into_any())}
                </main>
            </div>
        </div>
    }
}

/// Centered card used by the login and register pages
#[component]
pub fn AuthLayout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gradient-to-br from-blue-50 to-indigo-100 flex items-center justify-center p-4">
            <div class="w-full max-w-md bg-white rounded-xl shadow-lg p-8">
                {children()}
            </div>
        </div>
    }
}
