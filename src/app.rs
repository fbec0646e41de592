use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::path;

use crate::core::{Role, routes};
use crate::ui::DashboardLayout;
use crate::ui::auth::{RoleGuard, provide_auth_context, use_auth_context};
use crate::ui::pages::{
    AdminUsersPage, AnalyticsPage, DashboardPage, LoginPage, MfaSettingsPage, NotFoundPage,
    PlaceholderPage, ProfilePage, RegisterPage,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="stylesheet" href="https://cdn-uicons.flaticon.com/2.6.0/uicons-solid-straight/css/uicons-solid-straight.css"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Sends the user to the login page whenever the session is invalidated
#[component]
fn SessionWatcher() -> impl IntoView {
    let auth = use_auth_context();

    Effect::new(move |previous: Option<u32>| {
        let count = auth.invalidated.get();
        if previous.is_some_and(|previous| previous != count) {
            let navigate = use_navigate();
            navigate(routes::LOGIN, Default::default());
        }
        count
    });
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    provide_auth_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/classroom-portal.css"/>
        <Title text="Attendance Management System"/>

        <Router>
            <SessionWatcher/>
            <Routes fallback=NotFoundPage>
                <Route path=path!("/") view=|| view! { <Redirect path=routes::LOGIN/> }/>
                <Route path=path!("/login") view=LoginPage/>
                <Route path=path!("/register") view=RegisterPage/>
                <ParentRoute path=path!("") view=DashboardLayout>
                    <Route path=path!("/dashboard") view=DashboardPage/>
                    <Route path=path!("/settings/profile") view=ProfilePage/>
                    <Route path=path!("/settings/mfa") view=MfaSettingsPage/>
                    <Route
                        path=path!("/admin/users")
                        view=|| view! {
                            <RoleGuard roles=vec![Role::Admin]>
                                <AdminUsersPage/>
                            </RoleGuard>
                        }
                    />
                    <Route path=path!("/academics/subjects") view=PlaceholderPage/>
                    <Route path=path!("/academics/classes") view=PlaceholderPage/>
                    <Route path=path!("/academics/students") view=PlaceholderPage/>
                    <Route path=path!("/start-session") view=PlaceholderPage/>
                    <Route path=path!("/active-sessions") view=PlaceholderPage/>
                    <Route path=path!("/mark-attendance") view=PlaceholderPage/>
                    <Route path=path!("/session-attendance") view=PlaceholderPage/>
                    <Route path=path!("/analytics") view=AnalyticsPage/>
                    <Route path=path!("/notifications") view=PlaceholderPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
