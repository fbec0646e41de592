//! Dashboard page
//!
//! Greets the user and links to the screens their roles can open.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::access::visible_entries;
use crate::core::{Role, routes};
use crate::ui::auth::use_auth_context;
use crate::ui::icon::Icon;

fn role_summary(role: Role) -> &'static str {
    match role {
        Role::Admin => "Manage users, classes and school-wide reports",
        Role::Teacher => "Run sessions and mark attendance for your classes",
        Role::Student => "Follow your attendance and download your reports",
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth_context();

    view! {
        {move || auth.user().map(|user| {
            let shortcuts = visible_entries(routes::menu(), Some(&user))
                .into_iter()
                .filter(|entry| entry.path != routes::DASHBOARD)
                .cloned()
                .collect::<Vec<_>>();

            view! {
                <div class="space-y-8">
                    <div>
                        <h1 class="text-3xl font-bold text-gray-900">
                            "Welcome, " {user.display_name()}
                        </h1>
                        <p class="mt-1 text-gray-600">{user.email.clone()}</p>
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        {user.roles.iter().map(|role| view! {
                            <div class="bg-white rounded-xl border border-gray-200 p-5">
                                <p class="text-xs font-semibold uppercase tracking-wide text-blue-600">
                                    {role.as_str()}
                                </p>
                                <p class="mt-2 text-sm text-gray-700">{role_summary(role)}</p>
                            </div>
                        }).collect_view()}
                    </div>

                    <div>
                        <h2 class="text-lg font-semibold text-gray-900 mb-3">"Quick links"</h2>
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-3">
                            {shortcuts.into_iter().map(|entry| view! {
                                <A
                                    href=entry.path
                                    attr:class="flex items-center gap-3 bg-white rounded-lg border border-gray-200 px-4 py-3 hover:border-blue-400 transition-colors"
                                >
                                    <Icon name=entry.icon class="text-blue-600" />
                                    <span class="text-sm font-medium text-gray-800">{entry.label}</span>
                                </A>
                            }).collect_view()}
                        </div>
                    </div>
                </div>
            }
        })}
    }
}
