//! Profile settings page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::core::routes;
use crate::ui::auth::{UserAvatar, use_auth_context};
use crate::ui::common::{ErrorMessage, SuccessMessage};
use crate::ui::icon::{Icon, icons};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth_context();
    let refreshing = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);

    let on_refresh = move |_| {
        refreshing.set(true);
        error.set(None);
        success.set(None);
        spawn_local(async move {
            match auth.refresh_profile().await {
                Some(_) => success.set(Some("Profile reloaded".to_string())),
                None => error.set(Some("Could not reload your profile".to_string())),
            }
            refreshing.set(false);
        });
    };

    view! {
        <div class="max-w-2xl space-y-6">
            <h1 class="text-2xl font-bold text-gray-900">"Profile"</h1>
            <ErrorMessage error=error />
            <SuccessMessage message=success />

            {move || auth.user().map(|user| {
                let roles = user
                    .roles
                    .iter()
                    .map(|role| role.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                let mfa_enabled = user.mfa_enabled;
                let shield_class = if mfa_enabled { "text-green-600" } else { "text-gray-400" };
                view! {
                    <div class="bg-white rounded-xl border border-gray-200 p-6 space-y-6">
                        <div class="flex items-center gap-4">
                            <UserAvatar user=user.clone() size=64 />
                            <div>
                                <p class="text-lg font-semibold text-gray-900">{user.display_name()}</p>
                                <p class="text-sm text-gray-600">{user.email.clone()}</p>
                            </div>
                        </div>

                        <dl class="grid grid-cols-2 gap-4 text-sm">
                            <dt class="text-gray-500">"First name"</dt>
                            <dd class="text-gray-900">{user.first_name.clone()}</dd>
                            <dt class="text-gray-500">"Last name"</dt>
                            <dd class="text-gray-900">{user.last_name.clone()}</dd>
                            <dt class="text-gray-500">"Roles"</dt>
                            <dd class="text-gray-900">{roles}</dd>
                            <dt class="text-gray-500">"Two-factor authentication"</dt>
                            <dd class="flex items-center gap-2">
                                <Icon name=icons::SHIELD class=shield_class />
                                <span>{if mfa_enabled { "Enabled" } else { "Disabled" }}</span>
                                <A href=routes::MFA_SETTINGS attr:class="text-blue-600 hover:text-blue-700">
                                    "Manage"
                                </A>
                            </dd>
                        </dl>
                    </div>
                }
            })}

            <button
                class="px-4 py-2 border border-gray-300 rounded-lg text-gray-700 hover:bg-gray-100 disabled:opacity-50"
                disabled=move || refreshing.get()
                on:click=on_refresh
            >
                {move || if refreshing.get() { "Reloading..." } else { "Reload profile" }}
            </button>
        </div>
    }
}
