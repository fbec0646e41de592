//! User menu component
//!
//! Navbar dropdown with the current user's name, roles and account links.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::context::use_auth_context;
use crate::core::{AuthState, UserProfile, routes};
use crate::ui::icon::{Icon, icons};

const MENU_ITEM_CLASS: &str =
    "w-full px-4 py-2 text-sm text-left text-gray-700 hover:bg-gray-100 transition-colors flex items-center gap-2";

/// User menu component for the navbar
#[component]
pub fn UserMenu() -> impl IntoView {
    let auth = use_auth_context();
    let menu_open = RwSignal::new(false);

    let handle_logout = move |_| {
        menu_open.set(false);
        auth.logout();
        let navigate = use_navigate();
        navigate(routes::LOGIN, Default::default());
    };

    move || match auth.state.get() {
        AuthState::Authenticated(user) => {
            let roles = user
                .roles
                .iter()
                .map(|role| role.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let name = user.display_name();
            let email = user.email.clone();

            view! {
                <div class="relative">
                    <button
                        class="flex items-center gap-2 p-1 rounded-lg hover:bg-gray-100 transition-colors"
                        on:click=move |_| menu_open.update(|v| *v = !*v)
                    >
                        <UserAvatar user=user.clone() size=32 />
                        <span class="hidden sm:flex flex-col items-start">
                            <span class="text-sm font-medium text-gray-900 max-w-[160px] truncate">{name.clone()}</span>
                            <span class="text-xs text-gray-500">{roles}</span>
                        </span>
                    </button>

                    <Show when=move || menu_open.get()>
                        <div class="absolute right-0 mt-2 w-56 bg-white rounded-lg shadow-lg border border-gray-200 py-1 z-50">
                            <div class="px-4 py-3 border-b border-gray-200">
                                <p class="text-sm font-medium text-gray-900 truncate">{name.clone()}</p>
                                <p class="text-xs text-gray-500 truncate">{email.clone()}</p>
                            </div>
                            <div class="py-1" on:click=move |_| menu_open.set(false)>
                                <A href=routes::PROFILE_SETTINGS attr:class=MENU_ITEM_CLASS>
                                    <Icon name=icons::USER class="h-4 w-4" />
                                    "Profile"
                                </A>
                                <A href=routes::MFA_SETTINGS attr:class=MENU_ITEM_CLASS>
                                    <Icon name=icons::SHIELD class="h-4 w-4" />
                                    "Two-factor authentication"
                                </A>
                            </div>
                            <div class="border-t border-gray-200 py-1">
                                <button
                                    class="w-full px-4 py-2 text-sm text-left text-red-600 hover:bg-red-50 transition-colors flex items-center gap-2"
                                    on:click=handle_logout
                                >
                                    <Icon name=icons::LOGOUT class="h-4 w-4" />
                                    "Sign Out"
                                </button>
                            </div>
                        </div>
                    </Show>
                </div>
            }
            .into_any()
        }
        AuthState::Loading | AuthState::Authenticating => view! {
            <div class="w-8 h-8 rounded-full bg-gray-200 animate-pulse"></div>
        }
        .into_any(),
        _ => view! {
            <A
                href=routes::LOGIN
                attr:class="px-3 py-1.5 text-sm font-medium text-gray-600 hover:text-gray-900 transition-colors"
            >
                "Sign In"
            </A>
        }
        .into_any(),
    }
}

/// Initials from first and last name, falling back to the email
fn initials(user: &UserProfile) -> String {
    let from_names: String = [&user.first_name, &user.last_name]
        .iter()
        .filter_map(|name| name.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if from_names.is_empty() {
        user.email
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    } else {
        from_names
    }
}

/// User avatar component
#[component]
pub fn UserAvatar(
    user: UserProfile,
    /// Avatar size in pixels
    #[prop(default = 32)]
    size: u32,
) -> impl IntoView {
    let size_style = format!(
        "width: {}px; height: {}px; min-width: {}px; min-height: {}px;",
        size, size, size, size
    );
    let font_size = if size >= 40 { "text-lg" } else { "text-sm" };

    // Consistent color per user
    let hash = user
        .email
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_add(b as u32));
    let colors = [
        "bg-blue-500",
        "bg-green-500",
        "bg-yellow-500",
        "bg-red-500",
        "bg-purple-500",
        "bg-indigo-500",
    ];
    let color = colors[(hash as usize) % colors.len()];

    view! {
        <div
            class=format!("{} rounded-full flex items-center justify-center text-white font-medium {}", color, font_size)
            style=size_style
        >
            {initials(&user)}
        </div>
    }
}
