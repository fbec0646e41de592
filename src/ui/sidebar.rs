//! Navigation sidebar
//!
//! Lists the menu entries the current user may see, in configuration order.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::core::access::visible_entries;
use crate::core::routes;
use crate::ui::auth::use_auth_context;
use crate::ui::icon::Icon;

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth_context();
    let pathname = use_location().pathname;

    let entries = move || {
        auth.state.with(|state| {
            visible_entries(routes::menu(), state.user())
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <aside class="w-64 shrink-0 bg-white border-r border-gray-200 min-h-[calc(100vh-4rem)]">
            <nav class="p-4 space-y-1">
                <For
                    each=entries
                    key=|entry| entry.path
                    let:entry
                >
                    {
                        let path = entry.path;
                        let active = move || pathname.with(|current| current.starts_with(path));
                        view! {
                            <A
                                href=path
                                attr:class=move || {
                                    if active() {
                                        "flex items-center gap-3 px-4 py-2.5 rounded-lg bg-blue-50 text-blue-700 font-medium"
                                    } else {
                                        "flex items-center gap-3 px-4 py-2.5 rounded-lg text-gray-700 hover:bg-gray-100"
                                    }
                                }
                            >
                                <Icon name=entry.icon class="text-lg" />
                                <span>{entry.label}</span>
                            </A>
                        }
                    }
                </For>
            </nav>
        </aside>
    }
}
