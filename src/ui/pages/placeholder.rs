//! Stand-in for feature screens that are not built yet

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::core::routes;
use crate::ui::icon::Icon;

#[component]
pub fn PlaceholderPage() -> impl IntoView {
    let pathname = use_location().pathname;
    let entry = move || pathname.with(|path| routes::menu_entry(path));

    view! {
        <div class="flex flex-col items-center justify-center py-24 text-center">
            {move || entry().map(|entry| view! { <Icon name=entry.icon class="text-5xl text-gray-300 mb-4" /> })}
            <h1 class="text-2xl font-bold text-gray-900">
                {move || entry().map_or("Coming Soon", |entry| entry.label)}
            </h1>
            <p class="mt-2 text-gray-600">"This section is coming soon."</p>
        </div>
    }
}
