//! Inline feedback banners

use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

/// Error banner, hidden while the signal is `None`
#[component]
pub fn ErrorMessage(#[prop(into)] error: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div class="flex items-center gap-2 p-3 bg-red-50 border border-red-200 rounded-lg text-sm text-red-700">
                <Icon name=icons::ALERT_CIRCLE class="h-4 w-4"/>
                <span>{move || error.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="flex items-center gap-2 p-3 bg-green-50 border border-green-200 rounded-lg text-sm text-green-700">
                <Icon name=icons::CHECK class="h-4 w-4"/>
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// Message under a form input
#[component]
pub fn FieldError(#[prop(into)] messages: Signal<Vec<String>>) -> impl IntoView {
    view! {
        <For
            each=move || messages.get()
            key=|message| message.clone()
            let:message
        >
            <p class="mt-1 text-sm text-red-500">{message}</p>
        </For>
    }
}
