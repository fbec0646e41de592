//! Two-factor authentication settings
//!
//! Setup shows the secret and provisioning URI; the first valid code enables
//! MFA. The cached profile is refreshed after every change.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::auth::MfaSetup;
use crate::core::services::Services;
use crate::ui::auth::use_auth_context;
use crate::ui::common::{ErrorMessage, SuccessMessage};
use crate::ui::icon::{Icon, icons};

const BUTTON_CLASS: &str = "px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white font-medium \
     rounded-lg disabled:opacity-50 disabled:cursor-not-allowed transition-colors";

#[component]
pub fn MfaSettingsPage() -> impl IntoView {
    let auth = use_auth_context();

    let setup = RwSignal::new(None::<MfaSetup>);
    let code = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);

    let enabled = move || auth.user().is_some_and(|user| user.mfa_enabled);

    let start = move || {
        busy.set(true);
        error.set(None);
        success.set(None);
    };

    let on_setup = move |_| {
        start();
        spawn_local(async move {
            let client = auth.api();
            match Services::new(&client).users().mfa().setup().await {
                Ok(data) => setup.set(Some(data)),
                Err(e) => error.set(Some(e.to_string())),
            }
            busy.set(false);
        });
    };

    let on_verify = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if code.get().trim().is_empty() {
            error.set(Some("Enter the code from your authenticator app".to_string()));
            return;
        }
        start();
        spawn_local(async move {
            let client = auth.api();
            match Services::new(&client).users().mfa().verify(&code.get_untracked()).await {
                Ok(status) => {
                    setup.set(None);
                    code.set(String::new());
                    success.set(Some(status.message));
                    auth.refresh_profile().await;
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            busy.set(false);
        });
    };

    let on_disable = move |_| {
        start();
        spawn_local(async move {
            let client = auth.api();
            match Services::new(&client).users().mfa().disable().await {
                Ok(status) => {
                    success.set(Some(status.message));
                    auth.refresh_profile().await;
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="max-w-2xl space-y-6">
            <div class="flex items-center gap-3">
                <Icon name=icons::SHIELD class="text-2xl text-blue-600" />
                <h1 class="text-2xl font-bold text-gray-900">"Two-factor authentication"</h1>
            </div>
            <ErrorMessage error=error />
            <SuccessMessage message=success />

            <div class="bg-white rounded-xl border border-gray-200 p-6 space-y-4">
                {move || if enabled() {
                    view! {
                        <p class="text-gray-700">"Sign-in requires a code from your authenticator app."</p>
                        <button class="px-4 py-2 border border-red-300 text-red-700 rounded-lg hover:bg-red-50 disabled:opacity-50"
                            disabled=move || busy.get()
                            on:click=on_disable
                        >
                            "Disable two-factor authentication"
                        </button>
                    }.into_any()
                } else if let Some(data) = setup.get() {
                    view! {
                        <p class="text-gray-700">
                            "Add this account to your authenticator app, then enter the code it shows."
                        </p>
                        <div class="space-y-2 text-sm">
                            <p class="text-gray-500">"Secret"</p>
                            <code class="block p-2 bg-gray-100 rounded font-mono break-all">{data.secret}</code>
                            <p class="text-gray-500">"Provisioning URI"</p>
                            <code class="block p-2 bg-gray-100 rounded font-mono break-all">{data.provisioning_uri}</code>
                        </div>
                        <form on:submit=on_verify class="flex gap-3">
                            <input
                                type="text"
                                inputmode="numeric"
                                autocomplete="one-time-code"
                                maxlength="6"
                                placeholder="000000"
                                class="flex-1 px-3 py-2 border border-gray-300 rounded-lg text-center tracking-widest"
                                prop:value=move || code.get()
                                on:input=move |ev| code.set(event_target_value(&ev))
                            />
                            <button type="submit" class=BUTTON_CLASS disabled=move || busy.get()>
                                "Verify"
                            </button>
                        </form>
                    }.into_any()
                } else {
                    view! {
                        <p class="text-gray-700">"Protect your account with a one-time code at sign-in."</p>
                        <button class=BUTTON_CLASS disabled=move || busy.get() on:click=on_setup>
                            "Set up two-factor authentication"
                        </button>
                    }.into_any()
                }}
            </div>
        </div>
    }
}
