//! Login form component
//!
//! Email and password first; when the account has MFA enabled the form
//! switches to a code step driven by `AuthState::MfaPending`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::use_auth_context;
use crate::core::{AuthState, LoginOutcome};
use crate::ui::common::ErrorMessage;
use crate::ui::icon::{Icon, icons};

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-gray-300 rounded-lg text-gray-900 \
     placeholder-gray-400 focus:outline-none focus:ring-2 focus:ring-blue-500 focus:border-transparent \
     transition-colors";

/// Login form component
#[component]
pub fn LoginForm(
    /// Callback when login is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
    /// Callback to switch to register form
    #[prop(optional, into)]
    on_register_click: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let mfa_code = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let email_error = RwSignal::new(None::<String>);

    let mfa_step = move || matches!(auth.state.get(), AuthState::MfaPending { .. });

    let validate_email = move || {
        let value = email.get();
        if value.trim().is_empty() {
            email_error.set(Some("Email is required".to_string()));
            false
        } else if !value.contains('@') {
            email_error.set(Some("Please enter a valid email".to_string()));
            false
        } else {
            email_error.set(None);
            true
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.clear_error();

        if !validate_email() || password.get().is_empty() {
            return;
        }

        let email_val = email.get().trim().to_string();
        let password_val = password.get();
        let code = mfa_step().then(|| mfa_code.get());

        spawn_local(async move {
            if let Ok(LoginOutcome::Success(_)) =
                auth.login(&email_val, &password_val, code.as_deref()).await
            {
                mfa_code.set(String::new());
                if let Some(callback) = on_success {
                    callback.run(());
                }
            }
        });
    };

    let on_back = move |_| {
        mfa_code.set(String::new());
        auth.cancel_mfa();
    };

    view! {
        <form on:submit=on_submit class="space-y-6">
            <div class="text-center">
                <h2 class="text-2xl font-bold text-gray-900">"Sign in"</h2>
                <p class="mt-2 text-sm text-gray-600">
                    {move || if mfa_step() {
                        "Enter the 6-digit code from your authenticator app"
                    } else {
                        "Attendance Management System"
                    }}
                </p>
            </div>

            <ErrorMessage error=auth.error />

            <Show
                when=mfa_step
                fallback=move || view! {
                    <div>
                        <label for="email" class="block text-sm font-medium text-gray-700 mb-1">
                            "Email"
                        </label>
                        <input
                            type="email"
                            id="email"
                            name="email"
                            autocomplete="email"
                            placeholder="you@school.edu"
                            class=INPUT_CLASS
                            class:border-red-500=move || email_error.get().is_some()
                            prop:value=move || email.get()
                            on:input=move |ev| {
                                email.set(event_target_value(&ev));
                                email_error.set(None);
                            }
                            on:blur=move |_| { validate_email(); }
                        />
                        {move || email_error.get().map(|error| view! {
                            <p class="mt-1 text-sm text-red-500">{error}</p>
                        })}
                    </div>

                    <div>
                        <label for="password" class="block text-sm font-medium text-gray-700 mb-1">
                            "Password"
                        </label>
                        <div class="relative">
                            <input
                                type=move || if show_password.get() { "text" } else { "password" }
                                id="password"
                                name="password"
                                autocomplete="current-password"
                                placeholder="Enter your password"
                                class=INPUT_CLASS
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                            />
                            <button
                                type="button"
                                class="absolute inset-y-0 right-0 pr-3 flex items-center text-gray-400 hover:text-gray-600"
                                on:click=move |_| show_password.update(|v| *v = !*v)
                            >
                                {move || if show_password.get() {
                                    view! { <Icon name=icons::EYE_CLOSED class="h-5 w-5" /> }.into_any()
                                } else {
                                    view! { <Icon name=icons::EYE class="h-5 w-5" /> }.into_any()
                                }}
                            </button>
                        </div>
                    </div>
                }
            >
                <div>
                    <label for="mfa_code" class="block text-sm font-medium text-gray-700 mb-1">
                        "MFA code"
                    </label>
                    <input
                        type="text"
                        id="mfa_code"
                        name="mfa_code"
                        inputmode="numeric"
                        autocomplete="one-time-code"
                        maxlength="6"
                        placeholder="000000"
                        class=format!("{} text-center tracking-widest", INPUT_CLASS)
                        prop:value=move || mfa_code.get()
                        on:input=move |ev| mfa_code.set(event_target_value(&ev))
                    />
                </div>
            </Show>

            <button
                type="submit"
                class="w-full py-2.5 px-4 bg-blue-600 hover:bg-blue-700 text-white font-medium rounded-lg
                       focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-blue-500
                       disabled:opacity-50 disabled:cursor-not-allowed transition-colors"
                disabled=move || auth.loading.get()
            >
                {move || {
                    if auth.loading.get() {
                        view! {
                            <span class="flex items-center justify-center">
                                <Icon name=icons::LOADER class="animate-spin -ml-1 mr-2 h-4 w-4" />
                                "Signing in..."
                            </span>
                        }.into_any()
                    } else if mfa_step() {
                        view! { <span class="block">"Verify code"</span> }.into_any()
                    } else {
                        view! { <span class="block">"Sign In"</span> }.into_any()
                    }
                }}
            </button>

            {move || if mfa_step() {
                view! {
                    <button
                        type="button"
                        class="w-full text-sm text-gray-600 hover:text-gray-900"
                        on:click=on_back
                    >
                        "Back to login"
                    </button>
                }.into_any()
            } else {
                view! {
                    <div class="text-center text-sm text-gray-600">
                        "Don't have an account? "
                        <button
                            type="button"
                            class="text-blue-600 hover:text-blue-700 font-medium"
                            on:click=move |_| {
                                if let Some(callback) = on_register_click.as_ref() {
                                    callback.run(());
                                }
                            }
                        >
                            "Sign up"
                        </button>
                    </div>
                }.into_any()
            }}
        </form>
    }
}
