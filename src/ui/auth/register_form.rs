//! Register form component
//!
//! Field errors returned by the backend are shown under the matching input;
//! `non_field_errors` appear above the form.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::use_auth_context;
use crate::core::{AuthError, RegisterRequest, ValidationErrors};
use crate::ui::common::{ErrorMessage, FieldError};

const MIN_PASSWORD_LEN: usize = 8;

const INPUT_CLASS: &str = "w-full px-3 py-2 border border-gray-300 rounded-lg text-gray-900 \
     placeholder-gray-400 focus:outline-none focus:ring-2 focus:ring-blue-500 focus:border-transparent";

/// Checks done before hitting the backend
fn validate(request: &RegisterRequest) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if request.email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !request.email.contains('@') {
        errors.add("email", "Please enter a valid email");
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
    if request.password != request.password_confirm {
        errors.add("password_confirm", "Passwords don't match");
    }
    errors
}

/// One labelled text input bound to a signal
#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = "")] autocomplete: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<ValidationErrors>,
) -> impl IntoView {
    let messages = Signal::derive(move || errors.with(|e| e.field(id).to_vec()));

    view! {
        <div>
            <label for=id class="block text-sm font-medium text-gray-700 mb-1">{label}</label>
            <input
                type=input_type
                id=id
                name=id
                autocomplete=autocomplete
                class=INPUT_CLASS
                class:border-red-500=move || !messages.get().is_empty()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <FieldError messages=messages />
        </div>
    }
}

/// Register form component
#[component]
pub fn RegisterForm(
    /// Callback when registration is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
    /// Callback to switch to login form
    #[prop(optional, into)]
    on_login_click: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();

    let email = RwSignal::new(String::new());
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirm = RwSignal::new(String::new());
    let errors = RwSignal::new(ValidationErrors::new());

    let general_errors = Signal::derive(move || {
        errors.with(|e| {
            let messages = e.field("non_field_errors");
            (!messages.is_empty()).then(|| messages.join(" "))
        })
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.clear_error();

        let request = RegisterRequest {
            email: email.get().trim().to_string(),
            password: password.get(),
            password_confirm: password_confirm.get(),
            first_name: first_name.get().trim().to_string(),
            last_name: last_name.get().trim().to_string(),
        };

        let local = validate(&request);
        if !local.is_empty() {
            errors.set(local);
            return;
        }
        errors.set(ValidationErrors::new());

        spawn_local(async move {
            match auth.register(&request).await {
                Ok(_) => {
                    if let Some(callback) = on_success {
                        callback.run(());
                    }
                }
                Err(AuthError::Validation(field_errors)) => errors.set(field_errors),
                Err(_) => {}
            }
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-5">
            <div class="text-center">
                <h2 class="text-2xl font-bold text-gray-900">"Create an account"</h2>
                <p class="mt-2 text-sm text-gray-600">"Join the attendance system"</p>
            </div>

            <ErrorMessage error=auth.error />
            <ErrorMessage error=general_errors />

            <div class="grid grid-cols-2 gap-4">
                <TextField id="first_name" label="First name" autocomplete="given-name" value=first_name errors=errors />
                <TextField id="last_name" label="Last name" autocomplete="family-name" value=last_name errors=errors />
            </div>
            <TextField id="email" label="Email" input_type="email" autocomplete="email" value=email errors=errors />
            <TextField id="password" label="Password" input_type="password" autocomplete="new-password" value=password errors=errors />
            <TextField
                id="password_confirm"
                label="Confirm password"
                input_type="password"
                autocomplete="new-password"
                value=password_confirm
                errors=errors
            />

            <button
                type="submit"
                class="w-full py-2.5 px-4 bg-blue-600 hover:bg-blue-700 text-white font-medium rounded-lg
                       disabled:opacity-50 disabled:cursor-not-allowed transition-colors"
                disabled=move || auth.loading.get()
            >
                {move || if auth.loading.get() { "Creating account..." } else { "Sign Up" }}
            </button>

            <div class="text-center text-sm text-gray-600">
                "Already have an account? "
                <button
                    type="button"
                    class="text-blue-600 hover:text-blue-700 font-medium"
                    on:click=move |_| {
                        if let Some(callback) = on_login_click.as_ref() {
                            callback.run(());
                        }
                    }
                >
                    "Sign in"
                </button>
            </div>
        </form>
    }
}
