//! Classroom Portal - school attendance web client
//!
//! The `core` module holds the framework-free session and access-control
//! layer: an HTTP client that refreshes expired tokens, the session store,
//! the auth session manager and the role-based route gate. The Leptos UI
//! and the router live in `ui` and `app`.

#![recursion_limit = "4096"]

#[cfg(any(feature = "hydrate", feature = "ssr"))]
pub mod app;
pub mod core;
#[cfg(any(feature = "hydrate", feature = "ssr"))]
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
