use leptos::prelude::*;

/// Icon font glyph (UIcons, solid straight style)
#[component]
pub fn Icon(
    /// Full icon class, e.g. `fi fi-ss-home`
    name: &'static str,
    /// Extra CSS classes
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    view! {
        <i class=format!("{} {} inline-flex items-center justify-center", name, class) aria-hidden="true"></i>
    }
}

/// Icons used outside the navigation menu
pub mod icons {
    pub const ALERT_CIRCLE: &str = "fi fi-ss-exclamation";
    pub const CHECK: &str = "fi fi-ss-check-circle";
    pub const EYE: &str = "fi fi-ss-eye";
    pub const EYE_CLOSED: &str = "fi fi-ss-eye-crossed";
    pub const LOADER: &str = "fi fi-ss-spinner";
    pub const LOCK: &str = "fi fi-ss-lock";
    pub const LOGOUT: &str = "fi fi-ss-exit";
    pub const SHIELD: &str = "fi fi-ss-shield-check";
    pub const USER: &str = "fi fi-ss-user";
    pub const SEARCH: &str = "fi fi-ss-search";
}
