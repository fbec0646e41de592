use leptos::prelude::*;

/// Spinner size options
#[derive(Clone, Copy, PartialEq)]
pub enum SpinnerSize {
    Small,
    Medium,
    Large,
}

impl SpinnerSize {
    fn class(&self) -> &'static str {
        match self {
            SpinnerSize::Small => "h-4 w-4 border-2",
            SpinnerSize::Medium => "h-8 w-8 border-2",
            SpinnerSize::Large => "h-12 w-12 border-4",
        }
    }
}

/// Ring spinner with an optional label
#[component]
pub fn Spinner(
    #[prop(default = SpinnerSize::Medium)]
    size: SpinnerSize,
    #[prop(default = String::new(), into)]
    label: String,
) -> impl IntoView {
    let has_label = !label.is_empty();

    view! {
        <div class="flex flex-col items-center gap-3" role="status">
            <div class=format!(
                "animate-spin rounded-full border-blue-600 border-t-transparent {}",
                size.class()
            )></div>
            {has_label.then(|| view! { <span class="text-sm text-gray-600">{label}</span> })}
        </div>
    }
}

/// Full-height loading state used while the session is being resolved
#[component]
pub fn LoadingScreen(
    #[prop(default = "Loading...".to_string(), into)] label: String,
) -> impl IntoView {
    view! {
        <div class="flex justify-center items-center h-96">
            <Spinner size=SpinnerSize::Large label=label />
        </div>
    }
}
