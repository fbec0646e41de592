//! Analytics & reports page
//!
//! Quick attendance statistics for a student or class, and CSV reports
//! covering the last 30 days.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

use crate::core::services::{ReportRequest, ReportScope, Services};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{ErrorMessage, Spinner, SpinnerSize};
use crate::ui::icon::{Icon, icons};

const SELECT_CLASS: &str =
    "w-full px-3 py-2 border border-gray-300 rounded-lg text-gray-900 bg-white";
const BUTTON_CLASS: &str = "px-4 py-2 bg-blue-600 hover:bg-blue-700 text-white font-medium \
     rounded-lg disabled:opacity-50 disabled:cursor-not-allowed transition-colors";

/// `(id, label)` pairs from a list response, either a bare array or a
/// paginated `{"results": [...]}` object
fn records(list: &Value) -> Vec<(String, String)> {
    let items = match list {
        Value::Array(items) => items.as_slice(),
        _ => list["results"].as_array().map(Vec::as_slice).unwrap_or_default(),
    };
    items
        .iter()
        .filter_map(|item| {
            let id = match &item["id"] {
                Value::String(id) => id.clone(),
                Value::Number(id) => id.to_string(),
                _ => return None,
            };
            let full_name = format!(
                "{} {}",
                item["first_name"].as_str().unwrap_or_default(),
                item["last_name"].as_str().unwrap_or_default()
            );
            let label = item["full_name"]
                .as_str()
                .or_else(|| item["name"].as_str())
                .map(str::to_string)
                .or_else(|| Some(full_name.trim().to_string()).filter(|name| !name.is_empty()))
                .unwrap_or_else(|| id.clone());
            Some((id, label))
        })
        .collect()
}

/// Top-level fields of a statistics object as display rows
fn stat_rows(stats: &Value) -> Vec<(String, String)> {
    let Some(fields) = stats.as_object() else {
        return Vec::new();
    };
    fields
        .iter()
        .map(|(key, value)| {
            let shown = match value {
                Value::String(text) => text.clone(),
                Value::Null => "-".to_string(),
                other => other.to_string(),
            };
            (key.replace('_', " "), shown)
        })
        .collect()
}

/// Inline link target for a CSV file, so no extra authenticated request is needed
fn csv_data_url(content: &[u8]) -> String {
    format!(
        "data:text/csv;charset=utf-8,{}",
        urlencoding::encode(&String::from_utf8_lossy(content))
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Student,
    Class,
}

impl Target {
    fn scope(self, id: String) -> ReportScope {
        match self {
            Target::Student => ReportScope::Student(id),
            Target::Class => ReportScope::Class(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ReadyReport {
    file_name: String,
    href: String,
}

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let auth = use_auth_context();

    let target = RwSignal::new(Target::Student);
    let selected = RwSignal::new(String::new());
    let students = RwSignal::new(Vec::<(String, String)>::new());
    let classes = RwSignal::new(Vec::<(String, String)>::new());
    let stats = RwSignal::new(None::<Vec<(String, String)>>);
    let report = RwSignal::new(None::<ReadyReport>);
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        spawn_local(async move {
            let client = auth.api();
            let academics = Services::new(&client).academics();
            match academics.students(None).await {
                Ok(list) => students.set(records(&list)),
                Err(e) => tracing::warn!("Failed to load students: {}", e),
            }
            match academics.classes().await {
                Ok(list) => classes.set(records(&list)),
                Err(e) => tracing::warn!("Failed to load classes: {}", e),
            }
        });
    });

    let options = move || match target.get() {
        Target::Student => students.get(),
        Target::Class => classes.get(),
    };

    let start = move || {
        busy.set(true);
        error.set(None);
    };

    let on_stats = move |_| {
        let id = selected.get();
        let kind = target.get();
        start();
        spawn_local(async move {
            let client = auth.api();
            let analytics = Services::new(&client).analytics();
            let result = match kind {
                Target::Student => analytics.student_quick(&id).await,
                Target::Class => analytics.class_quick(&id).await,
            };
            match result {
                Ok(data) => stats.set(Some(stat_rows(&data))),
                Err(e) => error.set(Some(e.to_string())),
            }
            busy.set(false);
        });
    };

    let on_report = move |_| {
        let id = selected.get();
        let name = options()
            .into_iter()
            .find(|(option, _)| *option == id)
            .map(|(_, label)| label)
            .unwrap_or_else(|| id.clone());
        let scope = target.get().scope(id);
        start();
        report.set(None);
        spawn_local(async move {
            let client = auth.api();
            let today = chrono::Utc::now().date_naive();
            let request = ReportRequest::recent(scope, today);
            match Services::new(&client)
                .reports()
                .generate_and_download(&request, &name, today)
                .await
            {
                Ok(download) => report.set(Some(ReadyReport {
                    href: csv_data_url(&download.content),
                    file_name: download.file_name,
                })),
                Err(e) => error.set(Some(e.to_string())),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="max-w-3xl space-y-6">
            <h1 class="text-2xl font-bold text-gray-900">"Analytics & Reports"</h1>
            <ErrorMessage error=error />

            <div class="bg-white rounded-xl border border-gray-200 p-6 space-y-4">
                <div class="grid grid-cols-2 gap-4">
                    <select
                        class=SELECT_CLASS
                        on:change=move |ev| {
                            let kind = match event_target_value(&ev).as_str() {
                                "class" => Target::Class,
                                _ => Target::Student,
                            };
                            target.set(kind);
                            selected.set(String::new());
                            stats.set(None);
                            report.set(None);
                        }
                    >
                        <option value="student">"Student"</option>
                        <option value="class">"Class"</option>
                    </select>
                    <select
                        class=SELECT_CLASS
                        prop:value=move || selected.get()
                        on:change=move |ev| selected.set(event_target_value(&ev))
                    >
                        <option value="">"-- Select --"</option>
                        <For each=options key=|(id, _)| id.clone() let:option>
                            <option value=option.0>{option.1}</option>
                        </For>
                    </select>
                </div>

                <div class="flex gap-3">
                    <button
                        class=BUTTON_CLASS
                        disabled=move || busy.get() || selected.get().is_empty()
                        on:click=on_stats
                    >
                        "View statistics"
                    </button>
                    <button
                        class=BUTTON_CLASS
                        disabled=move || busy.get() || selected.get().is_empty()
                        on:click=on_report
                    >
                        "Generate CSV report"
                    </button>
                    <Show when=move || busy.get()>
                        <Spinner size=SpinnerSize::Small />
                    </Show>
                </div>
            </div>

            {move || report.get().map(|ready| view! {
                <a
                    href=ready.href
                    download=ready.file_name.clone()
                    class="flex items-center gap-2 p-3 bg-green-50 border border-green-200 rounded-lg text-sm text-green-700"
                >
                    <Icon name=icons::CHECK class="h-4 w-4" />
                    "Download " {ready.file_name.clone()}
                </a>
            })}

            {move || stats.get().map(|rows| view! {
                <dl class="bg-white rounded-xl border border-gray-200 p-6 grid grid-cols-2 gap-3 text-sm">
                    {rows.into_iter().map(|(label, value)| view! {
                        <dt class="text-gray-500 capitalize">{label}</dt>
                        <dd class="text-gray-900 font-medium">{value}</dd>
                    }).collect_view()}
                </dl>
            })}
        </div>
    }
}
