//! Status Messages
//!
//! Inline success and error banners.

use leptos::*;

use crate::state::{MessageKind, StatusMessage};

/// Banner for a capture status message
#[component]
pub fn StatusBanner(message: StatusMessage) -> impl IntoView {
    let (icon, class) = match message.kind {
        MessageKind::Success => ("✓", "bg-green-100 text-green-800 border-green-300"),
        MessageKind::Error => ("✕", "bg-red-100 text-red-800 border-red-300"),
    };

    view! {
        <div
            role="status"
            class=format!("flex items-center space-x-3 border rounded-lg px-4 py-3 font-medium {}", class)
        >
            <span class="text-lg">{icon}</span>
            <span>{message.text}</span>
        </div>
    }
}

/// Error banner with a retry button
#[component]
pub fn ErrorBanner<F>(
    #[prop(into)]
    title: String,
    #[prop(into)]
    detail: String,
    on_retry: F,
) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <div role="alert" class="bg-red-100 border border-red-300 text-red-800 rounded-lg p-4 space-y-3">
            <div>
                <p class="font-semibold">{title}</p>
                <p class="text-sm">{detail}</p>
            </div>
            <button
                type="button"
                on:click=move |_| on_retry()
                class="px-4 py-2 bg-red-600 hover:bg-red-700 text-white rounded-lg font-medium transition-colors"
            >
                "Retry"
            </button>
        </div>
    }
}
