//! Dashboard Page
//!
//! Financial-year totals, the category breakdown and the most recent
//! expenses.

use std::rc::Rc;

use leptos::*;
use leptos_router::*;

use crate::api::ApiClient;
use crate::components::{ErrorBanner, Loading};
use crate::config::AppConfig;
use crate::state::{load_dashboard, CategoryRow, DashboardView, ExpenseRow};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let config = expect_context::<AppConfig>();

    // Requests still in flight when the page unmounts are aborted
    let controller = web_sys::AbortController::new().ok();
    let client = match &controller {
        Some(c) => ApiClient::new(config).with_abort_signal(c.signal()),
        None => ApiClient::new(config),
    };
    on_cleanup(move || {
        if let Some(c) = controller {
            c.abort();
        }
    });

    let client = Rc::new(client);
    let dashboard = create_local_resource(
        || (),
        move |_| {
            let client = Rc::clone(&client);
            async move {
                let result = load_dashboard(client.as_ref()).await;
                if let Err(e) = &result {
                    tracing::warn!(error = %e, "dashboard load failed");
                }
                result
            }
        },
    );

    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold">"Dashboard"</h1>

            {move || {
                if dashboard.loading().get() {
                    return view! { <Loading /> }.into_view();
                }

                match dashboard.get() {
                    None => view! { <Loading /> }.into_view(),
                    Some(Err(e)) => view! {
                        <ErrorBanner
                            title="Could not load the dashboard"
                            detail=e.to_string()
                            on_retry=move || dashboard.refetch()
                        />
                    }.into_view(),
                    Some(Ok(data)) => view! {
                        <DashboardBody summary=DashboardView::build(&data) />
                    }.into_view(),
                }
            }}
        </div>
    }
}

#[component]
fn DashboardBody(summary: DashboardView) -> impl IntoView {
    view! {
        <section class="space-y-6">
            <h2 class="text-xl font-semibold text-gray-700">
                "Financial Year " {summary.fy_label}
            </h2>

            <div class="bg-gradient-to-br from-blue-600 to-blue-700 text-white rounded-xl p-8 text-center">
                <div class="text-4xl font-bold">{summary.total}</div>
                <div class="opacity-90">"Total Expenses"</div>
            </div>

            <CategoryBreakdown categories=summary.categories />
        </section>

        <RecentExpenses rows=summary.recent />
    }
}

#[component]
fn CategoryBreakdown(categories: Vec<CategoryRow>) -> impl IntoView {
    if categories.is_empty() {
        return view! {}.into_view();
    }

    view! {
        <div class="space-y-2">
            <h3 class="font-semibold">"By Category"</h3>
            {categories.into_iter().map(|row| view! {
                <div class="flex items-center justify-between p-4 bg-gray-50 rounded-lg">
                    <span class="font-medium">{row.name}</span>
                    <span class="font-semibold text-blue-600">{row.total}</span>
                </div>
            }).collect_view()}
        </div>
    }
    .into_view()
}

#[component]
fn RecentExpenses(rows: Vec<ExpenseRow>) -> impl IntoView {
    view! {
        <section class="space-y-3">
            <h2 class="text-xl font-semibold text-gray-700">"Recent Expenses"</h2>

            {if rows.is_empty() {
                view! {
                    <p class="text-center text-gray-500 italic">
                        "No expenses yet. "
                        <A href="/capture" class="text-blue-600 underline">"Add your first expense!"</A>
                    </p>
                }.into_view()
            } else {
                rows.into_iter()
                    .map(|row| view! { <ExpenseItem row=row /> })
                    .collect_view()
            }}
        </section>
    }
}

#[component]
fn ExpenseItem(row: ExpenseRow) -> impl IntoView {
    view! {
        <div class="p-4 border border-gray-200 rounded-lg bg-white">
            <div class="flex items-center justify-between mb-2">
                <span class="font-medium text-gray-800">{row.label}</span>
                <span class="font-semibold text-emerald-600">{row.amount}</span>
            </div>
            <div class="flex items-center gap-4 text-sm text-gray-500">
                <span>{row.date.unwrap_or_default()}</span>
                {row.category.map(|category| view! {
                    <span class="bg-blue-100 text-blue-800 px-2 py-1 rounded text-xs">{category}</span>
                })}
            </div>
        </div>
    }
}
