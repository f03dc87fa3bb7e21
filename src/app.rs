//! App Root Component
//!
//! Routing shell. Provides the configuration to every page as context.

use leptos::*;
use leptos_router::*;

use crate::components::Nav;
use crate::config::AppConfig;
use crate::pages::{Capture, Dashboard};

/// Root application component
#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    tracing::info!(api_base = %config.api_base, "starting expense tracker");
    provide_context(config);

    view! {
        <Router>
            <div class="min-h-screen bg-gray-100 text-gray-900">
                <Nav />

                <main class="container mx-auto max-w-3xl px-4 pt-24 pb-12">
                    <div class="bg-white rounded-xl shadow p-6 md:p-8">
                        <Routes>
                            <Route path="/" view=Dashboard />
                            <Route path="/capture" view=Capture />
                            <Route path="/*any" view=NotFound />
                        </Routes>
                    </div>
                </main>
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[40vh] text-center">
            <div class="text-6xl mb-4">"🧾"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"There is nothing at this address."</p>
            <A
                href="/"
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
