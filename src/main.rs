//! Expense Tracker
//!
//! Browser client for a receipt-based expense backend, built with Leptos (WASM).
//!
//! # Features
//!
//! - Financial-year totals with a per-category breakdown
//! - The ten most recent expenses
//! - Receipt capture from the rear camera or an image file
//! - Optional manual details sent alongside the receipt
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Page state lives in plain Rust types under [`state`] so it can
//! be tested natively; [`api`] and [`media`] wrap the browser.

use leptos::*;

mod api;
mod app;
mod components;
mod config;
mod logging;
mod media;
mod money;
mod pages;
mod state;

use config::AppConfig;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let (config, config_error) = AppConfig::from_build_env();
    logging::init_logging(&config);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "invalid build configuration, using defaults");
    }

    mount_to_body(move || view! { <app::App config=config /> });
}
