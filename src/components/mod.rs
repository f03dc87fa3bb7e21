//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod loading;
pub mod nav;
pub mod status;

pub use loading::Loading;
pub use nav::Nav;
pub use status::{ErrorBanner, StatusBanner};
