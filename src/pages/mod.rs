//! Pages
//!
//! Top-level page components for each route.

pub mod capture;
pub mod dashboard;

pub use capture::Capture;
pub use dashboard::Dashboard;
