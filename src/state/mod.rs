//! State Management
//!
//! View-local state for the dashboard and capture pages. Nothing here is
//! shared between views.

pub mod capture;
pub mod dashboard;

pub use capture::{
    submit_capture, CameraStream, CaptureMachine, DetailsForm, HeldImage, MessageKind,
    StatusMessage, SubmitOutcome,
};
pub use dashboard::{load_dashboard, CategoryRow, DashboardView, ExpenseRow};
