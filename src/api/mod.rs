//! Expense API
//!
//! Client side of the expense backend.
//!
//! # Endpoints
//!
//! - `GET /stats/fy` - Financial-year totals by category
//! - `GET /expenses` - Expense list, newest first
//! - `POST /expenses` - Multipart receipt upload, returns the new expense id
//!
//! Views depend on the [`ExpenseApi`] trait rather than on the HTTP client
//! directly, so capture and dashboard flows run against a fake in tests.

pub mod client;
pub mod dto;
pub mod error;

pub use client::{ApiClient, ExpenseApi};
pub use dto::{CategoryTotal, CreatedExpense, Expense, ExpenseDetails, FyStats};
pub use error::{ApiError, ApiResult};
