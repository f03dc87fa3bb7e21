//! Dashboard State
//!
//! Loads both dashboard payloads together and turns them into display rows.

use futures_util::future::join;

use crate::api::{ApiResult, CategoryTotal, Expense, ExpenseApi, FyStats};
use crate::money::format_cents;

/// Number of expenses shown under "Recent Expenses"
pub const RECENT_LIMIT: usize = 10;

/// Label used when an expense has neither vendor nor description
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Both payloads the dashboard renders from
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub stats: FyStats,
    pub expenses: Vec<Expense>,
}

/// Fetch stats and expenses concurrently.
///
/// Fails as a whole if either request fails; nothing is rendered from half a
/// result.
pub async fn load_dashboard<A: ExpenseApi + ?Sized>(api: &A) -> ApiResult<DashboardData> {
    tracing::debug!("loading dashboard");

    let (stats, expenses) = join(api.fy_stats(), api.list_expenses()).await;

    let data = DashboardData {
        stats: stats?,
        expenses: expenses?,
    };

    tracing::info!(
        fy = %data.stats.fy,
        expenses = data.expenses.len(),
        "dashboard loaded"
    );
    Ok(data)
}

/// Render-ready dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub fy_label: String,
    pub total: String,
    pub categories: Vec<CategoryRow>,
    pub recent: Vec<ExpenseRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub name: String,
    pub total: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRow {
    pub id: String,
    pub label: String,
    pub amount: String,
    pub date: Option<String>,
    pub category: Option<String>,
}

impl DashboardView {
    pub fn build(data: &DashboardData) -> Self {
        Self {
            fy_label: data.stats.fy.clone(),
            total: format_cents(data.stats.total_cents),
            categories: data.stats.by_category.iter().map(CategoryRow::from).collect(),
            recent: data
                .expenses
                .iter()
                .take(RECENT_LIMIT)
                .map(ExpenseRow::from)
                .collect(),
        }
    }
}

impl From<&CategoryTotal> for CategoryRow {
    fn from(category: &CategoryTotal) -> Self {
        Self {
            name: category.category.clone(),
            total: format_cents(category.total_cents),
        }
    }
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.clone(),
            label: expense_label(expense).to_string(),
            amount: format_cents(expense.amount_cents.unwrap_or(0)),
            date: expense.date.as_deref().and_then(non_blank).map(display_date),
            category: expense.category.as_deref().and_then(non_blank).map(str::to_string),
        }
    }
}

/// Vendor, else description, else [`UNKNOWN_LABEL`]
pub fn expense_label(expense: &Expense) -> &str {
    expense
        .vendor
        .as_deref()
        .and_then(non_blank)
        .or_else(|| expense.description.as_deref().and_then(non_blank))
        .unwrap_or(UNKNOWN_LABEL)
}

/// `2024-08-14` becomes `14 Aug 2024`; anything else is shown as sent
pub fn display_date(raw: &str) -> String {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, CreatedExpense, ExpenseDetails};
    use async_trait::async_trait;

    fn expense(n: usize) -> Expense {
        Expense {
            id: format!("exp-{}", n),
            date: Some("2024-08-14".to_string()),
            amount_cents: Some(1000 + n as i64),
            currency: "AUD".to_string(),
            description: None,
            vendor: Some(format!("Vendor {}", n)),
            category: None,
        }
    }

    fn stats() -> FyStats {
        FyStats {
            fy: "FY24/25".to_string(),
            total_cents: 50000,
            by_category: vec![
                CategoryTotal {
                    category: "Groceries".to_string(),
                    total_cents: 30000,
                },
                CategoryTotal {
                    category: "Fuel".to_string(),
                    total_cents: 20000,
                },
            ],
        }
    }

    #[test]
    fn test_view_truncates_to_first_ten_in_order() {
        let data = DashboardData {
            stats: stats(),
            expenses: (0..12).map(expense).collect(),
        };

        let view = DashboardView::build(&data);

        assert_eq!(view.total, "$500.00");
        assert_eq!(view.recent.len(), RECENT_LIMIT);
        let ids: Vec<_> = view.recent.iter().map(|r| r.id.clone()).collect();
        let expected: Vec<_> = (0..10).map(|n| format!("exp-{}", n)).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_view_lists_exactly_provided_categories() {
        let data = DashboardData {
            stats: stats(),
            expenses: vec![],
        };

        let view = DashboardView::build(&data);

        assert_eq!(
            view.categories,
            vec![
                CategoryRow {
                    name: "Groceries".to_string(),
                    total: "$300.00".to_string()
                },
                CategoryRow {
                    name: "Fuel".to_string(),
                    total: "$200.00".to_string()
                },
            ]
        );
        assert!(view.recent.is_empty());
    }

    #[test]
    fn test_label_fallbacks() {
        let mut e = expense(1);
        assert_eq!(expense_label(&e), "Vendor 1");

        e.vendor = None;
        e.description = Some("Printer paper".to_string());
        assert_eq!(expense_label(&e), "Printer paper");

        e.description = None;
        assert_eq!(expense_label(&e), UNKNOWN_LABEL);

        e.vendor = Some(String::new());
        assert_eq!(expense_label(&e), UNKNOWN_LABEL);
    }

    #[test]
    fn test_row_formatting() {
        let mut e = expense(0);
        e.amount_cents = None;
        e.category = Some("Office".to_string());

        let row = ExpenseRow::from(&e);
        assert_eq!(row.amount, "$0.00");
        assert_eq!(row.date.as_deref(), Some("14 Aug 2024"));
        assert_eq!(row.category.as_deref(), Some("Office"));

        e.category = None;
        e.date = None;
        let row = ExpenseRow::from(&e);
        assert_eq!(row.category, None);
        assert_eq!(row.date, None);
    }

    #[test]
    fn test_display_date_passthrough() {
        assert_eq!(display_date("2025-01-03"), "03 Jan 2025");
        assert_eq!(display_date("last tuesday"), "last tuesday");
    }

    struct StubApi {
        stats: ApiResult<FyStats>,
        expenses: ApiResult<Vec<Expense>>,
    }

    #[async_trait(?Send)]
    impl ExpenseApi for StubApi {
        type Image = ();

        async fn fy_stats(&self) -> ApiResult<FyStats> {
            self.stats.clone()
        }

        async fn list_expenses(&self) -> ApiResult<Vec<Expense>> {
            self.expenses.clone()
        }

        async fn create_expense(
            &self,
            _image: &(),
            _details: &ExpenseDetails,
        ) -> ApiResult<CreatedExpense> {
            unreachable!("dashboard never uploads")
        }
    }

    #[tokio::test]
    async fn test_load_joins_both_payloads() {
        let api = StubApi {
            stats: Ok(stats()),
            expenses: Ok(vec![expense(0), expense(1)]),
        };

        let data = load_dashboard(&api).await.unwrap();
        assert_eq!(data.stats.fy, "FY24/25");
        assert_eq!(data.expenses.len(), 2);
    }

    #[tokio::test]
    async fn test_load_fails_if_either_fails() {
        let api = StubApi {
            stats: Ok(stats()),
            expenses: Err(ApiError::from_status(500, "db down".to_string())),
        };
        assert_eq!(
            load_dashboard(&api).await,
            Err(ApiError::from_status(500, "db down".to_string()))
        );

        let api = StubApi {
            stats: Err(ApiError::Network("offline".to_string())),
            expenses: Ok(vec![]),
        };
        assert!(matches!(load_dashboard(&api).await, Err(ApiError::Network(_))));
    }
}
