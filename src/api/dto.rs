//! Data Transfer Objects
//!
//! Request and response shapes owned by the backend.

use serde::Deserialize;

// ============================================
// READ DTOs
// ============================================

/// Expense record from `GET /expenses`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Expense {
    pub id: String,
    /// ISO date (`YYYY-MM-DD`) when known
    #[serde(default)]
    pub date: Option<String>,
    /// Amount in cents; the backend leaves it null when OCR found none
    #[serde(default)]
    pub amount_cents: Option<i64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

fn default_currency() -> String {
    "AUD".to_string()
}

/// Financial-year summary from `GET /stats/fy`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FyStats {
    /// Period label, e.g. "FY24/25"
    pub fy: String,
    pub total_cents: i64,
    #[serde(default)]
    pub by_category: Vec<CategoryTotal>,
}

/// One row of the per-category breakdown
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_cents: i64,
}

// ============================================
// CREATE DTOs
// ============================================

/// Success body of `POST /expenses`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedExpense {
    pub id: String,
}

/// Optional fields sent alongside the receipt image.
///
/// The backend prefers these over values it extracts from the image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseDetails {
    pub vendor: Option<String>,
    pub description: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub amount_cents: Option<i64>,
    pub category: Option<String>,
}

impl ExpenseDetails {
    /// Multipart fields for the populated values, in a stable order
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();

        if let Some(vendor) = &self.vendor {
            fields.push(("vendor", vendor.clone()));
        }
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        if let Some(date) = &self.date {
            fields.push(("date", date.clone()));
        }
        if let Some(amount) = self.amount_cents {
            fields.push(("amount_cents", amount.to_string()));
        }
        if let Some(category) = &self.category {
            fields.push(("category", category.clone()));
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_with_nulls() {
        let json = r#"{
            "id": "3f2b",
            "date": null,
            "amount_cents": null,
            "currency": "AUD",
            "description": null,
            "vendor": null,
            "category": null
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id, "3f2b");
        assert_eq!(expense.amount_cents, None);
        assert_eq!(expense.vendor, None);
    }

    #[test]
    fn test_fy_stats_preserves_category_order() {
        let json = r#"{
            "fy": "FY24/25",
            "total_cents": 50000,
            "by_category": [
                {"category": "Groceries", "total_cents": 30000},
                {"category": "Fuel", "total_cents": 20000}
            ]
        }"#;

        let stats: FyStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.fy, "FY24/25");
        let names: Vec<_> = stats.by_category.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Groceries", "Fuel"]);
    }

    #[test]
    fn test_form_fields_skip_missing() {
        let details = ExpenseDetails {
            vendor: Some("Bunnings".to_string()),
            amount_cents: Some(4599),
            ..Default::default()
        };

        assert_eq!(
            details.form_fields(),
            vec![("vendor", "Bunnings".to_string()), ("amount_cents", "4599".to_string())]
        );
        assert!(ExpenseDetails::default().form_fields().is_empty());
    }
}
