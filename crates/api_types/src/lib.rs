use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transaction kind as it travels on the wire.
///
/// Serialized with the variant name (`"Income"` / `"Expense"`), the same
/// labels the CSV export uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

pub mod transaction {
    use super::*;

    /// Request body for adding a record.
    ///
    /// Amounts are integer cents (`*_minor`); the server rejects non-positive
    /// values with 422.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub amount_minor: i64,
        pub category: String,
        pub kind: TransactionKind,
        /// Calendar date, `YYYY-MM-DD`. No time-of-day, no timezone.
        pub date: NaiveDate,
        #[serde(default)]
        pub description: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub id: Uuid,
    }

    /// One record as rendered in the history view.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub amount_minor: i64,
        pub category: String,
        pub kind: TransactionKind,
        pub date: NaiveDate,
        pub description: String,
    }

    /// History response, sorted by date descending for display.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Statistic {
        pub total_income_minor: i64,
        pub total_expenses_minor: i64,
        pub balance_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryTotal {
        pub category: String,
        pub total_minor: i64,
    }

    /// Expense totals per category. Entry order is not significant.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryBreakdown {
        pub categories: Vec<CategoryTotal>,
    }
}

pub mod budget {
    use super::*;

    /// Request body for the monthly budget check.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetCheck {
        /// Threshold in cents. Clients default to 1000.00.
        pub budget_minor: i64,
    }

    /// Outcome of comparing the current calendar month's expenses against the
    /// threshold. `over_budget` is a plain greater-than check.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetStatus {
        pub budget_minor: i64,
        pub spent_minor: i64,
        pub over_budget: bool,
    }
}
