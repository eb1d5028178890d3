//! Transaction primitives.
//!
//! A `Transaction` is one income or expense entry. Records are immutable once
//! created; there is no update or void operation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, Money, ResultLedger};

/// Distinguishes money received from money spent.
///
/// Serialized with the variant name (`"Income"` / `"Expense"`), which is also
/// the label used in CSV rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Income" => Ok(Self::Income),
            "Expense" => Ok(Self::Expense),
            other => Err(LedgerError::InvalidAmount(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub description: String,
}

impl Transaction {
    /// Creates a new record.
    ///
    /// The amount must be strictly positive; the kind carries the sign
    /// semantics. Category and description are free text and may be empty.
    pub fn new(
        kind: TransactionKind,
        amount: Money,
        category: String,
        date: NaiveDate,
        description: String,
    ) -> ResultLedger<Self> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount("amount must be > 0".to_string()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            category,
            date,
            description,
        })
    }
}

/// Flat row representation with the fixed export/table columns.
///
/// Field order matches the CSV header: `Amount,Category,Type,Date,Description`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl From<&Transaction> for Row {
    fn from(tx: &Transaction) -> Self {
        Self {
            amount: tx.amount.to_string(),
            category: tx.category.clone(),
            kind: tx.kind.as_str().to_string(),
            date: tx.date.format("%Y-%m-%d").to_string(),
            description: tx.description.clone(),
        }
    }
}
