//! In-memory ledger for a single tracking session.
//!
//! The ledger is an insertion-ordered, append-only sequence of transactions
//! with a handful of derived views: income/expense/balance totals, per-category
//! expense totals, the current month's spending, and a CSV export. It is
//! created empty at session start and discarded when the session ends; nothing
//! is persisted.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

pub use error::LedgerError;
pub use export::{EXPORT_FILE_NAME, export_csv};
pub use money::Money;
pub use transactions::{Row, Transaction, TransactionKind};

mod error;
mod export;
mod money;
mod transactions;

type ResultLedger<T> = Result<T, LedgerError>;

/// Income/expense totals for the whole session.
///
/// `balance` is always exactly `total_income - total_expense`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
}

/// The session's transaction log.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. Always succeeds; no duplicate detection and no
    /// capacity limit.
    pub fn add(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// All records in insertion order. Display-time ordering (the UI sorts by
    /// date descending) is the presentation layer's concern.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Income/expense/balance totals. Returns all zeros on an empty ledger.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let (income, expense) =
            self.transactions
                .iter()
                .fold((Money::ZERO, Money::ZERO), |acc, tx| match tx.kind {
                    TransactionKind::Income => (acc.0 + tx.amount, acc.1),
                    TransactionKind::Expense => (acc.0, acc.1 + tx.amount),
                });

        Summary {
            total_income: income,
            total_expense: expense,
            balance: income - expense,
        }
    }

    /// Per-category totals over Expense records only.
    ///
    /// Categories group by exact string equality: no trimming, no case
    /// folding. Entry order in the result is not significant.
    #[must_use]
    pub fn expense_by_category(&self) -> HashMap<String, Money> {
        let mut totals = HashMap::new();
        for tx in &self.transactions {
            if tx.kind == TransactionKind::Expense {
                *totals.entry(tx.category.clone()).or_insert(Money::ZERO) += tx.amount;
            }
        }
        totals
    }

    /// Sum of Expense amounts dated in the same calendar month and year as
    /// `reference_date`.
    #[must_use]
    pub fn monthly_expense(&self, reference_date: NaiveDate) -> Money {
        self.transactions
            .iter()
            .filter(|tx| {
                tx.kind == TransactionKind::Expense
                    && tx.date.year() == reference_date.year()
                    && tx.date.month() == reference_date.month()
            })
            .fold(Money::ZERO, |acc, tx| acc + tx.amount)
    }

    /// Discards every record, returning the ledger to its session-start state.
    pub fn clear(&mut self) {
        self.transactions.clear();
    }
}
