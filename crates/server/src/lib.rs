use axum::{Json, http::StatusCode, response::IntoResponse};
use ledger::LedgerError;

use serde::Serialize;
pub use server::{ServerState, run, run_with_listener, spawn_with_listener};

mod budget;
mod export;
mod server;
mod session;
mod statistics;
mod transactions;

pub mod types {
    pub mod transaction {
        pub use api_types::transaction::{
            TransactionCreated, TransactionListResponse, TransactionNew, TransactionView,
        };
    }

    pub mod stats {
        pub use api_types::stats::{CategoryBreakdown, CategoryTotal, Statistic};
    }

    pub mod budget {
        pub use api_types::budget::{BudgetCheck, BudgetStatus};
    }
}

pub enum ServerError {
    Ledger(LedgerError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_ledger_error(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::InvalidAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LedgerError::Csv(_) | LedgerError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_ledger_error(err: LedgerError) -> String {
    match err {
        LedgerError::Csv(csv_err) => {
            tracing::error!("csv error: {csv_err}");
            "internal server error".to_string()
        }
        LedgerError::Export(export_err) => {
            tracing::error!("export error: {export_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Ledger(err) => {
                (status_for_ledger_error(&err), message_for_ledger_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<LedgerError> for ServerError {
    fn from(value: LedgerError) -> Self {
        Self::Ledger(value)
    }
}
