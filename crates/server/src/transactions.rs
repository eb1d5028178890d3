//! Transactions API endpoints

use api_types::TransactionKind as ApiKind;
use api_types::transaction::{
    TransactionCreated, TransactionListResponse, TransactionNew, TransactionView,
};
use axum::{Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

fn map_kind(kind: ApiKind) -> ledger::TransactionKind {
    match kind {
        ApiKind::Income => ledger::TransactionKind::Income,
        ApiKind::Expense => ledger::TransactionKind::Expense,
    }
}

fn map_kind_back(kind: ledger::TransactionKind) -> ApiKind {
    match kind {
        ledger::TransactionKind::Income => ApiKind::Income,
        ledger::TransactionKind::Expense => ApiKind::Expense,
    }
}

/// Appends a record to the session ledger.
pub async fn add(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionCreated>), ServerError> {
    let tx = ledger::Transaction::new(
        map_kind(payload.kind),
        ledger::Money::new(payload.amount_minor),
        payload.category,
        payload.date,
        payload.description,
    )?;
    let id = tx.id;

    state.ledger.write().await.add(tx);

    Ok((StatusCode::CREATED, Json(TransactionCreated { id })))
}

/// Returns the transaction history, newest date first.
///
/// Storage stays insertion-ordered; the descending sort is display-only.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let ledger = state.ledger.read().await;

    let mut transactions: Vec<TransactionView> = ledger
        .transactions()
        .iter()
        .map(|tx| TransactionView {
            id: tx.id,
            amount_minor: tx.amount.cents(),
            category: tx.category.clone(),
            kind: map_kind_back(tx.kind),
            date: tx.date,
            description: tx.description.clone(),
        })
        .collect();
    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(Json(TransactionListResponse { transactions }))
}
