//! Monthly budget monitor endpoint

use api_types::budget::{BudgetCheck, BudgetStatus};
use axum::{Json, extract::State};
use chrono::Local;

use crate::{ServerError, server::ServerState};

/// Compares the current calendar month's expenses against the submitted
/// threshold.
///
/// The reference month is the real-world month at request time, not a month
/// derived from the data being viewed. Plain greater-than check, no rollover.
pub async fn check(
    State(state): State<ServerState>,
    Json(payload): Json<BudgetCheck>,
) -> Result<Json<BudgetStatus>, ServerError> {
    let today = Local::now().date_naive();

    let ledger = state.ledger.read().await;
    let spent = ledger.monthly_expense(today);

    Ok(Json(BudgetStatus {
        budget_minor: payload.budget_minor,
        spent_minor: spent.cents(),
        over_budget: spent.cents() > payload.budget_minor,
    }))
}
