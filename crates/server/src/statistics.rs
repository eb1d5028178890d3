//! Statistics API endpoints

use api_types::stats::{CategoryBreakdown, CategoryTotal, Statistic};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

/// Handle requests for the session totals.
pub async fn get_stats(
    State(state): State<ServerState>,
) -> Result<Json<Statistic>, ServerError> {
    let ledger = state.ledger.read().await;
    let summary = ledger.summary();

    Ok(Json(Statistic {
        total_income_minor: summary.total_income.cents(),
        total_expenses_minor: summary.total_expense.cents(),
        balance_minor: summary.balance.cents(),
    }))
}

/// Handle requests for the per-category expense breakdown.
pub async fn get_categories(
    State(state): State<ServerState>,
) -> Result<Json<CategoryBreakdown>, ServerError> {
    let ledger = state.ledger.read().await;

    let categories = ledger
        .expense_by_category()
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category,
            total_minor: total.cents(),
        })
        .collect();

    Ok(Json(CategoryBreakdown { categories }))
}
