//! Session lifecycle endpoint

use axum::{extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

/// Discards the session ledger, returning it to its empty start state.
///
/// Individual records are never deleted; teardown is all-or-nothing.
pub async fn reset(State(state): State<ServerState>) -> Result<StatusCode, ServerError> {
    state.ledger.write().await.clear();

    Ok(StatusCode::NO_CONTENT)
}
