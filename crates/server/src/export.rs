//! CSV export endpoint

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use ledger::EXPORT_FILE_NAME;

use crate::{ServerError, server::ServerState};

/// Serves the ledger as a downloadable CSV artifact.
///
/// An empty ledger still succeeds and yields a header-only file.
pub async fn download(State(state): State<ServerState>) -> Result<Response, ServerError> {
    let ledger = state.ledger.read().await;
    let data = ledger::export_csv(&ledger)?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
        ),
    ];

    Ok((headers, data).into_response())
}
