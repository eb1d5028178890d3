use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};
use tokio::sync::RwLock;

use std::sync::Arc;

use crate::{budget, export, session, statistics, transactions};
use ledger::Ledger;

static ACCESS_KEY_HEADER: axum::http::HeaderName =
    axum::http::HeaderName::from_static("x-access-key");

#[derive(Clone)]
pub struct ServerState {
    pub ledger: Arc<RwLock<Ledger>>,
    pub access_key: Arc<str>,
}

impl ServerState {
    /// Creates the state for a fresh session: an empty ledger and the shared
    /// secret gating every route.
    pub fn new(ledger: Ledger, access_key: &str) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            access_key: Arc::from(access_key),
        }
    }
}

/// `TypedHeader` for the access gate.
///
/// Requests must carry the shared secret in the "x-access-key" header.
#[derive(Debug)]
struct AccessKey(String);

impl Header for AccessKey {
    fn name() -> &'static axum::http::HeaderName {
        &ACCESS_KEY_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };

        Ok(AccessKey(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-access-key header"),
        }
    }
}

/// Plaintext shared-secret gate.
///
/// A missing or mismatched key short-circuits with 401 before any ledger
/// operation runs. Deliberately a toy check: no hashing, no lockout, no rate
/// limiting.
async fn auth(
    access_key: Option<TypedHeader<AccessKey>>,
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(AccessKey(key))) = access_key else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    if key != *state.access_key {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/transactions", post(transactions::add).get(transactions::list))
        .route("/stats", get(statistics::get_stats))
        .route("/stats/categories", get(statistics::get_categories))
        .route("/budget/check", post(budget::check))
        .route("/export", get(export::download))
        .route("/session", delete(session::reset))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run(ledger: Ledger, access_key: &str) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(ledger, access_key, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    ledger: Ledger,
    access_key: &str,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState::new(ledger, access_key);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    ledger: Ledger,
    access_key: String,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(ledger, &access_key, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, header},
    };
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    use crate::types::{
        budget::BudgetStatus,
        stats::{CategoryBreakdown, Statistic},
        transaction::{TransactionCreated, TransactionListResponse},
    };

    const KEY: &str = "1234";

    fn test_router() -> Router {
        router(ServerState::new(Ledger::new(), KEY))
    }

    fn request(method: &str, uri: &str, body: Option<serde_json::Value>) -> HttpRequest<Body> {
        let builder = HttpRequest::builder()
            .method(method)
            .uri(uri)
            .header("x-access-key", KEY)
            .header(header::CONTENT_TYPE, "application/json");

        match body {
            Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn new_transaction(kind: &str, amount_minor: i64, category: &str, date: &str) -> serde_json::Value {
        json!({
            "amount_minor": amount_minor,
            "category": category,
            "kind": kind,
            "date": date,
            "description": "",
        })
    }

    #[tokio::test]
    async fn missing_access_key_is_rejected() {
        let response = test_router()
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri("/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_access_key_is_rejected() {
        let response = test_router()
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri("/stats")
                    .header("x-access-key", "wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn add_then_stats_reports_totals() {
        let app = test_router();

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/transactions",
                Some(new_transaction("Income", 100_00, "Food", "2024-01-05")),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let _created: TransactionCreated = body_json(response).await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/transactions",
                Some(new_transaction("Expense", 40_00, "Food", "2024-01-10")),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.oneshot(request("GET", "/stats", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stats: Statistic = body_json(response).await;
        assert_eq!(stats.total_income_minor, 100_00);
        assert_eq!(stats.total_expenses_minor, 40_00);
        assert_eq!(stats.balance_minor, 60_00);
    }

    #[tokio::test]
    async fn non_positive_amount_is_unprocessable() {
        let response = test_router()
            .oneshot(request(
                "POST",
                "/transactions",
                Some(new_transaction("Expense", 0, "Food", "2024-01-10")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn list_sorts_by_date_descending() {
        let app = test_router();

        for (kind, amount, category, date) in [
            ("Expense", 10_00, "Food", "2024-01-01"),
            ("Expense", 20_00, "Rent", "2024-03-01"),
            ("Income", 30_00, "Salary", "2024-02-01"),
        ] {
            let response = app
                .clone()
                .oneshot(request(
                    "POST",
                    "/transactions",
                    Some(new_transaction(kind, amount, category, date)),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .oneshot(request("GET", "/transactions", None))
            .await
            .unwrap();
        let list: TransactionListResponse = body_json(response).await;
        let dates: Vec<String> = list
            .transactions
            .iter()
            .map(|tx| tx.date.to_string())
            .collect();
        assert_eq!(dates, ["2024-03-01", "2024-02-01", "2024-01-01"]);
    }

    #[tokio::test]
    async fn category_breakdown_sums_expenses_only() {
        let app = test_router();

        for (kind, amount, category) in [
            ("Income", 100_00, "Rent"),
            ("Expense", 500_00, "Rent"),
            ("Expense", 300_00, "Rent"),
            ("Expense", 40_00, "Food"),
        ] {
            let response = app
                .clone()
                .oneshot(request(
                    "POST",
                    "/transactions",
                    Some(new_transaction(kind, amount, category, "2024-01-10")),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .oneshot(request("GET", "/stats/categories", None))
            .await
            .unwrap();
        let breakdown: CategoryBreakdown = body_json(response).await;

        assert_eq!(breakdown.categories.len(), 2);
        let rent = breakdown
            .categories
            .iter()
            .find(|c| c.category == "Rent")
            .unwrap();
        assert_eq!(rent.total_minor, 800_00);
    }

    #[tokio::test]
    async fn budget_check_uses_current_month() {
        let app = test_router();
        let today = chrono::Local::now().date_naive();

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/transactions",
                Some(new_transaction(
                    "Expense",
                    1200_00,
                    "Rent",
                    &today.to_string(),
                )),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(request(
                "POST",
                "/budget/check",
                Some(json!({ "budget_minor": 1000_00 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let status: BudgetStatus = body_json(response).await;
        assert_eq!(status.spent_minor, 1200_00);
        assert_eq!(status.budget_minor, 1000_00);
        assert!(status.over_budget);
    }

    #[tokio::test]
    async fn budget_check_within_threshold() {
        let response = test_router()
            .oneshot(request(
                "POST",
                "/budget/check",
                Some(json!({ "budget_minor": 1000_00 })),
            ))
            .await
            .unwrap();

        let status: BudgetStatus = body_json(response).await;
        assert_eq!(status.spent_minor, 0);
        assert!(!status.over_budget);
    }

    #[tokio::test]
    async fn export_offers_csv_attachment() {
        let app = test_router();

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/transactions",
                Some(new_transaction("Expense", 40_00, "Food", "2024-01-10")),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.oneshot(request("GET", "/export", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"finance_data.csv\""
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Amount,Category,Type,Date,Description"));
        assert_eq!(lines.next(), Some("40.00,Food,Expense,2024-01-10,"));
    }

    #[tokio::test]
    async fn session_reset_discards_the_ledger() {
        let app = test_router();

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/transactions",
                Some(new_transaction("Income", 100_00, "Salary", "2024-01-05")),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(request("DELETE", "/session", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(request("GET", "/stats", None)).await.unwrap();
        let stats: Statistic = body_json(response).await;
        assert_eq!(stats.total_income_minor, 0);
        assert_eq!(stats.total_expenses_minor, 0);
        assert_eq!(stats.balance_minor, 0);
    }
}
