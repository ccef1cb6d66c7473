pub mod config;
pub mod error;
pub mod finance;
pub mod models;
pub mod report;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use state::AppState;

/// Builds the full API router. Shared with the integration tests, which
/// drive it through `tower::ServiceExt` instead of a listening socket.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/clients",
            get(routes::clients_index).post(routes::clients_create),
        )
        .route(
            "/api/clients/{clientId}",
            get(routes::clients_show)
                .put(routes::clients_update)
                .delete(routes::clients_delete),
        )
        .route(
            "/api/clients/{clientId}/balance-sheet",
            get(routes::balance_sheet_show).post(routes::balance_sheet_save),
        )
        .route(
            "/api/clients/{clientId}/profit-loss",
            get(routes::profit_loss_show).post(routes::profit_loss_save),
        )
        .route("/api/previous-balance-sheet", get(routes::previous_balance_sheet))
        .route("/api/previous-trading-pl", get(routes::previous_trading_pl))
        .route("/api/client-years", get(routes::client_years))
        .route("/api/client-years/check", get(routes::client_years_check))
        .route("/api/client-years/history", get(routes::client_years_history))
        .route("/api/reports/pdf/{clientId}/{year}", get(routes::pdf_export))
        .route("/api/reports/excel/{clientId}/{year}", get(routes::excel_export))
        .route("/api/reset", post(routes::reset))
        .with_state(state)
}
