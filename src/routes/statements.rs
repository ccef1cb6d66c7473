// Statement handlers: balance sheet and P&L fetch/save per client and
// fiscal year, the previous-year reference panes, and the per-client year
// listing and existence check.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::{BalanceSheet, FiscalYear, ProfitAndLoss};
use crate::state::{self, AppState};

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientYearQuery {
    pub client_id: String,
    pub year: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientQuery {
    pub client_id: String,
}

fn parse_year(token: &str) -> Result<FiscalYear, AppError> {
    FiscalYear::parse(token).ok_or_else(|| {
        AppError::validation(format!("invalid fiscal year '{token}', expected YYYY-YYYY"))
    })
}

async fn require_client(state: &AppState, client_id: &str) -> Result<(), AppError> {
    state::get_client(state, client_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::NotFound("client"))
}

pub async fn balance_sheet_show(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Value>, AppError> {
    let year = parse_year(&query.year)?;
    require_client(&state, &client_id).await?;
    let sheet = state::get_balance_sheet(&state, &client_id, &year.label()).await?;
    Ok(Json(json!({ "success": true, "data": sheet })))
}

pub async fn balance_sheet_save(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
    Query(query): Query<YearQuery>,
    Json(sheet): Json<BalanceSheet>,
) -> Result<Json<Value>, AppError> {
    let year = parse_year(&query.year)?;
    require_client(&state, &client_id).await?;
    let saved = state::save_balance_sheet(&state, &client_id, &year.label(), &sheet).await?;
    Ok(Json(json!({ "success": true, "data": saved })))
}

pub async fn profit_loss_show(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Value>, AppError> {
    let year = parse_year(&query.year)?;
    require_client(&state, &client_id).await?;
    let statement = state::get_profit_loss(&state, &client_id, &year.label()).await?;
    Ok(Json(json!({ "success": true, "data": statement })))
}

pub async fn profit_loss_save(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
    Query(query): Query<YearQuery>,
    Json(statement): Json<ProfitAndLoss>,
) -> Result<Json<Value>, AppError> {
    let year = parse_year(&query.year)?;
    require_client(&state, &client_id).await?;
    let saved = state::save_profit_loss(&state, &client_id, &year.label(), &statement).await?;
    Ok(Json(json!({ "success": true, "data": saved })))
}

/// Reference pane: the previous fiscal year's balance sheet, or null.
pub async fn previous_balance_sheet(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClientYearQuery>,
) -> Result<Json<Value>, AppError> {
    let previous = parse_year(&query.year)?.previous();
    let sheet = state::get_balance_sheet(&state, &query.client_id, &previous.label()).await?;
    Ok(Json(json!({
        "success": true,
        "year": previous.label(),
        "data": sheet
    })))
}

/// Reference pane: the previous fiscal year's trading P&L, or null.
pub async fn previous_trading_pl(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClientYearQuery>,
) -> Result<Json<Value>, AppError> {
    let previous = parse_year(&query.year)?.previous();
    let statement = state::get_profit_loss(&state, &query.client_id, &previous.label()).await?;
    Ok(Json(json!({
        "success": true,
        "year": previous.label(),
        "data": statement
    })))
}

/// Years the history pane shows at once.
const HISTORY_LIMIT: usize = 5;

/// Recent statement activity: the last five years with data, newest first,
/// with existence flags and last-updated stamps per statement.
pub async fn client_years_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClientQuery>,
) -> Result<Json<Value>, AppError> {
    let history = state::statement_history(&state, &query.client_id, HISTORY_LIMIT).await?;
    Ok(Json(json!({ "success": true, "data": history })))
}

pub async fn client_years(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClientQuery>,
) -> Result<Json<Value>, AppError> {
    let years = state::list_statement_years(&state, &query.client_id).await?;
    Ok(Json(json!({ "success": true, "data": years })))
}

/// Existence flags for one `(client, year)` pair. This endpoint never
/// errors: an unknown client or a storage fault both report no data, so the
/// year picker can always render.
pub async fn client_years_check(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClientYearQuery>,
) -> Json<Value> {
    let (balance_sheet, profit_loss) =
        match state::statements_exist(&state, &query.client_id, &query.year).await {
            Ok(flags) => flags,
            Err(err) => {
                log::warn!("existence check failed for {}: {err:?}", query.client_id);
                (false, false)
            }
        };
    Json(json!({
        "success": true,
        "data": { "balance_sheet": balance_sheet, "profit_loss": profit_loss }
    }))
}
