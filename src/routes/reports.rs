// Export handlers: the three-page PDF and the two-worksheet xlsx workbook
// for one `(client, year)` pair.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::config::ReportSettings;
use crate::error::AppError;
use crate::models::{BalanceSheet, Client, FiscalYear, ProfitAndLoss};
use crate::report::{self, statement, xlsx};
use crate::state::{self, AppState};

#[derive(Debug, Deserialize, Default)]
pub struct PreviewQuery {
    #[serde(default)]
    pub preview: Option<String>,
}

async fn load_pair(
    state: &AppState,
    client_id: &str,
    year: &str,
) -> Result<(Client, Option<BalanceSheet>, Option<ProfitAndLoss>), AppError> {
    let fiscal = FiscalYear::parse(year).ok_or_else(|| {
        AppError::validation(format!("invalid fiscal year '{year}', expected YYYY-YYYY"))
    })?;
    let client = state::get_client(state, client_id)
        .await?
        .ok_or(AppError::NotFound("client"))?;
    let sheet = state::get_balance_sheet(state, client_id, &fiscal.label()).await?;
    let statement = state::get_profit_loss(state, client_id, &fiscal.label()).await?;
    Ok((client, sheet, statement))
}

pub async fn pdf_export(
    State(state): State<Arc<AppState>>,
    Path((client_id, year)): Path<(String, String)>,
    Query(query): Query<PreviewQuery>,
) -> Result<Response, AppError> {
    let (client, sheet, pl) = load_pair(&state, &client_id, &year).await?;
    let settings = ReportSettings::from_env();

    let pages = statement::compose(&client, &year, sheet.as_ref(), pl.as_ref(), &settings);
    let bytes = report::pdf::render(&pages).map_err(|err| AppError::Rendering(err.to_string()))?;

    let preview = query.preview.as_deref() == Some("true");
    let disposition = if preview { "inline" } else { "attachment" };
    let filename = report::export_filename(&year, "pdf");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("{disposition}; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

pub async fn excel_export(
    State(state): State<Arc<AppState>>,
    Path((client_id, year)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let (client, sheet, pl) = load_pair(&state, &client_id, &year).await?;
    let settings = ReportSettings::from_env();

    let bytes = xlsx::workbook(&client, &year, sheet.as_ref(), pl.as_ref(), &settings)
        .map_err(|err| AppError::Rendering(err.to_string()))?;

    let filename = report::export_filename(&year, "xlsx");
    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
