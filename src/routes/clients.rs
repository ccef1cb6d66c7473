// Client registry handlers: list/create/fetch/update/delete plus the
// full-database reset.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use slug::slugify;

use crate::error::AppError;
use crate::state::{self, AppState, ClientInput};

pub async fn clients_index(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let clients = state::list_clients(&state).await?;
    Ok(Json(json!({ "success": true, "data": clients })))
}

pub async fn clients_create(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ClientInput>,
) -> Result<Json<Value>, AppError> {
    let id = slugify(input.name.trim());
    if id.is_empty() {
        return Err(AppError::validation("client name is required"));
    }
    if state::get_client(&state, &id).await?.is_some() {
        return Err(AppError::Conflict(format!("client '{id}' already exists")));
    }

    let client = state::create_client(&state, input).await?;
    Ok(Json(json!({ "success": true, "data": client })))
}

pub async fn clients_show(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let client = state::get_client(&state, &client_id)
        .await?
        .ok_or(AppError::NotFound("client"))?;
    Ok(Json(json!({ "success": true, "data": client })))
}

pub async fn clients_update(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
    Json(input): Json<ClientInput>,
) -> Result<Json<Value>, AppError> {
    let updated = state::update_client(&state, &client_id, input)
        .await?
        .ok_or(AppError::NotFound("client"))?;
    Ok(Json(json!({ "success": true, "data": updated })))
}

pub async fn clients_delete(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    if state::get_client(&state, &client_id).await?.is_none() {
        return Err(AppError::NotFound("client"));
    }
    state::delete_client_cascade(&state, &client_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "client and all associated data deleted"
    })))
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let removed = state::reset_all(&state).await?;
    Ok(Json(json!({
        "success": true,
        "message": format!("removed {removed} clients and all associated data")
    })))
}
