//! Space config API route handlers.
//!
//! Serves space configs as JSON for client-side tooling (storefront preview,
//! admin UIs). These endpoints expose the same configs the resolver uses, so
//! what a client sees here is exactly what the server renders.

use axum::{
    Json,
    extract::{Path, State},
};
use merchspace_core::{Space, SpaceId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// List all configured spaces as JSON.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Space>> {
    let spaces = state
        .registry()
        .list()
        .await
        .iter()
        .map(|space| space.as_ref().clone())
        .collect();
    Json(spaces)
}

/// Fetch a single space config as JSON.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Space>> {
    let space_id = SpaceId::parse(&id)
        .map_err(|_| AppError::NotFound(format!("Space '{id}' not found")))?;

    if space_id.is_default() {
        return Ok(Json(state.registry().default_space().await.as_ref().clone()));
    }

    match state.registry().get(&space_id).await {
        Some(space) => Ok(Json(space.as_ref().clone())),
        None => Err(AppError::NotFound(format!("Space '{id}' not found"))),
    }
}
