//! JSON REST handler for device state snapshots.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use homegraph_engine::{Clock, DetailsResult};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body naming the devices to read.
#[derive(Deserialize)]
pub struct DetailsRequest {
    pub devices: Vec<String>,
}

/// `POST /api/details`
pub async fn details<C: Clock>(
    State(state): State<AppState<C>>,
    Json(req): Json<DetailsRequest>,
) -> Result<Json<DetailsResult>, ApiError> {
    let engine = state.engine.lock().await;
    let result = engine.details(&req.devices)?;
    Ok(Json(result))
}
