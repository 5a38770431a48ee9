//! JSON REST handler for the `run` operation.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use homegraph_engine::{ActionSummary, Clock};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for running an operation.
#[derive(Deserialize)]
pub struct RunRequest {
    pub devices: Vec<String>,
    pub op: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub delay: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

/// `POST /api/run`
pub async fn run<C: Clock>(
    State(state): State<AppState<C>>,
    Json(req): Json<RunRequest>,
) -> Result<Json<ActionSummary>, ApiError> {
    let mut engine = state.engine.lock().await;
    let summary = engine.run(
        &req.devices,
        &req.op,
        &req.values,
        req.delay.as_deref(),
        req.duration.as_deref(),
    )?;
    Ok(Json(summary))
}
