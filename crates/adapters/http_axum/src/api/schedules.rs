//! JSON REST handlers for schedule bookkeeping.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use homegraph_engine::{Clock, ScheduleSummary};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body naming the devices whose schedules to touch.
#[derive(Deserialize)]
pub struct ScheduleRequest {
    pub devices: Vec<String>,
}

/// Response for the schedule-processing driver hook.
#[derive(Serialize)]
pub struct ProcessResponse {
    pub fired: usize,
}

/// `POST /api/schedules/view`
pub async fn view<C: Clock>(
    State(state): State<AppState<C>>,
    Json(req): Json<ScheduleRequest>,
) -> Result<Json<ScheduleSummary>, ApiError> {
    let engine = state.engine.lock().await;
    let summary = engine.view_schedules(&req.devices)?;
    Ok(Json(summary))
}

/// `POST /api/schedules/cancel`
pub async fn cancel<C: Clock>(
    State(state): State<AppState<C>>,
    Json(req): Json<ScheduleRequest>,
) -> Result<Json<ScheduleSummary>, ApiError> {
    let mut engine = state.engine.lock().await;
    let summary = engine.cancel_schedules(&req.devices)?;
    Ok(Json(summary))
}

/// `POST /api/schedules/process`
///
/// Entry point for the external time driver: fires every schedule that is
/// due according to the engine clock.
pub async fn process<C: Clock>(
    State(state): State<AppState<C>>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let mut engine = state.engine.lock().await;
    let fired = engine.process_schedules();
    Ok(Json(ProcessResponse { fired: fired.len() }))
}
