//! JSON API route assembly.

use axum::Router;
use axum::routing::post;

use homegraph_engine::Clock;

use crate::state::AppState;

pub mod commands;
pub mod devices;
pub mod schedules;

/// Build the `/api` sub-router.
pub fn routes<C: Clock>() -> Router<AppState<C>> {
    Router::new()
        .route("/run", post(commands::run::<C>))
        .route("/details", post(devices::details::<C>))
        .route("/schedules/view", post(schedules::view::<C>))
        .route("/schedules/cancel", post(schedules::cancel::<C>))
        .route("/schedules/process", post(schedules::process::<C>))
}
