//! HTTP routes.
//!
//! - `/health`, `/metrics` and `/api/login` are public
//! - everything else under `/api` requires a bearer token

mod estimate;
mod health;
mod resources;

pub use estimate::project_estimate;
pub use health::{health_check, metrics_handler};
pub use resources::Resource;

use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::{authenticate_token, login};
use crate::models::{Assignment, Employee, Project, User};
use crate::state::AppState;

/// Create the application router.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    let protected = Router::new()
        .merge(resources::routes::<User>())
        .merge(resources::routes::<Project>())
        .merge(resources::routes::<Employee>())
        .merge(resources::routes::<Assignment>())
        .route("/api/projects/{id}/estimate", get(project_estimate))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate_token));

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/login", post(login))
        .merge(protected)
        .layer(timeout_layer(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Answers 408 when a request outlives `request_timeout`.
fn timeout_layer(request_timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout)
}
