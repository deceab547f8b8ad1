use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::estimate::{estimate, Estimate};
use crate::models::Project;
use crate::storage::{Entity, EntityId};
use crate::state::AppState;

/// `GET /api/projects/{id}/estimate`
///
/// # Errors
///
/// 400 for a non-numeric id, 404 for an unknown project.
pub async fn project_estimate(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<Estimate>, ApiError> {
    let Path(id) = id.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let project = state
        .projects
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: Project::NAME,
        })?;

    Ok(Json(estimate(project.project_id, &project.description)))
}
