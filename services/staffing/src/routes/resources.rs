//! CRUD handlers shared by every resource.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::error::ApiError;
use crate::models::{
    Assignment, AssignmentDraft, AssignmentFilter, Employee, Project, ProjectDraft,
    ProjectFilter, User, UserDraft, Validate,
};
use crate::state::AppState;
use crate::storage::{Entity, EntityId, Repository};

/// An [`Entity`] exposed under `/api/{COLLECTION}`.
#[async_trait]
pub trait Resource: Entity {
    /// Path segment of the collection.
    const COLLECTION: &'static str;

    /// Repository holding this resource.
    fn repository(state: &AppState) -> &Arc<dyn Repository<Self>>;

    /// Check that ids referenced by a draft exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] naming the dangling reference.
    async fn check_references(_state: &AppState, _draft: &Self::Draft) -> Result<(), ApiError> {
        Ok(())
    }

    /// Check that a draft stored under `id` (or a fresh id when `None`)
    /// does not clash with another value.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] naming the clash.
    async fn check_unique(
        _state: &AppState,
        _id: Option<EntityId>,
        _draft: &Self::Draft,
    ) -> Result<(), ApiError> {
        Ok(())
    }

    /// Check that nothing still references the value with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] naming the first referrer.
    async fn check_removal(_state: &AppState, _id: EntityId) -> Result<(), ApiError> {
        Ok(())
    }
}

#[async_trait]
impl Resource for User {
    const COLLECTION: &'static str = "users";

    fn repository(state: &AppState) -> &Arc<dyn Repository<Self>> {
        &state.users
    }

    async fn check_unique(
        state: &AppState,
        id: Option<EntityId>,
        draft: &UserDraft,
    ) -> Result<(), ApiError> {
        match state.credentials.find_by_username(&draft.username).await? {
            Some(existing) if Some(existing.user_id) != id => Err(ApiError::bad_request(format!(
                "Username {} is already taken",
                draft.username
            ))),
            _ => Ok(()),
        }
    }

    async fn check_removal(state: &AppState, id: EntityId) -> Result<(), ApiError> {
        let filter = ProjectFilter {
            user_id: Some(id),
            ..ProjectFilter::default()
        };
        match state.projects.find_all(&filter).await?.first() {
            Some(project) => Err(still_referenced::<User>(id, Project::NAME, project.project_id)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Resource for Project {
    const COLLECTION: &'static str = "projects";

    fn repository(state: &AppState) -> &Arc<dyn Repository<Self>> {
        &state.projects
    }

    async fn check_references(state: &AppState, draft: &ProjectDraft) -> Result<(), ApiError> {
        ensure_exists(&state.users, draft.user_id).await
    }

    async fn check_removal(state: &AppState, id: EntityId) -> Result<(), ApiError> {
        ensure_unassigned::<Project>(state, id, |assignment| assignment.project_id).await
    }
}

#[async_trait]
impl Resource for Employee {
    const COLLECTION: &'static str = "employees";

    fn repository(state: &AppState) -> &Arc<dyn Repository<Self>> {
        &state.employees
    }

    async fn check_removal(state: &AppState, id: EntityId) -> Result<(), ApiError> {
        ensure_unassigned::<Employee>(state, id, |assignment| assignment.employee_id).await
    }
}

#[async_trait]
impl Resource for Assignment {
    const COLLECTION: &'static str = "assignments";

    fn repository(state: &AppState) -> &Arc<dyn Repository<Self>> {
        &state.assignments
    }

    async fn check_references(state: &AppState, draft: &AssignmentDraft) -> Result<(), ApiError> {
        ensure_exists(&state.projects, draft.project_id).await?;
        ensure_exists(&state.employees, draft.employee_id).await
    }
}

async fn ensure_exists<E: Entity>(
    repository: &Arc<dyn Repository<E>>,
    id: EntityId,
) -> Result<(), ApiError> {
    if repository.find_by_id(id).await?.is_some() {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!("{} {id} does not exist", E::NAME)))
    }
}

fn still_referenced<E: Entity>(id: EntityId, referrer: &str, referrer_id: EntityId) -> ApiError {
    ApiError::bad_request(format!(
        "{} {id} is still referenced by {referrer} {referrer_id}",
        E::NAME
    ))
}

async fn ensure_unassigned<E: Entity>(
    state: &AppState,
    id: EntityId,
    key: fn(&Assignment) -> EntityId,
) -> Result<(), ApiError> {
    let assignments = state.assignments.find_all(&AssignmentFilter::default()).await?;
    match assignments.iter().find(|assignment| key(assignment) == id) {
        Some(assignment) => Err(still_referenced::<E>(
            id,
            Assignment::NAME,
            assignment.assignment_id,
        )),
        None => Ok(()),
    }
}

/// Collection and item routes for `R`.
pub fn routes<R: Resource>() -> Router<AppState> {
    let collection = format!("/api/{}", R::COLLECTION);
    let item = format!("{collection}/{{id}}");

    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>))
        .route(&item, get(find::<R>).put(update::<R>).delete(remove::<R>))
}

fn path_id(id: Result<Path<EntityId>, PathRejection>) -> Result<EntityId, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

async fn parse_draft<R: Resource>(
    state: &AppState,
    id: Option<EntityId>,
    body: Result<Json<R::Draft>, JsonRejection>,
) -> Result<R::Draft, ApiError> {
    let Json(draft) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    draft.validate().map_err(ApiError::BadRequest)?;
    R::check_references(state, &draft).await?;
    R::check_unique(state, id, &draft).await?;
    Ok(draft)
}

async fn list<R: Resource>(
    State(state): State<AppState>,
    query: Result<Query<R::Filter>, QueryRejection>,
) -> Result<Json<Vec<R>>, ApiError> {
    let Query(filter) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    Ok(Json(R::repository(&state).find_all(&filter).await?))
}

async fn find<R: Resource>(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<R>, ApiError> {
    let id = path_id(id)?;
    R::repository(&state)
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { resource: R::NAME })
}

async fn create<R: Resource>(
    State(state): State<AppState>,
    body: Result<Json<R::Draft>, JsonRejection>,
) -> Result<(StatusCode, Json<R>), ApiError> {
    let draft = parse_draft::<R>(&state, None, body).await?;
    let created = R::repository(&state).create(draft).await?;

    info!(resource = R::NAME, id = created.id(), "Created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update<R: Resource>(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
    body: Result<Json<R::Draft>, JsonRejection>,
) -> Result<Json<R>, ApiError> {
    let id = path_id(id)?;
    let draft = parse_draft::<R>(&state, Some(id), body).await?;

    let updated = R::repository(&state)
        .update(id, draft)
        .await?
        .ok_or(ApiError::NotFound { resource: R::NAME })?;

    info!(resource = R::NAME, id, "Updated");
    Ok(Json(updated))
}

async fn remove<R: Resource>(
    State(state): State<AppState>,
    id: Result<Path<EntityId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(id)?;
    R::check_removal(&state, id).await?;
    if R::repository(&state).delete(id).await? {
        info!(resource = R::NAME, id, "Deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound { resource: R::NAME })
    }
}
