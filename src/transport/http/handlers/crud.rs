//! Generic list / get / create / update / delete handlers.
//!
//! Mounted once per entity by the router; `E` decides table, key type and
//! request body.

use crate::domain::model::Entity;
use crate::transport::http::error::{ApiError, ApiResult};
use crate::transport::http::types::{AppState, MessageResponse};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list_handler<E: Entity>(State(state): State<AppState>) -> ApiResult<Json<Vec<E>>> {
    let records = state.db_service.repository::<E>().list().await?;
    Ok(Json(records))
}

pub async fn get_handler<E: Entity>(
    State(state): State<AppState>,
    id: Result<Path<E::Id>, PathRejection>,
) -> ApiResult<Json<E>> {
    let Path(id) = id?;
    let record = state.db_service.repository::<E>().get(id).await?;
    Ok(Json(record))
}

pub async fn create_handler<E: Entity>(
    State(state): State<AppState>,
    request: Result<Json<E::Input>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<E>)> {
    let Json(input) = request?;
    let record = state.db_service.repository::<E>().create(&input).await?;
    tracing::info!(table = E::TABLE, "record created");
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_handler<E: Entity>(
    State(state): State<AppState>,
    id: Result<Path<E::Id>, PathRejection>,
    request: Result<Json<E::Input>, JsonRejection>,
) -> ApiResult<Json<E>> {
    let Path(id) = id?;
    let Json(input) = request?;
    if let Some(body_key) = E::body_key(&input) {
        let path_key = id.to_string();
        if body_key != path_key {
            return Err(ApiError::Validation(format!(
                "Body id {} does not match path id {}",
                body_key, path_key
            )));
        }
    }
    let record = state.db_service.repository::<E>().update(id, &input).await?;
    Ok(Json(record))
}

pub async fn delete_handler<E: Entity>(
    State(state): State<AppState>,
    id: Result<Path<E::Id>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    state.db_service.repository::<E>().delete(id.clone()).await?;
    tracing::info!(table = E::TABLE, %id, "record deleted");
    Ok(Json(MessageResponse {
        message: format!("{} deleted successfully", E::NAME),
    }))
}
