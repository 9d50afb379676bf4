//! Per-stock listings and aggregate read endpoints.

use crate::domain::model::{ColorSort, MachineGrading, StockScoped, WeightType};
use crate::domain::summary::{ColorSortSummary, WeightSummary, WeightTypeUsage};
use crate::transport::http::error::ApiResult;
use crate::transport::http::types::{AppState, CounterQuery};
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;

/// Records of `E` that belong to one stock lot, newest first.
pub async fn list_by_stock_handler<E: StockScoped>(
    State(state): State<AppState>,
    stock_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<E>>> {
    let Path(stock_id) = stock_id?;
    let records = state
        .db_service
        .repository::<E>()
        .list_for_stock(stock_id)
        .await?;
    Ok(Json(records))
}

/// Color sort records of a stock lot, optionally narrowed to one pass with `?counter=`.
pub async fn color_sorts_by_stock_handler(
    State(state): State<AppState>,
    stock_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<CounterQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ColorSort>>> {
    let Path(stock_id) = stock_id?;
    let Query(query) = query?;

    let repository = state.db_service.repository::<ColorSort>();
    let records = match query.counter {
        Some(counter) => repository.list_for_pass(stock_id, counter).await?,
        None => repository.list_for_stock(stock_id).await?,
    };
    Ok(Json(records))
}

pub async fn color_sorts_by_pass_handler(
    State(state): State<AppState>,
    params: Result<Path<(i64, i32)>, PathRejection>,
) -> ApiResult<Json<Vec<ColorSort>>> {
    let Path((stock_id, counter)) = params?;
    let records = state
        .db_service
        .repository::<ColorSort>()
        .list_for_pass(stock_id, counter)
        .await?;
    Ok(Json(records))
}

pub async fn color_sort_summary_handler(
    State(state): State<AppState>,
    params: Result<Path<(i64, i32)>, PathRejection>,
) -> ApiResult<Json<ColorSortSummary>> {
    let Path((stock_id, counter)) = params?;
    let summary = state
        .db_service
        .repository::<ColorSort>()
        .pass_summary(stock_id, counter)
        .await?;
    Ok(Json(summary))
}

pub async fn machine_grading_summary_handler(
    State(state): State<AppState>,
    stock_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<WeightSummary>> {
    let Path(stock_id) = stock_id?;
    let summary = state
        .db_service
        .repository::<MachineGrading>()
        .weight_summary(stock_id)
        .await?;
    Ok(Json(summary))
}

pub async fn weight_type_usage_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<WeightTypeUsage>>> {
    let usage = state.db_service.repository::<WeightType>().usage().await?;
    Ok(Json(usage))
}
