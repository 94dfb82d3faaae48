//! Reading / Failure Detail HTTP Handlers

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{
    DeleteFailureDetail, DeleteReading, GetReading, GetReadingFailureDetail, UpdateFailureDetail,
};
use crate::domain::diagnosis::FailureFlags;
use crate::infrastructure::http::dto::{ApiResponse, Empty, FailureDetailDto, ReadingDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn get_reading(
    State(state): State<Arc<AppState>>,
    reading_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<ReadingDto>>, ApiError> {
    let Path(reading_id) = reading_id?;

    let reading = state
        .get_reading_handler
        .handle(GetReading { reading_id })
        .await?;

    Ok(Json(ApiResponse::success(ReadingDto::from(reading))))
}

/// 删除读数（连同故障明细）
pub async fn delete_reading(
    State(state): State<Arc<AppState>>,
    reading_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let Path(reading_id) = reading_id?;

    state
        .delete_reading_handler
        .handle(DeleteReading { reading_id })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 读数对应的故障明细
pub async fn get_reading_failure_detail(
    State(state): State<Arc<AppState>>,
    reading_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<FailureDetailDto>>, ApiError> {
    let Path(reading_id) = reading_id?;

    let detail = state
        .get_failure_handler
        .handle(GetReadingFailureDetail { reading_id })
        .await?;

    Ok(Json(ApiResponse::success(FailureDetailDto::from(detail))))
}

/// 人工修正故障明细，缺省字段视为 false
pub async fn update_failure_detail(
    State(state): State<Arc<AppState>>,
    failure_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<FailureFlags>, JsonRejection>,
) -> Result<Json<ApiResponse<FailureDetailDto>>, ApiError> {
    let Path(failure_id) = failure_id?;
    let Json(flags) = payload?;

    let detail = state
        .update_failure_handler
        .handle(UpdateFailureDetail { failure_id, flags })
        .await?;

    Ok(Json(ApiResponse::success(FailureDetailDto::from(detail))))
}

pub async fn delete_failure_detail(
    State(state): State<Arc<AppState>>,
    failure_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let Path(failure_id) = failure_id?;

    state
        .delete_failure_handler
        .handle(DeleteFailureDetail { failure_id })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
