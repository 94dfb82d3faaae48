//! Machine HTTP Handlers

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::{
    CreateMachine, DeleteMachine, GetMachine, ListMachineReadings, ListMachines, UpdateMachine,
};
use crate::infrastructure::http::dto::{
    ApiResponse, Empty, MachineDetailDto, MachineDto, MachineRequest, PaginationQuery, ReadingDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 登记机器
pub async fn create_machine(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MachineRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<MachineDto>>), ApiError> {
    let Json(req) = payload?;

    let command = CreateMachine {
        machine_type: req.machine_type,
        location: req.location,
        description: req.description,
    };

    let machine = state.create_machine_handler.handle(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(MachineDto::from(machine))),
    ))
}

/// 分页列出机器
pub async fn list_machines(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<MachineDto>>>, ApiError> {
    let Query(page) = query?;

    let machines = state
        .list_machines_handler
        .handle(ListMachines {
            skip: page.skip,
            limit: page.limit,
        })
        .await?;

    Ok(Json(ApiResponse::success(
        machines.into_iter().map(MachineDto::from).collect(),
    )))
}

/// 获取机器详情（含读数）
pub async fn get_machine(
    State(state): State<Arc<AppState>>,
    machine_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<MachineDetailDto>>, ApiError> {
    let Path(machine_id) = machine_id?;

    let machine = state
        .get_machine_handler
        .handle(GetMachine { machine_id })
        .await?;

    Ok(Json(ApiResponse::success(MachineDetailDto::from(machine))))
}

/// 更新机器
pub async fn update_machine(
    State(state): State<Arc<AppState>>,
    machine_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<MachineRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<MachineDto>>, ApiError> {
    let Path(machine_id) = machine_id?;
    let Json(req) = payload?;

    let command = UpdateMachine {
        machine_id,
        machine_type: req.machine_type,
        location: req.location,
        description: req.description,
    };

    let machine = state.update_machine_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(MachineDto::from(machine))))
}

/// 删除机器（连同读数）
pub async fn delete_machine(
    State(state): State<Arc<AppState>>,
    machine_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let Path(machine_id) = machine_id?;

    state
        .delete_machine_handler
        .handle(DeleteMachine { machine_id })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 分页列出机器读数
pub async fn list_machine_readings(
    State(state): State<Arc<AppState>>,
    machine_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ReadingDto>>>, ApiError> {
    let Path(machine_id) = machine_id?;
    let Query(page) = query?;

    let readings = state
        .list_readings_handler
        .handle(ListMachineReadings {
            machine_id,
            skip: page.skip,
            limit: page.limit,
        })
        .await?;

    Ok(Json(ApiResponse::success(
        readings.into_iter().map(ReadingDto::from).collect(),
    )))
}
