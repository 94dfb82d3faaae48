//! Prediction HTTP Handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::{ApplicationError, DiagnoseReading};
use crate::domain::reading::{MachineType, RawReading};
use crate::infrastructure::http::dto::{ApiResponse, PredictRequest, PredictResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 预测并保存读数
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PredictResponse>>, ApiError> {
    let Json(req) = payload?;

    let machine_type = MachineType::parse(&req.machine_type).map_err(ApplicationError::from)?;
    let reading = RawReading::new(
        machine_type,
        req.air_temperature,
        req.process_temperature,
        req.rotational_speed,
        req.torque,
        req.tool_wear,
    )
    .map_err(ApplicationError::from)?;

    let command = DiagnoseReading {
        machine_id: req.machine_id,
        reading,
    };

    let response = state.diagnose_handler.handle(command).await?;
    let result = response.result;

    Ok(Json(ApiResponse::success(PredictResponse {
        prediccion: result.verdict.as_str().to_string(),
        confianza: result.confidence,
        tipo_falla_probable: result.failure_type,
        recomendacion: result.recommendation,
        reading_saved_id: response.reading_id,
    })))
}
