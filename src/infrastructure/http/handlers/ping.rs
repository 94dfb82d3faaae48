//! Ping Handler
//!
//! 健康检查和欢迎信息

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

pub const WELCOME_MESSAGE: &str = "API del Doctor de Máquinas v2.0 está funcionando.";

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// 模型缺失时服务仍可用，但预测返回 503
    pub models_loaded: bool,
}

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub mensaje: &'static str,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<ApiResponse<PingResponse>> {
    Json(ApiResponse::success(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        models_loaded: state.pipeline.is_ready(),
    }))
}

/// 根路径欢迎信息
pub async fn welcome() -> Json<ApiResponse<WelcomeResponse>> {
    Json(ApiResponse::success(WelcomeResponse {
        mensaje: WELCOME_MESSAGE,
    }))
}
