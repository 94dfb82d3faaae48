//! HTTP DTOs - 请求/响应数据结构

use serde::{Deserialize, Serialize};

use crate::application::{
    FailureDetailRecord, MachineRecord, MachineResponse, ReadingRecord, ReadingResponse,
};
use crate::domain::diagnosis::FailureFlags;

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

/// 分页参数
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

// ============================================================================
// Prediction DTOs
// ============================================================================

/// 预测请求，兼容旧客户端的西班牙语字段名
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub machine_id: i64,
    #[serde(alias = "temp_aire")]
    pub air_temperature: f64,
    #[serde(alias = "temp_proceso")]
    pub process_temperature: f64,
    #[serde(alias = "velocidad_rotacion")]
    pub rotational_speed: i64,
    pub torque: f64,
    #[serde(alias = "desgaste_herramienta")]
    pub tool_wear: i64,
    #[serde(rename = "type", alias = "Type")]
    pub machine_type: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediccion: String,
    pub confianza: String,
    pub tipo_falla_probable: String,
    pub recomendacion: String,
    pub reading_saved_id: i64,
}

// ============================================================================
// Machine DTOs
// ============================================================================

/// 创建/更新机器请求
#[derive(Debug, Deserialize)]
pub struct MachineRequest {
    #[serde(rename = "type")]
    pub machine_type: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MachineDto {
    pub machine_id: i64,
    #[serde(rename = "type")]
    pub machine_type: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl From<MachineRecord> for MachineDto {
    fn from(record: MachineRecord) -> Self {
        Self {
            machine_id: record.machine_id,
            machine_type: record.machine_type,
            location: record.location,
            description: record.description,
        }
    }
}

/// 机器详情（含读数）
#[derive(Debug, Serialize)]
pub struct MachineDetailDto {
    #[serde(flatten)]
    pub machine: MachineDto,
    pub readings: Vec<ReadingDto>,
}

impl From<MachineResponse> for MachineDetailDto {
    fn from(response: MachineResponse) -> Self {
        Self {
            machine: MachineDto::from(response.machine),
            readings: response.readings.into_iter().map(ReadingDto::from).collect(),
        }
    }
}

// ============================================================================
// Reading / Failure Detail DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct FailureDetailDto {
    pub failure_id: i64,
    pub reading_id: i64,
    #[serde(flatten)]
    pub flags: FailureFlags,
}

impl From<FailureDetailRecord> for FailureDetailDto {
    fn from(record: FailureDetailRecord) -> Self {
        Self {
            failure_id: record.failure_id,
            reading_id: record.reading_id,
            flags: record.flags,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadingDto {
    pub reading_id: i64,
    pub machine_id: i64,
    pub air_temperature: f64,
    pub process_temperature: f64,
    pub rotational_speed: i64,
    pub torque: f64,
    pub tool_wear: i64,
    pub machine_failure: bool,
    pub timestamp: String,
    pub failure_details: Option<FailureDetailDto>,
}

impl ReadingDto {
    fn new(record: ReadingRecord, failure_details: Option<FailureDetailRecord>) -> Self {
        Self {
            reading_id: record.reading_id,
            machine_id: record.machine_id,
            air_temperature: record.air_temperature,
            process_temperature: record.process_temperature,
            rotational_speed: record.rotational_speed,
            torque: record.torque,
            tool_wear: record.tool_wear,
            machine_failure: record.machine_failure,
            timestamp: record.timestamp.to_rfc3339(),
            failure_details: failure_details.map(FailureDetailDto::from),
        }
    }
}

impl From<ReadingResponse> for ReadingDto {
    fn from(response: ReadingResponse) -> Self {
        Self::new(response.reading, response.failure_details)
    }
}
