//! Diagnosis Context - 故障诊断限界上下文
//!
//! 职责:
//! - 特征向量构建（与训练列对齐）
//! - 预测结果值对象
//! - 故障类型 → 建议 的解析

mod errors;
mod feature_vector;
mod prediction;
mod recommendation;

pub use errors::InferenceError;
pub use feature_vector::{
    build_feature_vector, FeatureVector, TrainedColumnSchema, AIR_TEMPERATURE,
    PROCESS_TEMPERATURE, ROTATIONAL_SPEED, TOOL_WEAR, TORQUE, TYPE_COLUMN_PREFIX,
};
pub use prediction::{
    DiagnosisResult, FailureFlags, GatePrediction, TypePrediction, Verdict, NORMAL_RECOMMENDATION,
    NOT_APPLICABLE,
};
pub use recommendation::{resolve, FailureMode, Resolution, FALLBACK_ACTION, FALLBACK_DESCRIPTION};
