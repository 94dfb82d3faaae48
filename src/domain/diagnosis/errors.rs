//! Diagnosis Context - Errors

use thiserror::Error;

/// 推理核心错误
///
/// 三类错误都表示训练侧与服务侧的不一致或模型缺失，
/// 调用方按变体分别处理，不解析错误消息。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// 模型工件未加载（服务降级状态）
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// 特征列/输出维度与训练时不一致
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// 标签不在推荐目录中
    #[error("Unknown failure label: {0}")]
    UnknownLabel(String),
}

impl InferenceError {
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch(message.into())
    }

    pub fn model_unavailable(message: impl Into<String>) -> Self {
        Self::ModelUnavailable(message.into())
    }
}
