//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::diagnosis::InferenceError;
use crate::domain::reading::ReadingError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: i64,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 模型未加载
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// 特征列/标签维度与训练时不一致
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// 标签不在推荐目录中
    #[error("Unknown failure label: {0}")]
    UnknownLabel(String),

    /// 预测请求引用的机器不存在
    #[error("Machine not found: {0}")]
    MachineNotFound(i64),

    /// 读数类型与机器登记类型不一致
    #[error("Machine {machine_id} is registered as type '{registered}', reading has type '{reading}'")]
    TypeMismatch {
        machine_id: i64,
        registered: String,
        reading: String,
    },

    /// 诊断写入（读数 + 故障明细）失败，事务已回滚
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: i64) -> Self {
        Self::NotFound { resource_type, id }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn persistence(err: RepositoryError) -> Self {
        Self::PersistenceFailure(err.to_string())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<InferenceError> for ApplicationError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::ModelUnavailable(msg) => Self::ModelUnavailable(msg),
            InferenceError::SchemaMismatch(msg) => Self::SchemaMismatch(msg),
            InferenceError::UnknownLabel(label) => Self::UnknownLabel(label),
        }
    }
}

impl From<ReadingError> for ApplicationError {
    fn from(err: ReadingError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
