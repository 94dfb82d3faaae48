//! Classifier Ports - 预训练分类器抽象
//!
//! 推理是 CPU 计算，接口为同步调用；具体实现在 infrastructure/adapters 层

use thiserror::Error;

use crate::domain::diagnosis::InferenceError;

/// 分类器错误
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Feature count mismatch: model expects {expected}, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("Malformed model: {0}")]
    Malformed(String),

    /// 推理运行时本身失败
    #[error("Model run failed: {0}")]
    Runtime(String),
}

impl From<ClassifierError> for InferenceError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::Runtime(_) => InferenceError::ModelUnavailable(err.to_string()),
            _ => InferenceError::SchemaMismatch(err.to_string()),
        }
    }
}

/// 二分类器（是否故障）
pub trait BinaryClassifier: Send + Sync {
    /// 训练时的特征数
    fn n_features(&self) -> usize;

    /// 类别标签，顺序与 `predict_proba` 的输出一一对应
    fn classes(&self) -> &[i64];

    /// 预测类别标签
    fn predict(&self, features: &[f64]) -> Result<i64, ClassifierError>;

    /// 各类别概率
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError>;
}

/// 多标签分类器（故障类型）
pub trait MultiLabelClassifier: Send + Sync {
    fn n_features(&self) -> usize;

    /// 输出（标签）数
    fn n_outputs(&self) -> usize;

    /// 每个输出一个布尔值
    fn predict(&self, features: &[f64]) -> Result<Vec<bool>, ClassifierError>;
}
