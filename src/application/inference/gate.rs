//! Failure Gate - 一级模型封装（是否故障）

use std::sync::Arc;

use crate::application::ports::BinaryClassifier;
use crate::domain::diagnosis::{FeatureVector, GatePrediction, InferenceError};

/// 表示"故障"的类别标签
pub const FAILURE_CLASS: i64 = 1;

pub struct FailureGate {
    model: Option<Arc<dyn BinaryClassifier>>,
}

impl FailureGate {
    pub fn new(model: Arc<dyn BinaryClassifier>) -> Self {
        Self { model: Some(model) }
    }

    /// 模型缺失时的降级实例
    pub fn unavailable() -> Self {
        Self { model: None }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// 预测是否故障
    ///
    /// 置信度取被预测类别的概率。概率列按 `classes()` 中的位置查找，
    /// 不假设列下标等于类别值。
    pub fn predict(&self, vector: &FeatureVector) -> Result<GatePrediction, InferenceError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| InferenceError::model_unavailable("failure model is not loaded"))?;

        let class = model.predict(vector.as_slice())?;
        let proba = model.predict_proba(vector.as_slice())?;
        let classes = model.classes();

        if proba.len() != classes.len() {
            return Err(InferenceError::schema_mismatch(format!(
                "failure model returned {} probabilities for {} classes",
                proba.len(),
                classes.len()
            )));
        }

        let index = classes.iter().position(|&c| c == class).ok_or_else(|| {
            InferenceError::schema_mismatch(format!(
                "predicted class {} is not one of {:?}",
                class, classes
            ))
        })?;

        Ok(GatePrediction {
            failure: class == FAILURE_CLASS,
            confidence: proba[index],
        })
    }
}
