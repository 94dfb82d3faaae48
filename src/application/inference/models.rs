//! Failure Models - 启动时加载的只读模型组合

use std::sync::Arc;

use crate::application::ports::{BinaryClassifier, MultiLabelClassifier};
use crate::domain::diagnosis::{FailureMode, InferenceError, TrainedColumnSchema};

/// 两个模型 + 训练列 + 标签表
///
/// 进程内只读共享，构造时校验维度一致性。
#[derive(Clone)]
pub struct FailureModels {
    gate: Arc<dyn BinaryClassifier>,
    failure_types: Arc<dyn MultiLabelClassifier>,
    columns: TrainedColumnSchema,
    labels: Vec<String>,
}

impl FailureModels {
    pub fn new(
        gate: Arc<dyn BinaryClassifier>,
        failure_types: Arc<dyn MultiLabelClassifier>,
        columns: TrainedColumnSchema,
        labels: Vec<String>,
    ) -> Result<Self, InferenceError> {
        if gate.n_features() != columns.len() {
            return Err(InferenceError::schema_mismatch(format!(
                "failure model expects {} features, column schema has {}",
                gate.n_features(),
                columns.len()
            )));
        }
        if failure_types.n_features() != columns.len() {
            return Err(InferenceError::schema_mismatch(format!(
                "failure type model expects {} features, column schema has {}",
                failure_types.n_features(),
                columns.len()
            )));
        }
        if labels.is_empty() {
            return Err(InferenceError::schema_mismatch("failure type label list is empty"));
        }
        if failure_types.n_outputs() != labels.len() {
            return Err(InferenceError::schema_mismatch(format!(
                "failure type model has {} outputs, label list has {}",
                failure_types.n_outputs(),
                labels.len()
            )));
        }

        for column in columns.unrecognized() {
            tracing::warn!(column = %column, "Trained column has no reading feature, it is always 0");
        }

        // 未知标签在解析建议时才报错，这里只提前告警
        for label in labels.iter().filter(|l| FailureMode::from_label(l).is_none()) {
            tracing::warn!(label = %label, "Failure type label has no recommendation entry");
        }

        Ok(Self {
            gate,
            failure_types,
            columns,
            labels,
        })
    }

    pub fn gate(&self) -> &Arc<dyn BinaryClassifier> {
        &self.gate
    }

    pub fn failure_types(&self) -> &Arc<dyn MultiLabelClassifier> {
        &self.failure_types
    }

    pub fn columns(&self) -> &TrainedColumnSchema {
        &self.columns
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
