//! 测试用桩分类器

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::application::ports::{BinaryClassifier, ClassifierError, MultiLabelClassifier};
use crate::domain::diagnosis::{
    TrainedColumnSchema, AIR_TEMPERATURE, PROCESS_TEMPERATURE, ROTATIONAL_SPEED, TOOL_WEAR, TORQUE,
};

use super::{DiagnosisPipeline, FailureModels};

/// drop-first 编码的训练列（无 type_H）
pub(crate) fn schema() -> TrainedColumnSchema {
    TrainedColumnSchema::new(
        [
            AIR_TEMPERATURE,
            PROCESS_TEMPERATURE,
            ROTATIONAL_SPEED,
            TORQUE,
            TOOL_WEAR,
            "type_L",
            "type_M",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
    )
    .unwrap()
}

pub(crate) fn labels() -> Vec<String> {
    ["TWF", "HDF", "PWF", "OSF"].iter().map(|s| s.to_string()).collect()
}

fn check_len(expected: usize, features: &[f64]) -> Result<(), ClassifierError> {
    if features.len() != expected {
        return Err(ClassifierError::FeatureCount {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

/// 固定输出的二分类桩
pub(crate) struct StubGate {
    pub class: i64,
    pub classes: Vec<i64>,
    pub proba: Vec<f64>,
    pub n_features: usize,
}

impl StubGate {
    pub(crate) fn fixed(class: i64, confidence: f64) -> Self {
        let proba = if class == 1 {
            vec![1.0 - confidence, confidence]
        } else {
            vec![confidence, 1.0 - confidence]
        };
        Self {
            class,
            classes: vec![0, 1],
            proba,
            n_features: schema().len(),
        }
    }
}

impl BinaryClassifier for StubGate {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict(&self, features: &[f64]) -> Result<i64, ClassifierError> {
        check_len(self.n_features, features)?;
        Ok(self.class)
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        check_len(self.n_features, features)?;
        Ok(self.proba.clone())
    }
}

/// 规则桩：刀具磨损 > 200 且扭矩 > 50 判为故障
pub(crate) struct RuleGate;

impl RuleGate {
    fn is_failure(features: &[f64]) -> bool {
        features[4] > 200.0 && features[3] > 50.0
    }
}

impl BinaryClassifier for RuleGate {
    fn n_features(&self) -> usize {
        schema().len()
    }

    fn classes(&self) -> &[i64] {
        &[0, 1]
    }

    fn predict(&self, features: &[f64]) -> Result<i64, ClassifierError> {
        check_len(self.n_features(), features)?;
        Ok(if Self::is_failure(features) { 1 } else { 0 })
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        check_len(self.n_features(), features)?;
        Ok(if Self::is_failure(features) {
            vec![0.13, 0.87]
        } else {
            vec![0.96, 0.04]
        })
    }
}

/// 固定输出的多标签桩，记录调用次数
pub(crate) struct StubTypes {
    pub flags: Vec<bool>,
    calls: AtomicUsize,
}

impl StubTypes {
    pub(crate) fn new(flags: Vec<bool>) -> Self {
        Self {
            flags,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MultiLabelClassifier for StubTypes {
    fn n_features(&self) -> usize {
        schema().len()
    }

    fn n_outputs(&self) -> usize {
        self.flags.len()
    }

    fn predict(&self, features: &[f64]) -> Result<Vec<bool>, ClassifierError> {
        check_len(self.n_features(), features)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.flags.clone())
    }
}

/// 组装一个就绪的流水线
pub(crate) fn pipeline(
    gate: Arc<dyn BinaryClassifier>,
    types: Arc<StubTypes>,
) -> DiagnosisPipeline {
    let models = FailureModels::new(gate, types, schema(), labels()).unwrap();
    DiagnosisPipeline::new(models)
}
