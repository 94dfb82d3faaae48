//! Diagnosis Pipeline - 两级推理编排
//!
//! START → VECTORIZED → GATED → (gate=false) NORMAL
//!                            → (gate=true) 类型模型 → 建议解析 → FAILURE

use crate::domain::diagnosis::{
    build_feature_vector, resolve, DiagnosisResult, FailureFlags, GatePrediction, InferenceError,
    TrainedColumnSchema,
};
use crate::domain::reading::RawReading;

use super::{FailureGate, FailureModels, FailureTypeClassifier};

/// 一次诊断的完整输出
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub result: DiagnosisResult,
    pub gate: GatePrediction,
    /// 仅在 gate=true 时存在，用于写入故障明细
    pub failure_flags: Option<FailureFlags>,
}

/// 推理流水线
///
/// 模型在构造时注入，之后只读；降级模式下所有诊断都返回 ModelUnavailable。
pub struct DiagnosisPipeline {
    columns: Option<TrainedColumnSchema>,
    labels: Vec<String>,
    gate: FailureGate,
    failure_types: FailureTypeClassifier,
}

impl DiagnosisPipeline {
    pub fn new(models: FailureModels) -> Self {
        Self {
            columns: Some(models.columns().clone()),
            labels: models.labels().to_vec(),
            gate: FailureGate::new(models.gate().clone()),
            failure_types: FailureTypeClassifier::new(models.failure_types().clone()),
        }
    }

    /// 模型缺失时的降级实例
    pub fn degraded() -> Self {
        Self {
            columns: None,
            labels: Vec::new(),
            gate: FailureGate::unavailable(),
            failure_types: FailureTypeClassifier::unavailable(),
        }
    }

    pub fn from_optional(models: Option<FailureModels>) -> Self {
        match models {
            Some(models) => Self::new(models),
            None => Self::degraded(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.columns.is_some() && self.gate.is_available() && self.failure_types.is_available()
    }

    pub fn columns(&self) -> Option<&TrainedColumnSchema> {
        self.columns.as_ref()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// 诊断单条读数（无副作用）
    pub fn diagnose(&self, raw: &RawReading) -> Result<Diagnosis, InferenceError> {
        let columns = self
            .columns
            .as_ref()
            .ok_or_else(|| InferenceError::model_unavailable("trained column schema is not loaded"))?;

        let vector = build_feature_vector(raw, columns)?;
        let gate = self.gate.predict(&vector)?;

        tracing::debug!(
            machine_type = %raw.machine_type(),
            failure = gate.failure,
            confidence = gate.confidence,
            "Gate prediction"
        );

        if !gate.failure {
            return Ok(Diagnosis {
                result: DiagnosisResult::normal(&gate),
                gate,
                failure_flags: None,
            });
        }

        let types = self.failure_types.predict(&vector, &self.labels)?;
        let active = types.active_labels();
        let resolution = resolve(&active)?;

        tracing::debug!(labels = ?active, rnf = resolution.flags.rnf, "Failure type prediction");

        Ok(Diagnosis {
            result: DiagnosisResult::failure(&gate, resolution.description, resolution.recommendation),
            gate,
            failure_flags: Some(resolution.flags),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::inference::stubs::{pipeline, RuleGate, StubGate, StubTypes};
    use crate::domain::diagnosis::{Verdict, FALLBACK_ACTION, FALLBACK_DESCRIPTION};
    use crate::domain::reading::MachineType;

    fn reading(torque: f64, tool_wear: i64) -> RawReading {
        RawReading::new(MachineType::L, 298.5, 308.9, 1400, torque, tool_wear).unwrap()
    }

    #[test]
    fn test_tool_wear_failure() {
        let types = Arc::new(StubTypes::new(vec![true, false, false, false]));
        let pipeline = pipeline(Arc::new(RuleGate), types.clone());

        let diagnosis = pipeline.diagnose(&reading(60.0, 220)).unwrap();
        assert_eq!(diagnosis.result.verdict, Verdict::Failure);
        assert_eq!(diagnosis.result.verdict.as_str(), "FALLA PROBABLE");
        assert_eq!(diagnosis.result.confidence, "87.00%");
        assert!(diagnosis.result.failure_type.contains("Desgaste de Herramienta"));
        assert!(diagnosis.result.recommendation.contains("herramienta de corte"));

        let flags = diagnosis.failure_flags.unwrap();
        assert!(flags.twf);
        assert!(!flags.rnf);
        assert_eq!(types.calls(), 1);
    }

    #[test]
    fn test_normal_operation_skips_type_model() {
        let types = Arc::new(StubTypes::new(vec![true, true, true, true]));
        let pipeline = pipeline(Arc::new(RuleGate), types.clone());

        let diagnosis = pipeline.diagnose(&reading(20.0, 5)).unwrap();
        assert_eq!(diagnosis.result.verdict.as_str(), "OPERACION NORMAL");
        assert_eq!(diagnosis.result.failure_type, "N/A");
        assert_eq!(diagnosis.result.confidence, "96.00%");
        assert!(diagnosis.failure_flags.is_none());
        assert_eq!(types.calls(), 0);
    }

    #[test]
    fn test_unidentified_failure_falls_back() {
        let types = Arc::new(StubTypes::new(vec![false; 4]));
        let pipeline = pipeline(Arc::new(StubGate::fixed(1, 0.71)), types);

        let diagnosis = pipeline.diagnose(&reading(20.0, 5)).unwrap();
        assert_eq!(diagnosis.result.verdict, Verdict::Failure);
        assert_eq!(diagnosis.result.failure_type, FALLBACK_DESCRIPTION);
        assert!(diagnosis.result.recommendation.starts_with(FALLBACK_ACTION));
        assert!(!diagnosis.result.recommendation.is_empty());
        assert_eq!(
            diagnosis.failure_flags,
            Some(FailureFlags {
                rnf: true,
                ..FailureFlags::default()
            })
        );
    }

    #[test]
    fn test_multiple_labels_join_in_label_order() {
        let types = Arc::new(StubTypes::new(vec![false, true, false, true]));
        let pipeline = pipeline(Arc::new(StubGate::fixed(1, 0.9)), types);

        let diagnosis = pipeline.diagnose(&reading(60.0, 220)).unwrap();
        let hdf = diagnosis.result.failure_type.find("HDF").unwrap();
        let osf = diagnosis.result.failure_type.find("OSF").unwrap();
        assert!(hdf < osf);
        assert!(diagnosis.result.failure_type.contains(", "));

        let flags = diagnosis.failure_flags.unwrap();
        assert!(flags.hdf && flags.osf);
        assert!(!flags.twf && !flags.pwf && !flags.rnf);
    }

    #[test]
    fn test_degraded_pipeline_always_fails() {
        let pipeline = DiagnosisPipeline::degraded();
        assert!(!pipeline.is_ready());
        for machine_type in MachineType::ALL {
            let raw = RawReading::new(machine_type, 298.5, 308.9, 1400, 60.0, 220).unwrap();
            assert!(matches!(
                pipeline.diagnose(&raw),
                Err(InferenceError::ModelUnavailable(_))
            ));
        }
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        let types = Arc::new(StubTypes::new(vec![true]));
        let models = FailureModels::new(
            Arc::new(StubGate::fixed(1, 0.9)),
            types,
            crate::application::inference::stubs::schema(),
            vec!["XYZ".to_string()],
        )
        .unwrap();
        let pipeline = DiagnosisPipeline::new(models);

        let result = pipeline.diagnose(&reading(60.0, 220));
        assert_eq!(result, Err(InferenceError::UnknownLabel("XYZ".to_string())));
    }
}
