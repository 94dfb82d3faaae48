//! Diagnosis Context - 预测结果值对象

use serde::{Deserialize, Serialize};

use super::InferenceError;

/// 一级模型（是否故障）的输出
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatePrediction {
    pub failure: bool,
    /// 被预测类别的概率 [0, 1]
    pub confidence: f64,
}

impl GatePrediction {
    /// 百分比形式，保留两位小数
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }
}

/// 二级模型（故障类型，多标签）的输出
///
/// 不变量: 标签表中每个标签恰好有一个布尔值，顺序与标签表一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePrediction {
    entries: Vec<(String, bool)>,
}

impl TypePrediction {
    pub fn new(labels: &[String], flags: Vec<bool>) -> Result<Self, InferenceError> {
        if labels.len() != flags.len() {
            return Err(InferenceError::schema_mismatch(format!(
                "failure type model produced {} outputs for {} labels",
                flags.len(),
                labels.len()
            )));
        }

        Ok(Self {
            entries: labels.iter().cloned().zip(flags).collect(),
        })
    }

    pub fn entries(&self) -> &[(String, bool)] {
        &self.entries
    }

    /// 激活的标签（保持标签表顺序）
    pub fn active_labels(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, active)| *active)
            .map(|(label, _)| label.as_str())
            .collect()
    }
}

/// 最终判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Normal,
    Failure,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Normal => "OPERACION NORMAL",
            Verdict::Failure => "FALLA PROBABLE",
        }
    }
}

/// 故障明细标记（持久化到 failure_types 表）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureFlags {
    /// Tool Wear Failure
    #[serde(default)]
    pub twf: bool,
    /// Heat Dissipation Failure
    #[serde(default)]
    pub hdf: bool,
    /// Power Failure
    #[serde(default)]
    pub pwf: bool,
    /// Overstrain Failure
    #[serde(default)]
    pub osf: bool,
    /// Random / 未分类故障
    #[serde(default)]
    pub rnf: bool,
}

/// 正常运行时的固定文案
pub const NOT_APPLICABLE: &str = "N/A";
pub const NORMAL_RECOMMENDATION: &str = "Continuar operación estándar.";

/// 对外的诊断结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisResult {
    pub verdict: Verdict,
    /// 如 "87.00%"
    pub confidence: String,
    pub failure_type: String,
    pub recommendation: String,
}

impl DiagnosisResult {
    pub fn normal(gate: &GatePrediction) -> Self {
        Self {
            verdict: Verdict::Normal,
            confidence: gate.confidence_percent(),
            failure_type: NOT_APPLICABLE.to_string(),
            recommendation: NORMAL_RECOMMENDATION.to_string(),
        }
    }

    pub fn failure(
        gate: &GatePrediction,
        failure_type: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            verdict: Verdict::Failure,
            confidence: gate.confidence_percent(),
            failure_type: failure_type.into(),
            recommendation: recommendation.into(),
        }
    }
}
