//! ONNX Classifiers - 分类器端口的 ONNX Runtime 实现
//!
//! 输出约定与 skl2onnx 导出一致（关闭 zipmap）：
//! - 一级模型：`label` i64 [N]，`probabilities` f32 [N, n_classes]
//! - 二级模型：`label` i64 [N, n_outputs]，非 0 表示该故障类型命中
//!
//! 构造时用全 0 特征空跑一次，输出维度不对就在启动时报错。

use ort::session::Session;

use super::session::{extract_f32, extract_i64, output_name, OnnxSession};
use crate::application::ports::{BinaryClassifier, ClassifierError, MultiLabelClassifier};

const LABEL_OUTPUT: &str = "label";
const PROBABILITIES_OUTPUT: &str = "probabilities";

/// 一级模型（是否故障）
pub struct OnnxBinaryClassifier {
    model: OnnxSession,
    label_output: String,
    proba_output: String,
    classes: Vec<i64>,
}

impl OnnxBinaryClassifier {
    /// `classes` 与 probabilities 的列一一对应
    pub fn new(session: Session, classes: Vec<i64>) -> Result<Self, ClassifierError> {
        let model = OnnxSession::new(session)?;
        if model.output_names().len() < 2 {
            return Err(ClassifierError::Malformed(format!(
                "expected label and probabilities outputs, found {:?}",
                model.output_names()
            )));
        }
        let label_output = output_name(model.output_names(), LABEL_OUTPUT, 0)?;
        let proba_output = output_name(model.output_names(), PROBABILITIES_OUTPUT, 1)?;

        let classifier = Self {
            model,
            label_output,
            proba_output,
            classes,
        };
        classifier.outcome(&vec![0.0; classifier.model.n_features()])?;
        Ok(classifier)
    }

    fn outcome(&self, features: &[f64]) -> Result<(i64, Vec<f64>), ClassifierError> {
        self.model.run(features, |outputs| {
            let labels = extract_i64(outputs, &self.label_output)?;
            let proba = extract_f32(outputs, &self.proba_output)?;
            binary_row(&labels, &proba, &self.classes)
        })
    }
}

/// 单行二分类输出：一个标签，每个类别一个概率
fn binary_row(
    labels: &[i64],
    proba: &[f32],
    classes: &[i64],
) -> Result<(i64, Vec<f64>), ClassifierError> {
    let label = match labels {
        [label] => *label,
        _ => {
            return Err(ClassifierError::Malformed(format!(
                "expected one label per row, found {}",
                labels.len()
            )))
        }
    };
    if proba.len() != classes.len() {
        return Err(ClassifierError::Malformed(format!(
            "model returned {} probabilities for classes {:?}",
            proba.len(),
            classes
        )));
    }
    if !classes.contains(&label) {
        return Err(ClassifierError::Malformed(format!(
            "predicted class {} is not one of {:?}",
            label, classes
        )));
    }

    Ok((label, proba.iter().map(|&p| f64::from(p)).collect()))
}

impl BinaryClassifier for OnnxBinaryClassifier {
    fn n_features(&self) -> usize {
        self.model.n_features()
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict(&self, features: &[f64]) -> Result<i64, ClassifierError> {
        self.outcome(features).map(|(label, _)| label)
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        self.outcome(features).map(|(_, proba)| proba)
    }
}

/// 二级模型（故障类型，多标签）
pub struct OnnxMultiLabelClassifier {
    model: OnnxSession,
    label_output: String,
    n_outputs: usize,
}

impl OnnxMultiLabelClassifier {
    pub fn new(session: Session) -> Result<Self, ClassifierError> {
        let model = OnnxSession::new(session)?;
        let label_output = output_name(model.output_names(), LABEL_OUTPUT, 0)?;

        // 输出数以空跑结果为准，导出的形状里第二维可能是动态的
        let zeros = vec![0.0; model.n_features()];
        let n_outputs = model.run(&zeros, |outputs| extract_i64(outputs, &label_output))?.len();
        if n_outputs == 0 {
            return Err(ClassifierError::Malformed(
                "failure type model has no outputs".to_string(),
            ));
        }

        Ok(Self {
            model,
            label_output,
            n_outputs,
        })
    }
}

/// 单行多标签输出转成布尔值
fn active_flags(labels: &[i64], n_outputs: usize) -> Result<Vec<bool>, ClassifierError> {
    if labels.len() != n_outputs {
        return Err(ClassifierError::Malformed(format!(
            "expected {} labels per row, found {}",
            n_outputs,
            labels.len()
        )));
    }
    Ok(labels.iter().map(|&label| label != 0).collect())
}

impl MultiLabelClassifier for OnnxMultiLabelClassifier {
    fn n_features(&self) -> usize {
        self.model.n_features()
    }

    fn n_outputs(&self) -> usize {
        self.n_outputs
    }

    fn predict(&self, features: &[f64]) -> Result<Vec<bool>, ClassifierError> {
        let labels = self
            .model
            .run(features, |outputs| extract_i64(outputs, &self.label_output))?;
        active_flags(&labels, self.n_outputs)
    }
}
