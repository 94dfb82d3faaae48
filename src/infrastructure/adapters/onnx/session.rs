//! ONNX Session - 会话创建与单行推理
//!
//! `Session::run` 需要 `&mut self`，会话放在 Mutex 里供多个请求共享。

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session, SessionOutputs};
use ort::value::Tensor;
use parking_lot::Mutex;

use crate::application::ports::ClassifierError;

/// 从文件创建会话
pub(super) fn open_session(path: &Path) -> ort::Result<Session> {
    Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        // 每次只推理一行
        .with_intra_threads(1)?
        .commit_from_file(path)
}

/// 输入形状 [N, n_features] 的特征宽度
///
/// 宽度必须是固定值，才能与训练列对齐
pub(super) fn feature_width(dims: &[i64]) -> Result<usize, ClassifierError> {
    match dims {
        [_, width] if *width > 0 => Ok(*width as usize),
        _ => Err(ClassifierError::Malformed(format!(
            "expected input shape [N, n_features] with a fixed width, found {:?}",
            dims
        ))),
    }
}

/// 单行特征转成 f32 [1, n_features]
pub(super) fn feature_row(
    features: &[f64],
    n_features: usize,
) -> Result<Array2<f32>, ClassifierError> {
    if features.len() != n_features {
        return Err(ClassifierError::FeatureCount {
            expected: n_features,
            actual: features.len(),
        });
    }

    let row = features.iter().map(|&v| v as f32).collect();
    Array2::from_shape_vec((1, n_features), row)
        .map_err(|e| ClassifierError::Malformed(e.to_string()))
}

/// 按名字找输出，找不到时按位置取
pub(super) fn output_name(
    names: &[String],
    wanted: &str,
    position: usize,
) -> Result<String, ClassifierError> {
    names
        .iter()
        .find(|name| name.as_str() == wanted)
        .or_else(|| names.get(position))
        .cloned()
        .ok_or_else(|| {
            ClassifierError::Malformed(format!(
                "model has no '{}' output (outputs: {:?})",
                wanted, names
            ))
        })
}

pub(super) fn runtime_error(err: ort::Error) -> ClassifierError {
    ClassifierError::Runtime(err.to_string())
}

pub(super) fn extract_i64(
    outputs: &SessionOutputs<'_>,
    name: &str,
) -> Result<Vec<i64>, ClassifierError> {
    let value = outputs
        .get(name)
        .ok_or_else(|| ClassifierError::Malformed(format!("output '{}' is missing", name)))?;
    let (_, data) = value
        .try_extract_tensor::<i64>()
        .map_err(|e| ClassifierError::Malformed(format!("output '{}': {}", name, e)))?;
    Ok(data.to_vec())
}

pub(super) fn extract_f32(
    outputs: &SessionOutputs<'_>,
    name: &str,
) -> Result<Vec<f32>, ClassifierError> {
    let value = outputs
        .get(name)
        .ok_or_else(|| ClassifierError::Malformed(format!("output '{}' is missing", name)))?;
    let (_, data) = value
        .try_extract_tensor::<f32>()
        .map_err(|e| ClassifierError::Malformed(format!("output '{}': {}", name, e)))?;
    Ok(data.to_vec())
}

/// 单输入模型会话
pub(super) struct OnnxSession {
    session: Mutex<Session>,
    n_features: usize,
    output_names: Vec<String>,
}

impl OnnxSession {
    pub fn new(session: Session) -> Result<Self, ClassifierError> {
        let input = match session.inputs.as_slice() {
            [input] => input,
            inputs => {
                return Err(ClassifierError::Malformed(format!(
                    "expected one feature input, found {}",
                    inputs.len()
                )))
            }
        };
        let dims = input.input_type.tensor_shape().ok_or_else(|| {
            ClassifierError::Malformed(format!("input '{}' is not a tensor", input.name))
        })?;
        let n_features = feature_width(dims)?;
        let output_names = session.outputs.iter().map(|o| o.name.clone()).collect();

        Ok(Self {
            session: Mutex::new(session),
            n_features,
            output_names,
        })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }

    /// 推理一行特征；`read` 在持锁期间把需要的输出拷出来
    pub fn run<R>(
        &self,
        features: &[f64],
        read: impl FnOnce(&SessionOutputs<'_>) -> Result<R, ClassifierError>,
    ) -> Result<R, ClassifierError> {
        let row = feature_row(features, self.n_features)?;
        let input = Tensor::from_array(row).map_err(runtime_error)?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input]).map_err(runtime_error)?;
        read(&outputs)
    }
}
