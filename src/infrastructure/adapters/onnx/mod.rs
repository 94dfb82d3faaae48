//! ONNX Adapter - 用 ONNX Runtime 执行训练侧导出的模型，并加载模型文件

mod classifier;
mod loader;
mod session;

pub use classifier::{OnnxBinaryClassifier, OnnxMultiLabelClassifier};
pub use loader::{load_models, load_models_or_degraded, ArtifactError};
