//! Inference - 两级故障推理
//!
//! 包含：
//! - models: 启动时加载的模型组合
//! - gate / failure_type: 对分类器端口的封装
//! - pipeline: 推理编排（无副作用）

mod failure_type;
mod gate;
mod models;
mod pipeline;

#[cfg(test)]
pub(crate) mod stubs;

pub use failure_type::FailureTypeClassifier;
pub use gate::{FailureGate, FAILURE_CLASS};
pub use models::FailureModels;
pub use pipeline::{Diagnosis, DiagnosisPipeline};
