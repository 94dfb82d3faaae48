//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现:
//! - adapters: ONNX 分类器 + 模型文件加载
//! - persistence: SQLite 存储
//! - http: RESTful API

pub mod adapters;
pub mod http;
pub mod persistence;

pub use adapters::{
    load_models, load_models_or_degraded, OnnxBinaryClassifier, OnnxMultiLabelClassifier,
};
pub use http::{AppState, HttpServer};
