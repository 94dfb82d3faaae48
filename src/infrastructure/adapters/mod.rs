//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod onnx;

pub use onnx::*;
