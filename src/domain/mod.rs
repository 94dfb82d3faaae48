//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Reading Context: 传感器读数
//! - Diagnosis Context: 特征对齐、预测结果、故障建议

pub mod diagnosis;
pub mod reading;
