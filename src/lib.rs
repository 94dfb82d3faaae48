//! Machine Doctor - 机器故障预测服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Reading Context: 机器类型与原始读数
//! - Diagnosis Context: 特征向量、预测结果、故障类型建议
//!
//! 应用层 (application/):
//! - Ports: 端口定义（分类器、Repositories、诊断事务单元）
//! - Inference: 两级推理流水线
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Persistence: SQLite 存储
//! - Adapters: ONNX 模型加载与推理（ort）

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
