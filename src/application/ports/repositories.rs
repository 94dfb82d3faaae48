//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::diagnosis::FailureFlags;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Machine Repository
// ============================================================================

/// 机器实体（用于持久化）
#[derive(Debug, Clone, PartialEq)]
pub struct MachineRecord {
    pub machine_id: i64,
    /// 登记的机器类型（L / M / H）
    pub machine_type: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// 新建机器
#[derive(Debug, Clone)]
pub struct NewMachine {
    pub machine_type: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Machine Repository Port
#[async_trait]
pub trait MachineRepositoryPort: Send + Sync {
    /// 创建机器，返回带 ID 的记录
    async fn create(&self, machine: &NewMachine) -> Result<MachineRecord, RepositoryError>;

    /// 根据 ID 查找机器
    async fn find_by_id(&self, machine_id: i64) -> Result<Option<MachineRecord>, RepositoryError>;

    /// 分页获取机器
    async fn find_all(&self, offset: i64, limit: i64) -> Result<Vec<MachineRecord>, RepositoryError>;

    /// 更新机器信息
    async fn update(&self, machine: &MachineRecord) -> Result<(), RepositoryError>;

    /// 删除机器（连同读数和故障明细）
    async fn delete(&self, machine_id: i64) -> Result<(), RepositoryError>;
}

// ============================================================================
// Reading Repository
// ============================================================================

/// 读数实体（用于持久化）
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingRecord {
    pub reading_id: i64,
    pub machine_id: i64,
    pub air_temperature: f64,
    pub process_temperature: f64,
    pub rotational_speed: i64,
    pub torque: f64,
    pub tool_wear: i64,
    pub machine_failure: bool,
    pub timestamp: DateTime<Utc>,
}

/// 新建读数
#[derive(Debug, Clone)]
pub struct NewReading {
    pub machine_id: i64,
    pub air_temperature: f64,
    pub process_temperature: f64,
    pub rotational_speed: i64,
    pub torque: f64,
    pub tool_wear: i64,
    pub machine_failure: bool,
    pub timestamp: DateTime<Utc>,
}

/// Reading Repository Port
#[async_trait]
pub trait ReadingRepositoryPort: Send + Sync {
    async fn find_by_id(&self, reading_id: i64) -> Result<Option<ReadingRecord>, RepositoryError>;

    /// 分页获取某台机器的读数
    async fn find_by_machine(
        &self,
        machine_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ReadingRecord>, RepositoryError>;

    /// 删除读数（连同故障明细）
    async fn delete(&self, reading_id: i64) -> Result<(), RepositoryError>;
}

// ============================================================================
// Failure Detail Repository
// ============================================================================

/// 故障明细实体（与读数一对一）
#[derive(Debug, Clone, PartialEq)]
pub struct FailureDetailRecord {
    pub failure_id: i64,
    pub reading_id: i64,
    pub flags: FailureFlags,
}

/// Failure Detail Repository Port
#[async_trait]
pub trait FailureDetailRepositoryPort: Send + Sync {
    async fn find_by_id(&self, failure_id: i64) -> Result<Option<FailureDetailRecord>, RepositoryError>;

    async fn find_by_reading(
        &self,
        reading_id: i64,
    ) -> Result<Option<FailureDetailRecord>, RepositoryError>;

    /// 覆盖全部标记（用于人工修正模型结果）
    async fn update(&self, failure_id: i64, flags: &FailureFlags) -> Result<(), RepositoryError>;

    async fn delete(&self, failure_id: i64) -> Result<(), RepositoryError>;
}

// ============================================================================
// Diagnosis Store (Unit of Work)
// ============================================================================

/// 诊断持久化的事务单元
///
/// 读数和故障明细必须在同一事务中写入：要么都提交，要么都不保留。
/// 未调用 `commit` 就被丢弃时，实现必须回滚。
#[async_trait]
pub trait DiagnosisUnitOfWork: Send {
    async fn find_machine(&mut self, machine_id: i64) -> Result<Option<MachineRecord>, RepositoryError>;

    /// 写入读数，返回 reading_id
    async fn insert_reading(&mut self, reading: &NewReading) -> Result<i64, RepositoryError>;

    /// 写入故障明细，返回 failure_id
    async fn insert_failure_detail(
        &mut self,
        reading_id: i64,
        flags: &FailureFlags,
    ) -> Result<i64, RepositoryError>;

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError>;
}

/// Diagnosis Store Port
#[async_trait]
pub trait DiagnosisStorePort: Send + Sync {
    /// 开启一个事务单元
    async fn begin(&self) -> Result<Box<dyn DiagnosisUnitOfWork>, RepositoryError>;
}
