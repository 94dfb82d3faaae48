//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（分类器、Repository、诊断事务单元）
//! - inference: 两级推理流水线
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod inference;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Diagnosis commands
    DiagnoseReading,
    // Machine commands
    CreateMachine,
    DeleteMachine,
    UpdateMachine,
    // Reading / failure detail commands
    DeleteFailureDetail,
    DeleteReading,
    UpdateFailureDetail,
    // Handlers
    handlers::{
        CreateMachineHandler, DeleteFailureDetailHandler, DeleteMachineHandler,
        DeleteReadingHandler, DiagnoseReadingHandler, DiagnoseReadingResponse,
        UpdateFailureDetailHandler, UpdateMachineHandler,
    },
};

pub use error::ApplicationError;

pub use inference::{Diagnosis, DiagnosisPipeline, FailureModels};

pub use ports::{
    // Classifiers
    BinaryClassifier,
    ClassifierError,
    MultiLabelClassifier,
    // Repositories
    DiagnosisStorePort,
    DiagnosisUnitOfWork,
    FailureDetailRecord,
    FailureDetailRepositoryPort,
    MachineRecord,
    MachineRepositoryPort,
    NewMachine,
    NewReading,
    ReadingRecord,
    ReadingRepositoryPort,
    RepositoryError,
};

pub use queries::{
    // Machine queries
    GetMachine,
    ListMachines,
    // Reading queries
    GetReading,
    GetReadingFailureDetail,
    ListMachineReadings,
    // Handlers
    handlers::{
        GetMachineHandler, GetReadingFailureDetailHandler, GetReadingHandler,
        ListMachineReadingsHandler, ListMachinesHandler, MachineResponse, ReadingResponse,
    },
};
