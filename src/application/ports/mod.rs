//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod classifier;
mod repositories;

pub use classifier::{BinaryClassifier, ClassifierError, MultiLabelClassifier};
pub use repositories::{
    DiagnosisStorePort, DiagnosisUnitOfWork, FailureDetailRecord, FailureDetailRepositoryPort,
    MachineRecord, MachineRepositoryPort, NewMachine, NewReading, ReadingRecord,
    ReadingRepositoryPort, RepositoryError,
};
