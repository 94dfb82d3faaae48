//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateMachineHandler, DeleteFailureDetailHandler, DeleteMachineHandler, DeleteReadingHandler,
    DiagnoseReadingHandler, UpdateFailureDetailHandler, UpdateMachineHandler,
    // Query handlers
    GetMachineHandler, GetReadingFailureDetailHandler, GetReadingHandler,
    ListMachineReadingsHandler, ListMachinesHandler,
    // Inference
    DiagnosisPipeline,
    // Ports
    DiagnosisStorePort, FailureDetailRepositoryPort, MachineRepositoryPort, ReadingRepositoryPort,
};

/// 应用状态
///
/// 模型在启动时加载，之后只读共享
pub struct AppState {
    pub pipeline: Arc<DiagnosisPipeline>,

    // ========== Command Handlers ==========
    pub diagnose_handler: DiagnoseReadingHandler,
    pub create_machine_handler: CreateMachineHandler,
    pub update_machine_handler: UpdateMachineHandler,
    pub delete_machine_handler: DeleteMachineHandler,
    pub delete_reading_handler: DeleteReadingHandler,
    pub update_failure_handler: UpdateFailureDetailHandler,
    pub delete_failure_handler: DeleteFailureDetailHandler,

    // ========== Query Handlers ==========
    pub get_machine_handler: GetMachineHandler,
    pub list_machines_handler: ListMachinesHandler,
    pub get_reading_handler: GetReadingHandler,
    pub list_readings_handler: ListMachineReadingsHandler,
    pub get_failure_handler: GetReadingFailureDetailHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        pipeline: Arc<DiagnosisPipeline>,
        machine_repo: Arc<dyn MachineRepositoryPort>,
        reading_repo: Arc<dyn ReadingRepositoryPort>,
        failure_repo: Arc<dyn FailureDetailRepositoryPort>,
        diagnosis_store: Arc<dyn DiagnosisStorePort>,
    ) -> Self {
        Self {
            pipeline: pipeline.clone(),

            // Command handlers
            diagnose_handler: DiagnoseReadingHandler::new(pipeline, diagnosis_store),
            create_machine_handler: CreateMachineHandler::new(machine_repo.clone()),
            update_machine_handler: UpdateMachineHandler::new(machine_repo.clone()),
            delete_machine_handler: DeleteMachineHandler::new(machine_repo.clone()),
            delete_reading_handler: DeleteReadingHandler::new(reading_repo.clone()),
            update_failure_handler: UpdateFailureDetailHandler::new(failure_repo.clone()),
            delete_failure_handler: DeleteFailureDetailHandler::new(failure_repo.clone()),

            // Query handlers
            get_machine_handler: GetMachineHandler::new(
                machine_repo.clone(),
                reading_repo.clone(),
                failure_repo.clone(),
            ),
            list_machines_handler: ListMachinesHandler::new(machine_repo.clone()),
            get_reading_handler: GetReadingHandler::new(reading_repo.clone(), failure_repo.clone()),
            list_readings_handler: ListMachineReadingsHandler::new(
                machine_repo,
                reading_repo.clone(),
                failure_repo.clone(),
            ),
            get_failure_handler: GetReadingFailureDetailHandler::new(reading_repo, failure_repo),
        }
    }
}
