//! Machine Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    FailureDetailRepositoryPort, MachineRecord, MachineRepositoryPort, ReadingRepositoryPort,
};
use crate::application::queries::{GetMachine, ListMachines};

use super::reading_handlers::{page, with_failure_details, ReadingResponse};

/// 机器列表默认条数
pub const DEFAULT_MACHINE_LIMIT: i64 = 100;

/// 机器详情响应
#[derive(Debug, Clone)]
pub struct MachineResponse {
    pub machine: MachineRecord,
    pub readings: Vec<ReadingResponse>,
}

/// GetMachine Handler
pub struct GetMachineHandler {
    machine_repo: Arc<dyn MachineRepositoryPort>,
    reading_repo: Arc<dyn ReadingRepositoryPort>,
    failure_repo: Arc<dyn FailureDetailRepositoryPort>,
}

impl GetMachineHandler {
    pub fn new(
        machine_repo: Arc<dyn MachineRepositoryPort>,
        reading_repo: Arc<dyn ReadingRepositoryPort>,
        failure_repo: Arc<dyn FailureDetailRepositoryPort>,
    ) -> Self {
        Self {
            machine_repo,
            reading_repo,
            failure_repo,
        }
    }

    pub async fn handle(&self, query: GetMachine) -> Result<MachineResponse, ApplicationError> {
        let machine = self
            .machine_repo
            .find_by_id(query.machine_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Machine", query.machine_id))?;

        let readings = self
            .reading_repo
            .find_by_machine(machine.machine_id, 0, i64::MAX)
            .await?;
        let readings = with_failure_details(self.failure_repo.as_ref(), readings).await?;

        Ok(MachineResponse { machine, readings })
    }
}

/// ListMachines Handler - 只返回机器本身
pub struct ListMachinesHandler {
    machine_repo: Arc<dyn MachineRepositoryPort>,
}

impl ListMachinesHandler {
    pub fn new(machine_repo: Arc<dyn MachineRepositoryPort>) -> Self {
        Self { machine_repo }
    }

    pub async fn handle(&self, query: ListMachines) -> Result<Vec<MachineRecord>, ApplicationError> {
        let (offset, limit) = page(query.skip, query.limit, DEFAULT_MACHINE_LIMIT)?;
        let machines = self.machine_repo.find_all(offset, limit).await?;
        Ok(machines)
    }
}
