//! Machine Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateMachine, DeleteMachine, UpdateMachine};
use crate::application::error::ApplicationError;
use crate::application::ports::{MachineRecord, MachineRepositoryPort, NewMachine};
use crate::domain::reading::MachineType;

// ============================================================================
// CreateMachine
// ============================================================================

/// CreateMachine Handler
pub struct CreateMachineHandler {
    machine_repo: Arc<dyn MachineRepositoryPort>,
}

impl CreateMachineHandler {
    pub fn new(machine_repo: Arc<dyn MachineRepositoryPort>) -> Self {
        Self { machine_repo }
    }

    pub async fn handle(&self, command: CreateMachine) -> Result<MachineRecord, ApplicationError> {
        // 统一保存规范化的类型代码
        let machine_type = MachineType::parse(&command.machine_type)?;

        let machine = self
            .machine_repo
            .create(&NewMachine {
                machine_type: machine_type.as_str().to_string(),
                location: command.location,
                description: command.description,
            })
            .await?;

        tracing::info!(
            machine_id = machine.machine_id,
            machine_type = %machine.machine_type,
            "Machine created"
        );

        Ok(machine)
    }
}

// ============================================================================
// UpdateMachine
// ============================================================================

/// UpdateMachine Handler
pub struct UpdateMachineHandler {
    machine_repo: Arc<dyn MachineRepositoryPort>,
}

impl UpdateMachineHandler {
    pub fn new(machine_repo: Arc<dyn MachineRepositoryPort>) -> Self {
        Self { machine_repo }
    }

    pub async fn handle(&self, command: UpdateMachine) -> Result<MachineRecord, ApplicationError> {
        let machine_type = MachineType::parse(&command.machine_type)?;

        let existing = self
            .machine_repo
            .find_by_id(command.machine_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Machine", command.machine_id))?;

        let updated = MachineRecord {
            machine_id: existing.machine_id,
            machine_type: machine_type.as_str().to_string(),
            location: command.location,
            description: command.description,
        };
        self.machine_repo.update(&updated).await?;

        tracing::info!(machine_id = updated.machine_id, "Machine updated");

        Ok(updated)
    }
}

// ============================================================================
// DeleteMachine
// ============================================================================

/// DeleteMachine Handler
pub struct DeleteMachineHandler {
    machine_repo: Arc<dyn MachineRepositoryPort>,
}

impl DeleteMachineHandler {
    pub fn new(machine_repo: Arc<dyn MachineRepositoryPort>) -> Self {
        Self { machine_repo }
    }

    pub async fn handle(&self, command: DeleteMachine) -> Result<(), ApplicationError> {
        // 检查机器是否存在
        self.machine_repo
            .find_by_id(command.machine_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Machine", command.machine_id))?;

        self.machine_repo.delete(command.machine_id).await?;

        tracing::info!(machine_id = command.machine_id, "Machine deleted");

        Ok(())
    }
}
