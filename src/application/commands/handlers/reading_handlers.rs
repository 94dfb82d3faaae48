//! Reading / Failure Detail Command Handlers

use std::sync::Arc;

use crate::application::commands::{DeleteFailureDetail, DeleteReading, UpdateFailureDetail};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    FailureDetailRecord, FailureDetailRepositoryPort, ReadingRepositoryPort,
};

/// DeleteReading Handler
pub struct DeleteReadingHandler {
    reading_repo: Arc<dyn ReadingRepositoryPort>,
}

impl DeleteReadingHandler {
    pub fn new(reading_repo: Arc<dyn ReadingRepositoryPort>) -> Self {
        Self { reading_repo }
    }

    pub async fn handle(&self, command: DeleteReading) -> Result<(), ApplicationError> {
        self.reading_repo
            .find_by_id(command.reading_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Reading", command.reading_id))?;

        self.reading_repo.delete(command.reading_id).await?;

        tracing::info!(reading_id = command.reading_id, "Reading deleted");

        Ok(())
    }
}

/// UpdateFailureDetail Handler - 覆盖全部标记
pub struct UpdateFailureDetailHandler {
    failure_repo: Arc<dyn FailureDetailRepositoryPort>,
}

impl UpdateFailureDetailHandler {
    pub fn new(failure_repo: Arc<dyn FailureDetailRepositoryPort>) -> Self {
        Self { failure_repo }
    }

    pub async fn handle(
        &self,
        command: UpdateFailureDetail,
    ) -> Result<FailureDetailRecord, ApplicationError> {
        let existing = self
            .failure_repo
            .find_by_id(command.failure_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("FailureType", command.failure_id))?;

        self.failure_repo
            .update(command.failure_id, &command.flags)
            .await?;

        tracing::info!(
            failure_id = command.failure_id,
            reading_id = existing.reading_id,
            flags = ?command.flags,
            "Failure detail corrected"
        );

        Ok(FailureDetailRecord {
            flags: command.flags,
            ..existing
        })
    }
}

/// DeleteFailureDetail Handler
pub struct DeleteFailureDetailHandler {
    failure_repo: Arc<dyn FailureDetailRepositoryPort>,
}

impl DeleteFailureDetailHandler {
    pub fn new(failure_repo: Arc<dyn FailureDetailRepositoryPort>) -> Self {
        Self { failure_repo }
    }

    pub async fn handle(&self, command: DeleteFailureDetail) -> Result<(), ApplicationError> {
        self.failure_repo
            .find_by_id(command.failure_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("FailureType", command.failure_id))?;

        self.failure_repo.delete(command.failure_id).await?;

        tracing::info!(failure_id = command.failure_id, "Failure detail deleted");

        Ok(())
    }
}
