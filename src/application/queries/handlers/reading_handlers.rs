//! Reading Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    FailureDetailRecord, FailureDetailRepositoryPort, MachineRepositoryPort, ReadingRecord,
    ReadingRepositoryPort,
};
use crate::application::queries::{GetReading, GetReadingFailureDetail, ListMachineReadings};

/// 读数列表默认条数
pub const DEFAULT_READING_LIMIT: i64 = 50;

// ============================================================================
// Response DTOs
// ============================================================================

/// 读数详情（含故障明细）
#[derive(Debug, Clone)]
pub struct ReadingResponse {
    pub reading: ReadingRecord,
    pub failure_details: Option<FailureDetailRecord>,
}

/// 校验分页参数，返回 (offset, limit)
pub(crate) fn page(
    skip: Option<i64>,
    limit: Option<i64>,
    default_limit: i64,
) -> Result<(i64, i64), ApplicationError> {
    let skip = skip.unwrap_or(0);
    let limit = limit.unwrap_or(default_limit);
    if skip < 0 {
        return Err(ApplicationError::validation("skip must not be negative"));
    }
    if limit <= 0 {
        return Err(ApplicationError::validation("limit must be positive"));
    }
    Ok((skip, limit))
}

/// 为每条读数附上故障明细
pub(crate) async fn with_failure_details(
    failure_repo: &dyn FailureDetailRepositoryPort,
    readings: Vec<ReadingRecord>,
) -> Result<Vec<ReadingResponse>, ApplicationError> {
    let mut responses = Vec::with_capacity(readings.len());
    for reading in readings {
        let failure_details = failure_repo.find_by_reading(reading.reading_id).await?;
        responses.push(ReadingResponse {
            reading,
            failure_details,
        });
    }
    Ok(responses)
}

// ============================================================================
// Handlers
// ============================================================================

/// GetReading Handler
pub struct GetReadingHandler {
    reading_repo: Arc<dyn ReadingRepositoryPort>,
    failure_repo: Arc<dyn FailureDetailRepositoryPort>,
}

impl GetReadingHandler {
    pub fn new(
        reading_repo: Arc<dyn ReadingRepositoryPort>,
        failure_repo: Arc<dyn FailureDetailRepositoryPort>,
    ) -> Self {
        Self {
            reading_repo,
            failure_repo,
        }
    }

    pub async fn handle(&self, query: GetReading) -> Result<ReadingResponse, ApplicationError> {
        let reading = self
            .reading_repo
            .find_by_id(query.reading_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Reading", query.reading_id))?;

        let failure_details = self.failure_repo.find_by_reading(reading.reading_id).await?;

        Ok(ReadingResponse {
            reading,
            failure_details,
        })
    }
}

/// ListMachineReadings Handler
pub struct ListMachineReadingsHandler {
    machine_repo: Arc<dyn MachineRepositoryPort>,
    reading_repo: Arc<dyn ReadingRepositoryPort>,
    failure_repo: Arc<dyn FailureDetailRepositoryPort>,
}

impl ListMachineReadingsHandler {
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

    pub async fn handle(
        &self,
        query: ListMachineReadings,
    ) -> Result<Vec<ReadingResponse>, ApplicationError> {
        let (offset, limit) = page(query.skip, query.limit, DEFAULT_READING_LIMIT)?;

        // 机器必须存在
        self.machine_repo
            .find_by_id(query.machine_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Machine", query.machine_id))?;

        let readings = self
            .reading_repo
            .find_by_machine(query.machine_id, offset, limit)
            .await?;

        with_failure_details(self.failure_repo.as_ref(), readings).await
    }
}

/// GetReadingFailureDetail Handler
pub struct GetReadingFailureDetailHandler {
    reading_repo: Arc<dyn ReadingRepositoryPort>,
    failure_repo: Arc<dyn FailureDetailRepositoryPort>,
}

impl GetReadingFailureDetailHandler {
    pub fn new(
        reading_repo: Arc<dyn ReadingRepositoryPort>,
        failure_repo: Arc<dyn FailureDetailRepositoryPort>,
    ) -> Self {
        Self {
            reading_repo,
            failure_repo,
        }
    }

    pub async fn handle(
        &self,
        query: GetReadingFailureDetail,
    ) -> Result<FailureDetailRecord, ApplicationError> {
        self.reading_repo
            .find_by_id(query.reading_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Reading", query.reading_id))?;

        // 正常读数没有故障明细
        self.failure_repo
            .find_by_reading(query.reading_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("FailureDetail", query.reading_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        assert_eq!(page(None, None, DEFAULT_READING_LIMIT).unwrap(), (0, 50));
        assert_eq!(page(Some(10), Some(5), DEFAULT_READING_LIMIT).unwrap(), (10, 5));
    }

    #[test]
    fn test_page_rejects_invalid_bounds() {
        assert!(matches!(
            page(Some(-1), None, 50),
            Err(ApplicationError::ValidationError(_))
        ));
        assert!(matches!(
            page(None, Some(0), 50),
            Err(ApplicationError::ValidationError(_))
        ));
    }
}
