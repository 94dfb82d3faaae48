//! Diagnosis Command Handler - 诊断并持久化

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::DiagnoseReading;
use crate::application::error::ApplicationError;
use crate::application::inference::{Diagnosis, DiagnosisPipeline};
use crate::application::ports::{DiagnosisStorePort, DiagnosisUnitOfWork, NewReading};
use crate::domain::diagnosis::DiagnosisResult;

/// 诊断响应
#[derive(Debug, Clone)]
pub struct DiagnoseReadingResponse {
    pub result: DiagnosisResult,
    pub reading_id: i64,
}

/// DiagnoseReading Handler
///
/// 读数和故障明细在同一事务内写入，任何失败都回滚。
pub struct DiagnoseReadingHandler {
    pipeline: Arc<DiagnosisPipeline>,
    store: Arc<dyn DiagnosisStorePort>,
}

impl DiagnoseReadingHandler {
    pub fn new(pipeline: Arc<DiagnosisPipeline>, store: Arc<dyn DiagnosisStorePort>) -> Self {
        Self { pipeline, store }
    }

    pub async fn handle(
        &self,
        command: DiagnoseReading,
    ) -> Result<DiagnoseReadingResponse, ApplicationError> {
        // 模型缺失时不触碰存储
        if !self.pipeline.is_ready() {
            return Err(ApplicationError::ModelUnavailable(
                "prediction models are not loaded".to_string(),
            ));
        }

        let mut uow = self.store.begin().await.map_err(ApplicationError::persistence)?;

        let (diagnosis, reading_id) = match self.diagnose_in(uow.as_mut(), &command).await {
            Ok(outcome) => outcome,
            Err(err) => {
                if let Err(rollback_err) = uow.rollback().await {
                    tracing::warn!(error = %rollback_err, "Diagnosis rollback failed");
                }
                return Err(err);
            }
        };

        uow.commit().await.map_err(ApplicationError::persistence)?;

        tracing::info!(
            machine_id = command.machine_id,
            reading_id = reading_id,
            verdict = diagnosis.result.verdict.as_str(),
            confidence = %diagnosis.result.confidence,
            "Reading diagnosed"
        );

        Ok(DiagnoseReadingResponse {
            result: diagnosis.result,
            reading_id,
        })
    }

    async fn diagnose_in(
        &self,
        uow: &mut dyn DiagnosisUnitOfWork,
        command: &DiagnoseReading,
    ) -> Result<(Diagnosis, i64), ApplicationError> {
        let machine = uow
            .find_machine(command.machine_id)
            .await
            .map_err(ApplicationError::persistence)?
            .ok_or(ApplicationError::MachineNotFound(command.machine_id))?;

        let reading_type = command.reading.machine_type();
        if !reading_type.matches(&machine.machine_type) {
            return Err(ApplicationError::TypeMismatch {
                machine_id: machine.machine_id,
                registered: machine.machine_type,
                reading: reading_type.as_str().to_string(),
            });
        }

        let diagnosis = self.pipeline.diagnose(&command.reading)?;

        let raw = &command.reading;
        let reading_id = uow
            .insert_reading(&NewReading {
                machine_id: machine.machine_id,
                air_temperature: raw.air_temperature(),
                process_temperature: raw.process_temperature(),
                rotational_speed: raw.rotational_speed(),
                torque: raw.torque(),
                tool_wear: raw.tool_wear(),
                machine_failure: diagnosis.gate.failure,
                timestamp: Utc::now(),
            })
            .await
            .map_err(ApplicationError::persistence)?;

        if let Some(flags) = &diagnosis.failure_flags {
            uow.insert_failure_detail(reading_id, flags)
                .await
                .map_err(ApplicationError::persistence)?;
        }

        Ok((diagnosis, reading_id))
    }
}
