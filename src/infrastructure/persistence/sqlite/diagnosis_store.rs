//! SQLite Diagnosis Store - 诊断写入的事务单元
//!
//! 事务未提交就被丢弃时，sqlx 会自动回滚。
//! 事务以 BEGIN IMMEDIATE 开启：先读机器再写读数，延迟事务在并发写入时
//! 读锁升级写锁会直接 SQLITE_BUSY，busy_timeout 也不会重试。

use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};

use super::database::db_error;
use super::machine_repo::{MachineRow, SELECT_MACHINE};
use super::DbPool;
use crate::application::ports::{
    DiagnosisStorePort, DiagnosisUnitOfWork, MachineRecord, NewReading, RepositoryError,
};
use crate::domain::diagnosis::FailureFlags;

/// SQLite Diagnosis Store
pub struct SqliteDiagnosisStore {
    pool: DbPool,
}

impl SqliteDiagnosisStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiagnosisStorePort for SqliteDiagnosisStore {
    async fn begin(&self) -> Result<Box<dyn DiagnosisUnitOfWork>, RepositoryError> {
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(db_error)?;
        Ok(Box::new(SqliteUnitOfWork { tx }))
    }
}

struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl DiagnosisUnitOfWork for SqliteUnitOfWork {
    async fn find_machine(&mut self, machine_id: i64) -> Result<Option<MachineRecord>, RepositoryError> {
        let row: Option<MachineRow> =
            sqlx::query_as(&format!("{} WHERE machine_id = ?", SELECT_MACHINE))
                .bind(machine_id)
                .fetch_optional(&mut *self.tx)
                .await
                .map_err(db_error)?;

        Ok(row.map(MachineRecord::from))
    }

    async fn insert_reading(&mut self, reading: &NewReading) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO machine_readings (machine_id, air_temperature, process_temperature, rotational_speed, torque, tool_wear, machine_failure, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(reading.machine_id)
        .bind(reading.air_temperature)
        .bind(reading.process_temperature)
        .bind(reading.rotational_speed)
        .bind(reading.torque)
        .bind(reading.tool_wear)
        .bind(reading.machine_failure)
        .bind(reading.timestamp.to_rfc3339())
        .execute(&mut *self.tx)
        .await
        .map_err(db_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn insert_failure_detail(
        &mut self,
        reading_id: i64,
        flags: &FailureFlags,
    ) -> Result<i64, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO failure_types (reading_id, twf, hdf, pwf, osf, rnf) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(reading_id)
        .bind(flags.twf)
        .bind(flags.hdf)
        .bind(flags.pwf)
        .bind(flags.osf)
        .bind(flags.rnf)
        .execute(&mut *self.tx)
        .await
        .map_err(db_error)?;

        Ok(result.last_insert_rowid())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let uow = *self;
        uow.tx.commit().await.map_err(db_error)
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        let uow = *self;
        uow.tx.rollback().await.map_err(db_error)
    }
}
