//! SQLite Failure Detail Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::database::db_error;
use super::DbPool;
use crate::application::ports::{FailureDetailRecord, FailureDetailRepositoryPort, RepositoryError};
use crate::domain::diagnosis::FailureFlags;

/// SQLite Failure Detail Repository
pub struct SqliteFailureDetailRepository {
    pool: DbPool,
}

impl SqliteFailureDetailRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const SELECT_FAILURE: &str =
    "SELECT failure_id, reading_id, twf, hdf, pwf, osf, rnf FROM failure_types";

#[derive(FromRow)]
struct FailureRow {
    failure_id: i64,
    reading_id: i64,
    twf: bool,
    hdf: bool,
    pwf: bool,
    osf: bool,
    rnf: bool,
}

impl From<FailureRow> for FailureDetailRecord {
    fn from(row: FailureRow) -> Self {
        FailureDetailRecord {
            failure_id: row.failure_id,
            reading_id: row.reading_id,
            flags: FailureFlags {
                twf: row.twf,
                hdf: row.hdf,
                pwf: row.pwf,
                osf: row.osf,
                rnf: row.rnf,
            },
        }
    }
}

#[async_trait]
impl FailureDetailRepositoryPort for SqliteFailureDetailRepository {
    async fn find_by_id(&self, failure_id: i64) -> Result<Option<FailureDetailRecord>, RepositoryError> {
        let row: Option<FailureRow> =
            sqlx::query_as(&format!("{} WHERE failure_id = ?", SELECT_FAILURE))
                .bind(failure_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(FailureDetailRecord::from))
    }

    async fn find_by_reading(
        &self,
        reading_id: i64,
    ) -> Result<Option<FailureDetailRecord>, RepositoryError> {
        let row: Option<FailureRow> =
            sqlx::query_as(&format!("{} WHERE reading_id = ?", SELECT_FAILURE))
                .bind(reading_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(FailureDetailRecord::from))
    }

    async fn update(&self, failure_id: i64, flags: &FailureFlags) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE failure_types SET twf = ?, hdf = ?, pwf = ?, osf = ?, rnf = ? WHERE failure_id = ?",
        )
        .bind(flags.twf)
        .bind(flags.hdf)
        .bind(flags.pwf)
        .bind(flags.osf)
        .bind(flags.rnf)
        .bind(failure_id)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("failure detail {}", failure_id)));
        }

        Ok(())
    }

    async fn delete(&self, failure_id: i64) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM failure_types WHERE failure_id = ?")
            .bind(failure_id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
