//! SQLite Reading Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::database::db_error;
use super::DbPool;
use crate::application::ports::{ReadingRecord, ReadingRepositoryPort, RepositoryError};

/// SQLite Reading Repository
pub struct SqliteReadingRepository {
    pool: DbPool,
}

impl SqliteReadingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const SELECT_READING: &str = "SELECT reading_id, machine_id, air_temperature, process_temperature, rotational_speed, torque, tool_wear, machine_failure, timestamp FROM machine_readings";

#[derive(FromRow)]
struct ReadingRow {
    reading_id: i64,
    machine_id: i64,
    air_temperature: f64,
    process_temperature: f64,
    rotational_speed: i64,
    torque: f64,
    tool_wear: i64,
    machine_failure: bool,
    timestamp: String,
}

impl TryFrom<ReadingRow> for ReadingRecord {
    type Error = RepositoryError;

    fn try_from(row: ReadingRow) -> Result<Self, Self::Error> {
        Ok(ReadingRecord {
            reading_id: row.reading_id,
            machine_id: row.machine_id,
            air_temperature: row.air_temperature,
            process_temperature: row.process_temperature,
            rotational_speed: row.rotational_speed,
            torque: row.torque,
            tool_wear: row.tool_wear,
            machine_failure: row.machine_failure,
            timestamp: DateTime::parse_from_rfc3339(&row.timestamp)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl ReadingRepositoryPort for SqliteReadingRepository {
    async fn find_by_id(&self, reading_id: i64) -> Result<Option<ReadingRecord>, RepositoryError> {
        let row: Option<ReadingRow> =
            sqlx::query_as(&format!("{} WHERE reading_id = ?", SELECT_READING))
                .bind(reading_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(ReadingRecord::try_from).transpose()
    }

    async fn find_by_machine(
        &self,
        machine_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ReadingRecord>, RepositoryError> {
        let rows: Vec<ReadingRow> = sqlx::query_as(&format!(
            "{} WHERE machine_id = ? ORDER BY reading_id LIMIT ? OFFSET ?",
            SELECT_READING
        ))
        .bind(machine_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(ReadingRecord::try_from).collect()
    }

    async fn delete(&self, reading_id: i64) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("DELETE FROM failure_types WHERE reading_id = ?")
            .bind(reading_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        sqlx::query("DELETE FROM machine_readings WHERE reading_id = ?")
            .bind(reading_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }
}
