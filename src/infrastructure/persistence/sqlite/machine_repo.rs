//! SQLite Machine Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::database::db_error;
use super::DbPool;
use crate::application::ports::{MachineRecord, MachineRepositoryPort, NewMachine, RepositoryError};

/// SQLite Machine Repository
pub struct SqliteMachineRepository {
    pool: DbPool,
}

impl SqliteMachineRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(super) const SELECT_MACHINE: &str =
    "SELECT machine_id, type AS machine_type, location, description FROM machines";

#[derive(FromRow)]
pub(super) struct MachineRow {
    machine_id: i64,
    machine_type: String,
    location: Option<String>,
    description: Option<String>,
}

impl From<MachineRow> for MachineRecord {
    fn from(row: MachineRow) -> Self {
        MachineRecord {
            machine_id: row.machine_id,
            machine_type: row.machine_type,
            location: row.location,
            description: row.description,
        }
    }
}

#[async_trait]
impl MachineRepositoryPort for SqliteMachineRepository {
    async fn create(&self, machine: &NewMachine) -> Result<MachineRecord, RepositoryError> {
        let result = sqlx::query("INSERT INTO machines (type, location, description) VALUES (?, ?, ?)")
            .bind(&machine.machine_type)
            .bind(&machine.location)
            .bind(&machine.description)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(MachineRecord {
            machine_id: result.last_insert_rowid(),
            machine_type: machine.machine_type.clone(),
            location: machine.location.clone(),
            description: machine.description.clone(),
        })
    }

    async fn find_by_id(&self, machine_id: i64) -> Result<Option<MachineRecord>, RepositoryError> {
        let row: Option<MachineRow> =
            sqlx::query_as(&format!("{} WHERE machine_id = ?", SELECT_MACHINE))
                .bind(machine_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(MachineRecord::from))
    }

    async fn find_all(&self, offset: i64, limit: i64) -> Result<Vec<MachineRecord>, RepositoryError> {
        let rows: Vec<MachineRow> = sqlx::query_as(&format!(
            "{} ORDER BY machine_id LIMIT ? OFFSET ?",
            SELECT_MACHINE
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(MachineRecord::from).collect())
    }

    async fn update(&self, machine: &MachineRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE machines SET type = ?, location = ?, description = ? WHERE machine_id = ?",
        )
        .bind(&machine.machine_type)
        .bind(&machine.location)
        .bind(&machine.description)
        .bind(machine.machine_id)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "machine {}",
                machine.machine_id
            )));
        }

        Ok(())
    }

    async fn delete(&self, machine_id: i64) -> Result<(), RepositoryError> {
        // 使用事务确保原子性
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        // 删除关联的 failure_types（通过 machine_readings）
        sqlx::query(
            "DELETE FROM failure_types WHERE reading_id IN (SELECT reading_id FROM machine_readings WHERE machine_id = ?)",
        )
        .bind(machine_id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        // 删除关联的 machine_readings
        sqlx::query("DELETE FROM machine_readings WHERE machine_id = ?")
            .bind(machine_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        sqlx::query("DELETE FROM machines WHERE machine_id = ?")
            .bind(machine_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn repo() -> SqliteMachineRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteMachineRepository::new(pool)
    }

    fn new_machine(machine_type: &str) -> NewMachine {
        NewMachine {
            machine_type: machine_type.to_string(),
            location: Some("Planta Norte".to_string()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = repo().await;
        let created = repo.create(&new_machine("L")).await.unwrap();
        assert!(created.machine_id > 0);

        let found = repo.find_by_id(created.machine_id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_pagination() {
        let repo = repo().await;
        for machine_type in ["L", "M", "H"] {
            repo.create(&new_machine(machine_type)).await.unwrap();
        }

        let page = repo.find_all(1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].machine_type, "M");
        assert_eq!(repo.find_all(0, 100).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update() {
        let repo = repo().await;
        let mut machine = repo.create(&new_machine("L")).await.unwrap();
        machine.machine_type = "H".to_string();
        machine.description = Some("Torno CNC".to_string());
        repo.update(&machine).await.unwrap();

        let found = repo.find_by_id(machine.machine_id).await.unwrap().unwrap();
        assert_eq!(found.machine_type, "H");
        assert_eq!(found.description.as_deref(), Some("Torno CNC"));

        machine.machine_id = 999;
        assert!(matches!(
            repo.update(&machine).await,
            Err(RepositoryError::NotFound(_))
        ));
    }
}
