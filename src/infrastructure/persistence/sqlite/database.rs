//! SQLite Database - 数据库连接和迁移

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::application::ports::RepositoryError;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/machine_doctor.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite:{}?mode=rwc", path.as_ref().display()),
            max_connections: 5,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

const BUSY_TIMEOUT_MS: u64 = 5000;

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

pub(super) fn db_error(err: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(err.to_string())
}

/// 创建数据库连接池
///
/// PRAGMA 写在连接选项里，池中每个连接都会生效
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        // 启用 WAL 模式，允许并发读写
        .journal_mode(SqliteJournalMode::Wal)
        // 遇到锁时等待而不是立即失败
        .busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(
        busy_timeout_ms = BUSY_TIMEOUT_MS,
        "SQLite pool created with WAL mode"
    );

    Ok(pool)
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    // 创建 machines 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS machines (
            machine_id INTEGER PRIMARY KEY AUTOINCREMENT,
            type TEXT NOT NULL,
            location TEXT,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 machine_readings 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS machine_readings (
            reading_id INTEGER PRIMARY KEY AUTOINCREMENT,
            machine_id INTEGER NOT NULL,
            air_temperature REAL NOT NULL,
            process_temperature REAL NOT NULL,
            rotational_speed INTEGER NOT NULL,
            torque REAL NOT NULL,
            tool_wear INTEGER NOT NULL,
            machine_failure INTEGER NOT NULL DEFAULT 0,
            timestamp TEXT NOT NULL,
            FOREIGN KEY (machine_id) REFERENCES machines(machine_id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 failure_types 表（与读数一对一）
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS failure_types (
            failure_id INTEGER PRIMARY KEY AUTOINCREMENT,
            reading_id INTEGER NOT NULL UNIQUE,
            twf INTEGER NOT NULL DEFAULT 0,
            hdf INTEGER NOT NULL DEFAULT 0,
            pwf INTEGER NOT NULL DEFAULT 0,
            osf INTEGER NOT NULL DEFAULT 0,
            rnf INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (reading_id) REFERENCES machine_readings(reading_id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 索引: machine_readings.machine_id
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_machine_readings_machine_id
        ON machine_readings(machine_id)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}
