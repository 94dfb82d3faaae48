//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod diagnosis_store;
mod failure_repo;
mod machine_repo;
mod reading_repo;

pub use database::{create_pool, run_migrations, DatabaseConfig, DbPool};
pub use diagnosis_store::*;
pub use failure_repo::*;
pub use machine_repo::SqliteMachineRepository;
pub use reading_repo::*;
