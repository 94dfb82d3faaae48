//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod machine_queries;
mod reading_queries;

pub mod handlers;

pub use machine_queries::*;
pub use reading_queries::*;
