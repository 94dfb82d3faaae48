//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod diagnosis_commands;
mod machine_commands;
mod reading_commands;

pub mod handlers;

pub use diagnosis_commands::*;
pub use machine_commands::*;
pub use reading_commands::*;
