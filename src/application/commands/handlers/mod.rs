//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod diagnosis_handlers;
mod machine_handlers;
mod reading_handlers;

pub use diagnosis_handlers::*;
pub use machine_handlers::*;
pub use reading_handlers::*;
