//! Query Handlers 实现
//!
//! 所有 QueryHandler 的具体实现

mod machine_handlers;
mod reading_handlers;

pub use machine_handlers::*;
pub use reading_handlers::*;
