//! Reading Context - 传感器读数限界上下文
//!
//! 职责:
//! - 机器类型分类
//! - 原始读数校验

mod errors;
mod value_objects;

pub use errors::ReadingError;
pub use value_objects::{MachineType, RawReading};
