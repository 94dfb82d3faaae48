//! Reading Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadingError {
    #[error("无效的机器类型: {0} (允许: L, M, H)")]
    InvalidMachineType(String),

    #[error("字段 {0} 必须是有限数")]
    NonFinite(&'static str),

    #[error("字段 {0} 不能为负")]
    Negative(&'static str),
}
