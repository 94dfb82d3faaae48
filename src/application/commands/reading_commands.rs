//! Reading / Failure Detail Commands

use crate::domain::diagnosis::FailureFlags;

/// 删除读数（连同故障明细）
#[derive(Debug, Clone)]
pub struct DeleteReading {
    pub reading_id: i64,
}

/// 人工修正故障明细
#[derive(Debug, Clone)]
pub struct UpdateFailureDetail {
    pub failure_id: i64,
    pub flags: FailureFlags,
}

#[derive(Debug, Clone)]
pub struct DeleteFailureDetail {
    pub failure_id: i64,
}
