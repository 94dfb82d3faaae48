//! Diagnosis Commands

use crate::domain::reading::RawReading;

/// 诊断读数并保存（读数 + 故障明细）
#[derive(Debug, Clone)]
pub struct DiagnoseReading {
    pub machine_id: i64,
    pub reading: RawReading,
}
