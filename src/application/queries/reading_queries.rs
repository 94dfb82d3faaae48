//! Reading Queries

#[derive(Debug, Clone)]
pub struct GetReading {
    pub reading_id: i64,
}

/// 分页列出某台机器的读数
#[derive(Debug, Clone)]
pub struct ListMachineReadings {
    pub machine_id: i64,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// 获取读数对应的故障明细
#[derive(Debug, Clone)]
pub struct GetReadingFailureDetail {
    pub reading_id: i64,
}
