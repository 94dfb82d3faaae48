//! Machine Queries

/// 获取机器详情（含读数和故障明细）
#[derive(Debug, Clone)]
pub struct GetMachine {
    pub machine_id: i64,
}

/// 分页列出机器
#[derive(Debug, Clone, Default)]
pub struct ListMachines {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
