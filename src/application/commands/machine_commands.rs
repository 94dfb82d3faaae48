//! Machine Commands

/// 登记机器
#[derive(Debug, Clone)]
pub struct CreateMachine {
    /// 类型代码（L / M / H）
    pub machine_type: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// 更新机器（整体覆盖）
#[derive(Debug, Clone)]
pub struct UpdateMachine {
    pub machine_id: i64,
    pub machine_type: String,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// 删除机器（连同读数和故障明细）
#[derive(Debug, Clone)]
pub struct DeleteMachine {
    pub machine_id: i64,
}
