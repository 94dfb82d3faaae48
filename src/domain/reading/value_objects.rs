//! Reading Context - Value Objects

use serde::{Deserialize, Serialize};

use super::ReadingError;

/// 机器类型（产品质量等级）
///
/// L = Low, M = Medium, H = High
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineType {
    L,
    M,
    H,
}

impl MachineType {
    pub const ALL: [MachineType; 3] = [MachineType::L, MachineType::M, MachineType::H];

    pub fn as_str(&self) -> &'static str {
        match self {
            MachineType::L => "L",
            MachineType::M => "M",
            MachineType::H => "H",
        }
    }

    /// 解析类型代码（忽略大小写和首尾空白）
    pub fn parse(code: &str) -> Result<Self, ReadingError> {
        match code.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(MachineType::L),
            "M" => Ok(MachineType::M),
            "H" => Ok(MachineType::H),
            _ => Err(ReadingError::InvalidMachineType(code.to_string())),
        }
    }

    /// 判断数据库中登记的机器类型是否与本类型一致
    pub fn matches(&self, registered: &str) -> bool {
        registered.trim().eq_ignore_ascii_case(self.as_str())
    }
}

impl std::fmt::Display for MachineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 传感器原始读数
///
/// 不变量:
/// - 温度、扭矩必须是有限数
/// - 转速、刀具磨损不能为负
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    machine_type: MachineType,
    air_temperature: f64,
    process_temperature: f64,
    rotational_speed: i64,
    torque: f64,
    tool_wear: i64,
}

impl RawReading {
    pub fn new(
        machine_type: MachineType,
        air_temperature: f64,
        process_temperature: f64,
        rotational_speed: i64,
        torque: f64,
        tool_wear: i64,
    ) -> Result<Self, ReadingError> {
        for (field, value) in [
            ("air_temperature", air_temperature),
            ("process_temperature", process_temperature),
            ("torque", torque),
        ] {
            if !value.is_finite() {
                return Err(ReadingError::NonFinite(field));
            }
        }
        if rotational_speed < 0 {
            return Err(ReadingError::Negative("rotational_speed"));
        }
        if tool_wear < 0 {
            return Err(ReadingError::Negative("tool_wear"));
        }

        Ok(Self {
            machine_type,
            air_temperature,
            process_temperature,
            rotational_speed,
            torque,
            tool_wear,
        })
    }

    // Getters
    pub fn machine_type(&self) -> MachineType {
        self.machine_type
    }

    pub fn air_temperature(&self) -> f64 {
        self.air_temperature
    }

    pub fn process_temperature(&self) -> f64 {
        self.process_temperature
    }

    pub fn rotational_speed(&self) -> i64 {
        self.rotational_speed
    }

    pub fn torque(&self) -> f64 {
        self.torque
    }

    pub fn tool_wear(&self) -> i64 {
        self.tool_wear
    }
}
