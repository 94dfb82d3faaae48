//! Feature Vector Builder
//!
//! 把单条原始读数对齐到训练时固定的特征列:
//! - 类型字段展开为 one-hot 列 `type_<CATEGORY>`（训练脚本产出的 `Type_<CATEGORY>` 同样识别）
//! - 数值列同时识别训练脚本使用的西班牙语列名
//! - 训练列表中存在、输入中不存在的列补 0
//! - 输入中存在、训练列表中不存在的列丢弃
//!
//! 对齐是按列名的显式查表，不依赖列的插入顺序。

use std::collections::HashSet;

use super::InferenceError;
use crate::domain::reading::{MachineType, RawReading};

/// 数值特征列名
pub const AIR_TEMPERATURE: &str = "air_temperature";
pub const PROCESS_TEMPERATURE: &str = "process_temperature";
pub const ROTATIONAL_SPEED: &str = "rotational_speed";
pub const TORQUE: &str = "torque";
pub const TOOL_WEAR: &str = "tool_wear";

/// one-hot 列前缀（大小写不敏感）
pub const TYPE_COLUMN_PREFIX: &str = "type_";

/// 数值列的别名表: (列名, 规范列名)
const NUMERIC_ALIASES: [(&str, &str); 5] = [
    ("temp_aire", AIR_TEMPERATURE),
    ("temp_proceso", PROCESS_TEMPERATURE),
    ("velocidad_rotacion", ROTATIONAL_SPEED),
    ("desgaste_herramienta", TOOL_WEAR),
    ("torque", TORQUE),
];

/// 训练时固定的特征列（有序）
///
/// 不变量:
/// - 至少一列
/// - 列名非空且不重复
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainedColumnSchema {
    columns: Vec<String>,
}

impl TrainedColumnSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, InferenceError> {
        if columns.is_empty() {
            return Err(InferenceError::schema_mismatch("column schema is empty"));
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if column.trim().is_empty() {
                return Err(InferenceError::schema_mismatch(
                    "column schema contains an empty name",
                ));
            }
            if !seen.insert(column.as_str()) {
                return Err(InferenceError::schema_mismatch(format!(
                    "duplicate column in schema: {}",
                    column
                )));
            }
        }

        if !columns.iter().any(|c| is_recognized(c)) {
            return Err(InferenceError::schema_mismatch(format!(
                "no column in schema matches a reading feature: {:?}",
                columns
            )));
        }

        Ok(Self { columns })
    }

    /// 无法从读数中取值的列（恒为 0）
    pub fn unrecognized(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| !is_recognized(c))
            .collect()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// 与训练列一一对应的特征向量
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// 构建特征向量
pub fn build_feature_vector(
    raw: &RawReading,
    schema: &TrainedColumnSchema,
) -> Result<FeatureVector, InferenceError> {
    if schema.is_empty() {
        return Err(InferenceError::schema_mismatch("column schema is empty"));
    }

    let values = schema
        .columns()
        .iter()
        .map(|column| expanded_value(raw, column).unwrap_or(0.0))
        .collect();

    Ok(FeatureVector { values })
}

/// 列对应的读数特征
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Feature {
    Numeric(&'static str),
    Type(MachineType),
}

fn feature_of(column: &str) -> Option<Feature> {
    if let Some(&(_, canonical)) = NUMERIC_ALIASES
        .iter()
        .find(|(alias, canonical)| column == *alias || column == *canonical)
    {
        return Some(Feature::Numeric(canonical));
    }

    let prefix = column.get(..TYPE_COLUMN_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(TYPE_COLUMN_PREFIX) {
        return None;
    }
    let code = &column[TYPE_COLUMN_PREFIX.len()..];
    MachineType::ALL
        .into_iter()
        .find(|t| t.as_str() == code)
        .map(Feature::Type)
}

fn is_recognized(column: &str) -> bool {
    feature_of(column).is_some()
}

/// 展开后的输入列取值；None 表示输入中没有该列
fn expanded_value(raw: &RawReading, column: &str) -> Option<f64> {
    match feature_of(column)? {
        Feature::Numeric(AIR_TEMPERATURE) => Some(raw.air_temperature()),
        Feature::Numeric(PROCESS_TEMPERATURE) => Some(raw.process_temperature()),
        Feature::Numeric(ROTATIONAL_SPEED) => Some(raw.rotational_speed() as f64),
        Feature::Numeric(TORQUE) => Some(raw.torque()),
        Feature::Numeric(TOOL_WEAR) => Some(raw.tool_wear() as f64),
        Feature::Numeric(_) => None,
        Feature::Type(machine_type) => (machine_type == raw.machine_type()).then_some(1.0),
    }
}
