//! Recommendation Resolver
//!
//! 故障类型标签 → (描述, 建议动作) 的静态目录

use super::{FailureFlags, InferenceError};

/// 已知故障模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureMode {
    /// 刀具磨损
    ToolWear,
    /// 散热
    HeatDissipation,
    /// 功率
    Power,
    /// 过载
    Overstrain,
}

impl FailureMode {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "TWF" => Some(FailureMode::ToolWear),
            "HDF" => Some(FailureMode::HeatDissipation),
            "PWF" => Some(FailureMode::Power),
            "OSF" => Some(FailureMode::Overstrain),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FailureMode::ToolWear => "TWF",
            FailureMode::HeatDissipation => "HDF",
            FailureMode::Power => "PWF",
            FailureMode::Overstrain => "OSF",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FailureMode::ToolWear => "Falla por Desgaste de Herramienta (TWF)",
            FailureMode::HeatDissipation => "Falla por Disipación de Calor (HDF)",
            FailureMode::Power => "Falla de Potencia (PWF)",
            FailureMode::Overstrain => "Falla por Sobreesfuerzo (OSF)",
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            FailureMode::ToolWear => "Revisar la herramienta de corte, posible reemplazo necesario",
            FailureMode::HeatDissipation => {
                "Inspeccionar el sistema de refrigeración y las temperaturas de proceso"
            }
            FailureMode::Power => "Verificar la fuente de alimentación y posibles picos de torque",
            FailureMode::Overstrain => "Reducir la velocidad de rotación o el torque aplicado",
        }
    }

    fn mark(&self, flags: &mut FailureFlags) {
        match self {
            FailureMode::ToolWear => flags.twf = true,
            FailureMode::HeatDissipation => flags.hdf = true,
            FailureMode::Power => flags.pwf = true,
            FailureMode::Overstrain => flags.osf = true,
        }
    }
}

/// 一级模型判定故障、二级模型没有识别出类型时的兜底文案
pub const FALLBACK_DESCRIPTION: &str = "Falla Indeterminada";
pub const FALLBACK_ACTION: &str = "Realizar una inspección general de la máquina";

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub description: String,
    pub recommendation: String,
    /// 持久化用标记；无具体类型时 rnf = true
    pub flags: FailureFlags,
}

/// 把激活标签解析为描述和建议
///
/// `active_labels` 需按标签表顺序传入，输出保持同样顺序。
pub fn resolve(active_labels: &[&str]) -> Result<Resolution, InferenceError> {
    let modes = active_labels
        .iter()
        .map(|label| {
            FailureMode::from_label(label)
                .ok_or_else(|| InferenceError::UnknownLabel(label.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if modes.is_empty() {
        return Ok(Resolution {
            description: FALLBACK_DESCRIPTION.to_string(),
            recommendation: FALLBACK_ACTION.to_string(),
            flags: FailureFlags {
                rnf: true,
                ..FailureFlags::default()
            },
        });
    }

    let mut flags = FailureFlags::default();
    for mode in &modes {
        mode.mark(&mut flags);
    }

    Ok(Resolution {
        description: modes
            .iter()
            .map(|m| m.description())
            .collect::<Vec<_>>()
            .join(", "),
        recommendation: modes
            .iter()
            .map(|m| m.action())
            .collect::<Vec<_>>()
            .join(" "),
        flags,
    })
}
