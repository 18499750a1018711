// ==========================================
// 坐标测量质检系统 - 质检方案 (QcProfile)
// ==========================================
// 职责: 映射规则表 + 公差表，作为不可变配置传入引擎
// 红线: 17 个内部标签必须各有一条规则
// 存储: config_kv（key='qc_profile/{name}'，值为 JSON）
// ==========================================

use crate::config::config_manager::config_keys;
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::mapping::{default_rules, CheckpointRule};
use crate::config::tolerance::{default_bands, ToleranceBand};
use crate::domain::types::{CheckpointLabel, MeasureField, ReportLabel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 内置方案名称
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// 质检方案
///
/// 反序列化经过 [`QcProfile::new`] 同样的校验，非法方案无法构造。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QcProfileDef")]
pub struct QcProfile {
    name: String,
    rules: BTreeMap<CheckpointLabel, CheckpointRule>,
    bands: BTreeMap<CheckpointLabel, ToleranceBand>,
}

/// 未校验的方案原始结构（仅用于反序列化）
#[derive(Deserialize)]
struct QcProfileDef {
    name: String,
    rules: BTreeMap<CheckpointLabel, CheckpointRule>,
    #[serde(default)]
    bands: BTreeMap<CheckpointLabel, ToleranceBand>,
}

impl TryFrom<QcProfileDef> for QcProfile {
    type Error = ConfigError;

    fn try_from(def: QcProfileDef) -> Result<Self, Self::Error> {
        QcProfile::new(def.name, def.rules, def.bands)
    }
}

impl QcProfile {
    /// 创建并校验质检方案
    ///
    /// # 校验
    /// - 名称非空
    /// - 17 个内部标签均有规则
    /// - 平均规则至少引用一个点
    /// - 公差带 min <= max
    pub fn new(
        name: impl Into<String>,
        rules: BTreeMap<CheckpointLabel, CheckpointRule>,
        bands: BTreeMap<CheckpointLabel, ToleranceBand>,
    ) -> ConfigResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::EmptyProfileName);
        }

        let missing: Vec<String> = CheckpointLabel::ALL
            .iter()
            .filter(|label| !rules.contains_key(label))
            .map(|label| label.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::IncompleteRules {
                missing: missing.join(","),
            });
        }

        for (label, rule) in &rules {
            if let CheckpointRule::Average { refs } = rule {
                if refs.is_empty() {
                    return Err(ConfigError::EmptyAverage(*label));
                }
            }
        }

        for (label, band) in &bands {
            if !band.is_well_formed() {
                return Err(ConfigError::InvalidBand {
                    label: *label,
                    min: band.min,
                    max: band.max,
                });
            }
        }

        Ok(Self { name, rules, bands })
    }

    /// 内置默认方案
    pub fn default_profile() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            rules: default_rules(),
            bands: default_bands(),
        }
    }

    /// K 检测点当前取值字段（K 不是 DirectLookup 时为 None）
    pub fn k_field(&self) -> Option<MeasureField> {
        match self.rules.get(&CheckpointLabel::K) {
            Some(CheckpointRule::DirectLookup { field, .. }) => Some(*field),
            _ => None,
        }
    }

    /// 固定 K 检测点的取值轴（x/y 两种现场口径）
    ///
    /// # 返回
    /// - Err(ConfigValueError): K 不是 DirectLookup，无法固定取值轴
    pub fn with_k_field(mut self, axis: MeasureField) -> ConfigResult<Self> {
        match self.rules.get_mut(&CheckpointLabel::K) {
            Some(CheckpointRule::DirectLookup { field, .. }) => {
                *field = axis;
                Ok(self)
            }
            _ => Err(ConfigError::ConfigValueError {
                key: config_keys::K_AXIS.to_string(),
                value: axis.to_string(),
                message: format!("方案 {} 的 K 检测点不是单点取值，无法固定取值轴", self.name),
            }),
        }
    }

    /// 以新名称复制方案
    pub fn renamed(mut self, name: impl Into<String>) -> ConfigResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::EmptyProfileName);
        }
        self.name = name;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 取标签规则
    pub fn rule(&self, label: CheckpointLabel) -> &CheckpointRule {
        // 构造时已校验完整性
        static FALLBACK: CheckpointRule = CheckpointRule::Manual;
        self.rules.get(&label).unwrap_or(&FALLBACK)
    }

    pub fn band(&self, label: CheckpointLabel) -> Option<&ToleranceBand> {
        self.bands.get(&label)
    }

    /// 全部映射规则（派生新方案时使用）
    pub fn rules(&self) -> &BTreeMap<CheckpointLabel, CheckpointRule> {
        &self.rules
    }

    pub fn bands(&self) -> &BTreeMap<CheckpointLabel, ToleranceBand> {
        &self.bands
    }

    /// 对外公差表: 14 个标签 → 公差带（无则 None）
    pub fn tolerance_table(&self) -> BTreeMap<ReportLabel, Option<ToleranceBand>> {
        ReportLabel::ALL
            .iter()
            .map(|label| (*label, self.band(label.band_source()).copied()))
            .collect()
    }
}

impl Default for QcProfile {
    fn default() -> Self {
        Self::default_profile()
    }
}
