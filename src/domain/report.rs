// ==========================================
// 坐标测量质检系统 - 检测报告模型
// ==========================================
// 职责: 单检测点结果 + 单文件检测报告
// 对外契约: 14 个标签 A..N，按规范顺序输出
// ==========================================

use crate::domain::types::ReportLabel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 空值展示文本（未测量）
pub const MISSING_VALUE: &str = "-";

// ==========================================
// CheckpointResult - 检测点结果
// ==========================================
// value: "-" / 三位小数 / 复合 G 失败时为子标签列表（如 "G2,G4"）
// 消费方需先判断 is_valid 再解释 value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointResult {
    pub value: String,
    pub is_valid: bool,
}

impl CheckpointResult {
    /// 未测量: 展示 "-"，视为合格
    pub fn missing() -> Self {
        Self {
            value: MISSING_VALUE.to_string(),
            is_valid: true,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.value == MISSING_VALUE
    }
}

// ==========================================
// FileMeasurementReport - 单文件检测报告
// ==========================================
// 序列化为 { "A": {...}, ..., "N": {...} }
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileMeasurementReport {
    entries: BTreeMap<ReportLabel, CheckpointResult>,
}

impl FileMeasurementReport {
    /// 由组装器构造（调用方保证覆盖全部 14 个标签）
    pub(crate) fn from_entries(entries: BTreeMap<ReportLabel, CheckpointResult>) -> Self {
        Self { entries }
    }

    pub fn get(&self, label: ReportLabel) -> Option<&CheckpointResult> {
        self.entries.get(&label)
    }

    /// 按规范顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = (&ReportLabel, &CheckpointResult)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全部检测点合格
    pub fn is_all_valid(&self) -> bool {
        self.entries.values().all(|r| r.is_valid)
    }

    /// 不合格检测点（规范顺序）
    pub fn failed_labels(&self) -> Vec<ReportLabel> {
        self.entries
            .iter()
            .filter(|(_, r)| !r.is_valid)
            .map(|(label, _)| *label)
            .collect()
    }
}
