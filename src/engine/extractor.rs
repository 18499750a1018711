// ==========================================
// 坐标测量质检系统 - 取值引擎
// ==========================================
// 职责: 按检测点规则从测量点集中取原始数值
// 输入: CheckpointRule + DataPoint 集
// 输出: Option<f64>（None = 未测量）
// ==========================================
// 红线: 查找缺失点不报错，返回 None
// 红线: 绝对值只作用于 DirectLookup，平均值的组成项不取绝对值
// ==========================================

use crate::config::mapping::{CheckpointRule, PointRef};
use crate::domain::measurement::DataPoint;
use crate::domain::types::MeasureField;

// ==========================================
// ValueExtractor - 取值引擎
// ==========================================
pub struct ValueExtractor {
    // 无状态引擎,不需要注入依赖
}

impl ValueExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// 按规则取值
    pub fn extract(&self, rule: &CheckpointRule, points: &[DataPoint]) -> Option<f64> {
        match rule {
            CheckpointRule::DirectLookup {
                index,
                type_tag,
                field,
                absolute,
            } => {
                let value = self.lookup(points, *index, type_tag, *field)?;
                Some(if *absolute { value.abs() } else { value })
            }
            CheckpointRule::Average { refs } => self.average(points, refs),
            // 人工/目视项由引擎外录入
            CheckpointRule::Manual | CheckpointRule::Visual => None,
        }
    }

    /// 复合键查找: 取第一个匹配 (index, type_tag) 的点
    pub fn lookup(
        &self,
        points: &[DataPoint],
        index: i64,
        type_tag: &str,
        field: MeasureField,
    ) -> Option<f64> {
        points
            .iter()
            .find(|p| p.matches(index, type_tag))
            .and_then(|p| p.field(field))
    }

    /// 多点平均: 忽略缺失项，全部缺失时为 None
    fn average(&self, points: &[DataPoint], refs: &[PointRef]) -> Option<f64> {
        let values: Vec<f64> = refs
            .iter()
            .filter_map(|r| self.lookup(points, r.index, &r.type_tag, r.field))
            .collect();

        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

impl Default for ValueExtractor {
    fn default() -> Self {
        Self::new()
    }
}
