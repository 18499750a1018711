// ==========================================
// 坐标测量质检系统 - 复合 G 汇总引擎
// ==========================================
// 输入: G1-G4 各自的校验结果（同一公差带）
// 输出: 复合 G 结果
// 规则:
// - 四项均合格（未测量视为合格）→ 原样返回 G1 结果
// - 存在不合格项 → is_valid=false，value 为升序子标签列表（如 "G2,G4"）
// 注: 失败时 value 不是数值文本，消费方需先判断 is_valid
// ==========================================

use crate::domain::report::CheckpointResult;
use crate::domain::types::CheckpointLabel;
use std::collections::BTreeMap;

pub struct GAggregator;

impl GAggregator {
    pub fn aggregate(&self, bores: &BTreeMap<CheckpointLabel, CheckpointResult>) -> CheckpointResult {
        // BTreeMap 按标签升序
        let failing: Vec<String> = bores
            .iter()
            .filter(|(label, result)| label.is_bore() && !result.is_valid)
            .map(|(label, _)| label.to_string())
            .collect();

        if failing.is_empty() {
            return bores
                .get(&CheckpointLabel::G1)
                .cloned()
                .unwrap_or_else(CheckpointResult::missing);
        }

        CheckpointResult {
            value: failing.join(","),
            is_valid: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tolerance::ToleranceBand;
    use crate::engine::validator::ToleranceValidator;

    fn bores(values: [Option<f64>; 4]) -> BTreeMap<CheckpointLabel, CheckpointResult> {
        let band = ToleranceBand::new(7.8, 8.2);
        CheckpointLabel::BORES
            .iter()
            .zip(values)
            .map(|(label, v)| (*label, ToleranceValidator.validate(v, Some(&band))))
            .collect()
    }

    #[test]
    fn test_single_failure_reports_label() {
        let g = GAggregator.aggregate(&bores([Some(8.0), Some(9.0), None, Some(8.1)]));
        assert_eq!(g.value, "G2");
        assert!(!g.is_valid);
    }

    #[test]
    fn test_all_passing_returns_g1_verbatim() {
        let g = GAggregator.aggregate(&bores([Some(8.0), Some(8.1), None, Some(7.9)]));
        assert_eq!(g.value, "8.000");
        assert!(g.is_valid);
    }

    #[test]
    fn test_multiple_failures_ascending() {
        let g = GAggregator.aggregate(&bores([Some(8.0), Some(7.0), Some(8.0), Some(9.5)]));
        assert_eq!(g.value, "G2,G4");
        assert!(!g.is_valid);
    }

    #[test]
    fn test_g1_missing_but_others_pass() {
        let g = GAggregator.aggregate(&bores([None, Some(8.0), Some(8.0), Some(8.0)]));
        assert_eq!(g, CheckpointResult::missing());
    }

    #[test]
    fn test_all_missing() {
        let g = GAggregator.aggregate(&bores([None, None, None, None]));
        assert_eq!(g.value, "-");
        assert!(g.is_valid);
    }

    #[test]
    fn test_g1_failure_included() {
        let g = GAggregator.aggregate(&bores([Some(7.0), None, None, None]));
        assert_eq!(g.value, "G1");
        assert!(!g.is_valid);
    }
}
