// ==========================================
// 坐标测量质检系统 - 公差校验引擎
// ==========================================
// 规则:
// - 有公差带: min <= value <= max 为合格（两端包含）
// - 无公差带: 恒为合格
// - 未测量 (None): 恒为合格，展示 "-"
// 展示: 三位小数
// ==========================================

use crate::config::tolerance::ToleranceBand;
use crate::domain::report::CheckpointResult;

pub struct ToleranceValidator;

impl ToleranceValidator {
    /// 校验单个检测点
    pub fn validate(&self, value: Option<f64>, band: Option<&ToleranceBand>) -> CheckpointResult {
        match value {
            None => CheckpointResult::missing(),
            Some(v) => CheckpointResult {
                value: format_value(v),
                is_valid: band.map_or(true, |b| b.contains(v)),
            },
        }
    }
}

/// 三位小数展示
pub fn format_value(value: f64) -> String {
    let text = format!("{:.3}", value);
    // 舍入为零的负值不带符号
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_always_valid() {
        let band = ToleranceBand::new(7.8, 8.2);
        let r = ToleranceValidator.validate(None, Some(&band));
        assert_eq!(r.value, "-");
        assert!(r.is_valid);

        let r = ToleranceValidator.validate(None, None);
        assert!(r.is_valid);
    }

    #[test]
    fn test_boundaries_inclusive() {
        let band = ToleranceBand::new(7.8, 8.2);
        assert!(ToleranceValidator.validate(Some(7.8), Some(&band)).is_valid);
        assert!(ToleranceValidator.validate(Some(8.2), Some(&band)).is_valid);
        assert!(!ToleranceValidator.validate(Some(8.2001), Some(&band)).is_valid);
        assert!(!ToleranceValidator.validate(Some(7.7999), Some(&band)).is_valid);
    }

    #[test]
    fn test_no_band_always_valid() {
        let r = ToleranceValidator.validate(Some(1.0e6), None);
        assert!(r.is_valid);
        assert_eq!(r.value, "1000000.000");
    }

    #[test]
    fn test_three_decimal_format() {
        assert_eq!(format_value(8.0), "8.000");
        assert_eq!(format_value(12.3456), "12.346");
        assert_eq!(format_value(-0.5), "-0.500");
    }

    #[test]
    fn test_negative_zero_formats_unsigned() {
        assert_eq!(format_value(-0.0), "0.000");
        assert_eq!(format_value(-0.0004), "0.000");
        assert_eq!(format_value(-0.0006), "-0.001");

        let band = ToleranceBand::new(-0.1, 0.1);
        let result = ToleranceValidator.validate(Some(-0.0), Some(&band));
        assert_eq!(result.value, "0.000");
        assert!(result.is_valid);
    }

    #[test]
    fn test_out_of_band_reports_value() {
        let band = ToleranceBand::new(7.8, 8.2);
        let r = ToleranceValidator.validate(Some(9.0), Some(&band));
        assert_eq!(r.value, "9.000");
        assert!(!r.is_valid);
    }
}
