// ==========================================
// 坐标测量质检系统 - 检测点映射规则
// ==========================================
// 职责: 描述每个检测点的取值方式
// 规则: DirectLookup / Average / Manual / Visual 四选一
// 红线: 绝对值变换只作用于 DirectLookup
// ==========================================

use crate::domain::types::{type_tags, CheckpointLabel, MeasureField};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// PointRef - 测量点字段引用
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRef {
    pub index: i64,
    pub type_tag: String,
    pub field: MeasureField,
}

impl PointRef {
    pub fn new(index: i64, type_tag: &str, field: MeasureField) -> Self {
        Self {
            index,
            type_tag: type_tag.to_string(),
            field,
        }
    }
}

// ==========================================
// CheckpointRule - 检测点取值规则
// ==========================================
// 序列化格式: { "type": "DIRECT_LOOKUP", ... }
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckpointRule {
    /// 直接取值（可选取绝对值）
    DirectLookup {
        index: i64,
        type_tag: String,
        field: MeasureField,
        #[serde(default)]
        absolute: bool,
    },
    /// 多点平均（忽略缺失点）
    Average { refs: Vec<PointRef> },
    /// 人工录入（引擎恒为空）
    Manual,
    /// 目视检查（引擎恒为空）
    Visual,
}

impl CheckpointRule {
    pub fn direct(index: i64, type_tag: &str, field: MeasureField) -> Self {
        CheckpointRule::DirectLookup {
            index,
            type_tag: type_tag.to_string(),
            field,
            absolute: false,
        }
    }

    pub fn direct_abs(index: i64, type_tag: &str, field: MeasureField) -> Self {
        CheckpointRule::DirectLookup {
            index,
            type_tag: type_tag.to_string(),
            field,
            absolute: true,
        }
    }

    pub fn average(refs: Vec<PointRef>) -> Self {
        CheckpointRule::Average { refs }
    }
}

/// 默认映射表（K 取 x 轴绝对值）
pub fn default_rules() -> BTreeMap<CheckpointLabel, CheckpointRule> {
    use CheckpointLabel::*;
    use MeasureField::{Diameter, RotZ, X, Z};
    use type_tags::{CIRCLE, DISTANCE, PLANE, PT_COMP};

    let mut rules = BTreeMap::new();
    rules.insert(A, CheckpointRule::direct(1, CIRCLE, Diameter));
    rules.insert(B, CheckpointRule::direct(2, CIRCLE, Diameter));
    rules.insert(C, CheckpointRule::direct_abs(3, PLANE, Z));
    rules.insert(D, CheckpointRule::direct(4, DISTANCE, Z));
    rules.insert(
        E,
        CheckpointRule::average(vec![
            PointRef::new(5, PT_COMP, Z),
            PointRef::new(6, PT_COMP, Z),
            PointRef::new(7, PT_COMP, Z),
        ]),
    );
    rules.insert(F, CheckpointRule::direct_abs(8, CIRCLE, X));

    // 四孔结构一致
    rules.insert(G1, CheckpointRule::direct(9, CIRCLE, Diameter));
    rules.insert(G2, CheckpointRule::direct(10, CIRCLE, Diameter));
    rules.insert(G3, CheckpointRule::direct(11, CIRCLE, Diameter));
    rules.insert(G4, CheckpointRule::direct(12, CIRCLE, Diameter));

    rules.insert(H, CheckpointRule::direct(13, CIRCLE, Diameter));
    rules.insert(I, CheckpointRule::direct(14, DISTANCE, Diameter));
    rules.insert(
        J,
        CheckpointRule::average(vec![
            PointRef::new(15, CIRCLE, Diameter),
            PointRef::new(16, CIRCLE, Diameter),
        ]),
    );
    rules.insert(K, CheckpointRule::direct_abs(17, PT_COMP, X));
    rules.insert(L, CheckpointRule::direct(18, PLANE, RotZ));
    rules.insert(M, CheckpointRule::Manual);
    rules.insert(N, CheckpointRule::Visual);
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_cover_all_labels() {
        let rules = default_rules();
        assert_eq!(rules.len(), 17);
        for label in CheckpointLabel::ALL {
            assert!(rules.contains_key(&label), "缺少 {}", label);
        }
    }

    #[test]
    fn test_rule_json_shape() {
        let rule = CheckpointRule::direct_abs(17, "PT-COMP", MeasureField::X);
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["type"], "DIRECT_LOOKUP");
        assert_eq!(json["index"], 17);
        assert_eq!(json["type_tag"], "PT-COMP");
        assert_eq!(json["field"], "x");
        assert_eq!(json["absolute"], true);

        let manual: CheckpointRule = serde_json::from_str(r#"{"type":"MANUAL"}"#).unwrap();
        assert_eq!(manual, CheckpointRule::Manual);
    }

    #[test]
    fn test_absolute_defaults_to_false() {
        let rule: CheckpointRule = serde_json::from_str(
            r#"{"type":"DIRECT_LOOKUP","index":1,"type_tag":"CIRCLE","field":"diameter"}"#,
        )
        .unwrap();
        assert_eq!(rule, CheckpointRule::direct(1, "CIRCLE", MeasureField::Diameter));
    }
}
