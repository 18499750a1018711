// ==========================================
// 坐标测量质检系统 - 领域类型定义
// ==========================================
// 职责: 检测点标签 / 测量字段 / 点类型标签
// 红线: 标签集合封闭（内部 17 个，对外 14 个）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 内部检测点标签 (Checkpoint Label)
// ==========================================
// 17 个内部标签: A-F, G1-G4, H-N
// 声明顺序即报告顺序（派生 Ord 依赖此顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CheckpointLabel {
    A,
    B,
    C,
    D,
    E,
    F,
    G1,
    G2,
    G3,
    G4,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
}

impl CheckpointLabel {
    /// 全部内部标签（规则表必须逐一覆盖）
    pub const ALL: [CheckpointLabel; 17] = [
        CheckpointLabel::A,
        CheckpointLabel::B,
        CheckpointLabel::C,
        CheckpointLabel::D,
        CheckpointLabel::E,
        CheckpointLabel::F,
        CheckpointLabel::G1,
        CheckpointLabel::G2,
        CheckpointLabel::G3,
        CheckpointLabel::G4,
        CheckpointLabel::H,
        CheckpointLabel::I,
        CheckpointLabel::J,
        CheckpointLabel::K,
        CheckpointLabel::L,
        CheckpointLabel::M,
        CheckpointLabel::N,
    ];

    /// 四个孔径子检测点（合并为复合 G）
    pub const BORES: [CheckpointLabel; 4] = [
        CheckpointLabel::G1,
        CheckpointLabel::G2,
        CheckpointLabel::G3,
        CheckpointLabel::G4,
    ];

    pub fn is_bore(&self) -> bool {
        matches!(
            self,
            CheckpointLabel::G1 | CheckpointLabel::G2 | CheckpointLabel::G3 | CheckpointLabel::G4
        )
    }

    /// 对外标签（G1-G4 → G）
    pub fn report_label(&self) -> ReportLabel {
        match self {
            CheckpointLabel::A => ReportLabel::A,
            CheckpointLabel::B => ReportLabel::B,
            CheckpointLabel::C => ReportLabel::C,
            CheckpointLabel::D => ReportLabel::D,
            CheckpointLabel::E => ReportLabel::E,
            CheckpointLabel::F => ReportLabel::F,
            CheckpointLabel::G1
            | CheckpointLabel::G2
            | CheckpointLabel::G3
            | CheckpointLabel::G4 => ReportLabel::G,
            CheckpointLabel::H => ReportLabel::H,
            CheckpointLabel::I => ReportLabel::I,
            CheckpointLabel::J => ReportLabel::J,
            CheckpointLabel::K => ReportLabel::K,
            CheckpointLabel::L => ReportLabel::L,
            CheckpointLabel::M => ReportLabel::M,
            CheckpointLabel::N => ReportLabel::N,
        }
    }
}

impl fmt::Display for CheckpointLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 变体名与标签文本一致
        write!(f, "{:?}", self)
    }
}

// ==========================================
// 对外报告标签 (Report Label)
// ==========================================
// 14 个对外标签: A-N（G 为复合检测点）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReportLabel {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
}

impl ReportLabel {
    /// 规范顺序 A..N
    pub const ALL: [ReportLabel; 14] = [
        ReportLabel::A,
        ReportLabel::B,
        ReportLabel::C,
        ReportLabel::D,
        ReportLabel::E,
        ReportLabel::F,
        ReportLabel::G,
        ReportLabel::H,
        ReportLabel::I,
        ReportLabel::J,
        ReportLabel::K,
        ReportLabel::L,
        ReportLabel::M,
        ReportLabel::N,
    ];

    /// 提供公差带的内部标签（G 取 G1，四孔共用同一公差带）
    pub fn band_source(&self) -> CheckpointLabel {
        match self {
            ReportLabel::A => CheckpointLabel::A,
            ReportLabel::B => CheckpointLabel::B,
            ReportLabel::C => CheckpointLabel::C,
            ReportLabel::D => CheckpointLabel::D,
            ReportLabel::E => CheckpointLabel::E,
            ReportLabel::F => CheckpointLabel::F,
            ReportLabel::G => CheckpointLabel::G1,
            ReportLabel::H => CheckpointLabel::H,
            ReportLabel::I => CheckpointLabel::I,
            ReportLabel::J => CheckpointLabel::J,
            ReportLabel::K => CheckpointLabel::K,
            ReportLabel::L => CheckpointLabel::L,
            ReportLabel::M => CheckpointLabel::M,
            ReportLabel::N => CheckpointLabel::N,
        }
    }
}

impl fmt::Display for ReportLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ==========================================
// 测量字段 (Measure Field)
// ==========================================
// 规则引用的数值字段；note 为文本，不可作为取值来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureField {
    X,
    Y,
    Z,
    RotX,
    RotY,
    RotZ,
    Diameter,
    Tolerance,
}

impl MeasureField {
    /// 数据库/展示用字段名
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureField::X => "x",
            MeasureField::Y => "y",
            MeasureField::Z => "z",
            MeasureField::RotX => "rot_x",
            MeasureField::RotY => "rot_y",
            MeasureField::RotZ => "rot_z",
            MeasureField::Diameter => "diameter",
            MeasureField::Tolerance => "tolerance",
        }
    }
}

impl fmt::Display for MeasureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 点类型标签常量
// ==========================================
pub mod type_tags {
    pub const CIRCLE: &str = "CIRCLE";
    pub const PLANE: &str = "PLANE";
    pub const PT_COMP: &str = "PT-COMP";
    pub const DISTANCE: &str = "DISTANCE";
}

// ==========================================
// 行布局 (Line Layout)
// ==========================================
// 由点类型标签决定字段位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLayout {
    /// 含 CIRCLE 或等于 PLANE: 字段 2-10
    Full,
    /// PT-COMP: 字段 2-4（仅坐标）
    PointOnly,
    /// DISTANCE: 字段 1-3 + 字段 8（无描述列，整体前移一位）
    Distance,
    /// 未知标签: 仅保留 index/type_tag
    Unknown,
}

impl LineLayout {
    pub fn for_tag(type_tag: &str) -> Self {
        if type_tag.contains(type_tags::CIRCLE) || type_tag == type_tags::PLANE {
            LineLayout::Full
        } else if type_tag == type_tags::PT_COMP {
            LineLayout::PointOnly
        } else if type_tag == type_tags::DISTANCE {
            LineLayout::Distance
        } else {
            LineLayout::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bores_collapse_to_g() {
        for label in CheckpointLabel::BORES {
            assert!(label.is_bore());
            assert_eq!(label.report_label(), ReportLabel::G);
        }
        assert!(!CheckpointLabel::K.is_bore());
    }

    #[test]
    fn test_report_labels_cover_internal_labels() {
        let mut collapsed: Vec<ReportLabel> =
            CheckpointLabel::ALL.iter().map(|l| l.report_label()).collect();
        collapsed.dedup();
        assert_eq!(collapsed, ReportLabel::ALL.to_vec());
    }

    #[test]
    fn test_label_display() {
        assert_eq!(CheckpointLabel::G3.to_string(), "G3");
        assert_eq!(ReportLabel::G.to_string(), "G");
    }

    #[test]
    fn test_layout_for_tag() {
        assert_eq!(LineLayout::for_tag("CIRCLE"), LineLayout::Full);
        assert_eq!(LineLayout::for_tag("CIRCLE-IN"), LineLayout::Full);
        assert_eq!(LineLayout::for_tag("PLANE"), LineLayout::Full);
        assert_eq!(LineLayout::for_tag("PLANE-2"), LineLayout::Unknown);
        assert_eq!(LineLayout::for_tag("PT-COMP"), LineLayout::PointOnly);
        assert_eq!(LineLayout::for_tag("DISTANCE"), LineLayout::Distance);
        assert_eq!(LineLayout::for_tag("CYLINDER"), LineLayout::Unknown);
    }
}
