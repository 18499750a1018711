// ==========================================
// 坐标测量质检系统 - 测量领域模型
// ==========================================
// 职责: 测量点 (DataPoint) 与测量文件头 (MeasurementFile)
// 红线: 测量点集每次上传只派生一次,之后只读
// ==========================================

use crate::domain::types::MeasureField;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// DataPoint - 测量点
// ==========================================
// 查找键: (index, type_tag) 复合键,同一 index 可对应多个类型
// 用途: 解析器写入,引擎只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    // ===== 查找键 =====
    pub index: i64,       // 测量机序号（允许重复与跳号）
    pub type_tag: String, // 点类型（CIRCLE/PLANE/PT-COMP/DISTANCE/其他）

    // ===== 坐标 =====
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,

    // ===== 姿态 =====
    pub rot_x: Option<f64>,
    pub rot_y: Option<f64>,
    pub rot_z: Option<f64>,

    // ===== 附加信息 =====
    pub note: String,
    pub diameter: Option<f64>,
    pub tolerance: Option<f64>,
}

impl DataPoint {
    /// 创建仅含查找键的空记录（数值字段全部为空）
    pub fn new(index: i64, type_tag: impl Into<String>) -> Self {
        Self {
            index,
            type_tag: type_tag.into(),
            x: None,
            y: None,
            z: None,
            rot_x: None,
            rot_y: None,
            rot_z: None,
            note: String::new(),
            diameter: None,
            tolerance: None,
        }
    }

    /// 是否匹配复合查找键
    pub fn matches(&self, index: i64, type_tag: &str) -> bool {
        self.index == index && self.type_tag == type_tag
    }

    /// 读取数值字段
    pub fn field(&self, field: MeasureField) -> Option<f64> {
        match field {
            MeasureField::X => self.x,
            MeasureField::Y => self.y,
            MeasureField::Z => self.z,
            MeasureField::RotX => self.rot_x,
            MeasureField::RotY => self.rot_y,
            MeasureField::RotZ => self.rot_z,
            MeasureField::Diameter => self.diameter,
            MeasureField::Tolerance => self.tolerance,
        }
    }
}

// ==========================================
// MeasurementFile - 测量文件头
// ==========================================
// 对齐: measurement_file 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementFile {
    pub file_id: String,            // 文件ID（UUID v4）
    pub file_name: String,          // 原始文件名（仅展示,引擎不使用）
    pub point_count: usize,         // 已落库测量点数量
    pub skipped_lines: usize,       // 解析时跳过的行数（字段不足/序号非法）
    pub imported_at: DateTime<Utc>, // 导入时间
}
