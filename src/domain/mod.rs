// ==========================================
// 坐标测量质检系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod measurement;
pub mod report;
pub mod types;

// 重导出核心类型
pub use measurement::{DataPoint, MeasurementFile};
pub use report::{CheckpointResult, FileMeasurementReport, MISSING_VALUE};
pub use types::{type_tags, CheckpointLabel, LineLayout, MeasureField, ReportLabel};
