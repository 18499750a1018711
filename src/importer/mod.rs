// ==========================================
// 坐标测量质检系统 - 导入层
// ==========================================
// 职责: 测量文件 → 测量点集 → 落库
// 支持: 分号分隔的坐标测量机输出文本
// ==========================================

// 模块声明
pub mod error;
pub mod line_parser;
pub mod measurement_importer_impl;
pub mod measurement_importer_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use line_parser::{LineParser, ParsedFile};
pub use measurement_importer_impl::MeasurementImporterImpl;

// 重导出 Trait 接口
pub use measurement_importer_trait::MeasurementImporter;
