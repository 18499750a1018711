// ==========================================
// 坐标测量质检系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 坐标测量机输出 → 检测点取值 → 公差判定 → 检测报告
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 取值/校验/报告组装
pub mod engine;

// 导入层 - 测量文件解析
pub mod importer;

// 配置层 - 质检方案
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/schema）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CheckpointLabel, MeasureField, ReportLabel};

// 领域实体
pub use domain::{CheckpointResult, DataPoint, FileMeasurementReport, MeasurementFile};

// 配置
pub use config::{CheckpointRule, QcProfile, ToleranceBand};

// 引擎
pub use engine::{GAggregator, ReportAssembler, ToleranceValidator, ValueExtractor};

// API
pub use api::{ApiError, ApiResult, ConfigApi, ImportApi, ReportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "坐标测量质检系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
