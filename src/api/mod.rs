// ==========================================
// 坐标测量质检系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行及上层调用
// ==========================================

pub mod config_api;
pub mod error;
pub mod import_api;
pub mod report_api;

// 重导出核心类型
pub use config_api::{ConfigApi, ProfileSummary};
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
pub use report_api::ReportApi;
