// ==========================================
// 坐标测量质检系统 - 配置层
// ==========================================
// 职责: 映射规则表 + 公差表（质检方案），多方案存储与切换
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod error;
pub mod mapping;
pub mod profile;
pub mod tolerance;

// 重导出核心类型
pub use config_manager::{config_keys, ConfigManager, QcProfileReader};
pub use error::{ConfigError, ConfigResult};
pub use mapping::{CheckpointRule, PointRef};
pub use profile::{QcProfile, DEFAULT_PROFILE_NAME};
pub use tolerance::ToleranceBand;
