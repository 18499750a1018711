// ==========================================
// 坐标测量质检系统 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::types::CheckpointLabel;
use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 质检方案校验错误 =====
    #[error("映射规则不完整: 缺少标签 {missing}")]
    IncompleteRules { missing: String },

    #[error("公差带非法 (标签 {label}): min={min} > max={max}")]
    InvalidBand {
        label: CheckpointLabel,
        min: f64,
        max: f64,
    },

    #[error("平均规则无引用点 (标签 {0})")]
    EmptyAverage(CheckpointLabel),

    #[error("质检方案不存在: {0}")]
    ProfileNotFound(String),

    #[error("质检方案名称为空")]
    EmptyProfileName,

    // ===== 存储错误 =====
    #[error("配置序列化失败: {0}")]
    SerializationError(String),

    #[error("配置读取失败 (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::SerializationError(err.to_string())
    }
}

impl From<rusqlite::Error> for ConfigError {
    fn from(err: rusqlite::Error) -> Self {
        ConfigError::DatabaseError(err.to_string())
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
