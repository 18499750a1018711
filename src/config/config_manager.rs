// ==========================================
// 坐标测量质检系统 - 配置管理器
// ==========================================
// 职责: 质检方案的存取、激活方案选择、K 轴口径固定
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::profile::{QcProfile, DEFAULT_PROFILE_NAME};
use crate::db::open_sqlite_connection;
use crate::domain::types::MeasureField;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// QcProfileReader Trait
// ==========================================
// 用途: 报告生成所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait QcProfileReader: Send + Sync {
    /// 读取当前生效的质检方案
    ///
    /// # 返回
    /// - 未配置时返回内置默认方案
    /// - 若配置了 K 轴口径，则已应用到方案中
    fn load_active_profile(&self) -> ConfigResult<QcProfile>;
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> ConfigResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    pub fn get_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.get_conn()?;

        conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|e| ConfigError::ConfigReadError {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    // ===== 质检方案 =====

    /// 保存质检方案（同名覆盖）
    pub fn save_profile(&self, profile: &QcProfile) -> ConfigResult<()> {
        let key = config_keys::profile_key(profile.name());
        let json = serde_json::to_string(profile)?;
        self.set_config_value(&key, &json)?;

        tracing::info!(profile = profile.name(), "质检方案已保存");
        Ok(())
    }

    /// 读取质检方案
    ///
    /// # 返回
    /// - Some(QcProfile): 已保存的方案（或名称为 default 时的内置方案）
    /// - None: 方案不存在
    pub fn get_profile(&self, name: &str) -> ConfigResult<Option<QcProfile>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        match self.get_config_value(&config_keys::profile_key(name))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None if name == DEFAULT_PROFILE_NAME => Ok(Some(QcProfile::default_profile())),
            None => Ok(None),
        }
    }

    /// 列出已保存的方案名称（升序）
    pub fn list_profiles(&self) -> ConfigResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT key FROM config_kv WHERE scope_id = 'global' AND key LIKE ?1 ORDER BY key",
        )?;

        let prefix = config_keys::PROFILE_PREFIX;
        let rows = stmt.query_map(params![format!("{}%", prefix)], |row| {
            row.get::<_, String>(0)
        })?;

        let mut names = Vec::new();
        for row in rows {
            let key = row?;
            if let Some(name) = key.strip_prefix(prefix) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    /// 设置生效方案（必须已保存，default 除外）
    pub fn set_active_profile(&self, name: &str) -> ConfigResult<()> {
        if self.get_profile(name)?.is_none() {
            return Err(ConfigError::ProfileNotFound(name.to_string()));
        }
        self.set_config_value(config_keys::ACTIVE_PROFILE, name.trim())?;

        tracing::info!(profile = name, "生效质检方案已切换");
        Ok(())
    }

    /// 读取生效方案名称（未配置时为 default）
    pub fn get_active_profile_name(&self) -> ConfigResult<String> {
        Ok(self
            .get_config_value(config_keys::ACTIVE_PROFILE)?
            .unwrap_or_else(|| DEFAULT_PROFILE_NAME.to_string()))
    }

    // ===== K 轴口径 =====

    /// 读取 K 检测点取值轴（未配置时为 None，沿用方案本身）
    pub fn get_k_axis(&self) -> ConfigResult<Option<MeasureField>> {
        let value = match self.get_config_value(config_keys::K_AXIS)? {
            Some(v) => v,
            None => return Ok(None),
        };

        match value.trim().to_lowercase().as_str() {
            "x" => Ok(Some(MeasureField::X)),
            "y" => Ok(Some(MeasureField::Y)),
            _ => Err(ConfigError::ConfigValueError {
                key: config_keys::K_AXIS.to_string(),
                value,
                message: "仅支持 x / y".to_string(),
            }),
        }
    }

    /// 固定 K 检测点取值轴
    ///
    /// 生效方案的 K 不是单点取值时拒绝写入。
    pub fn set_k_axis(&self, axis: MeasureField) -> ConfigResult<()> {
        if !matches!(axis, MeasureField::X | MeasureField::Y) {
            return Err(ConfigError::ConfigValueError {
                key: config_keys::K_AXIS.to_string(),
                value: axis.to_string(),
                message: "仅支持 x / y".to_string(),
            });
        }

        let name = self.get_active_profile_name()?;
        if let Some(profile) = self.get_profile(&name)? {
            profile.with_k_field(axis)?;
        }
        self.set_config_value(config_keys::K_AXIS, axis.as_str())
    }
}

// ==========================================
// QcProfileReader Trait 实现
// ==========================================
impl QcProfileReader for ConfigManager {
    fn load_active_profile(&self) -> ConfigResult<QcProfile> {
        let name = self.get_active_profile_name()?;
        let profile = self
            .get_profile(&name)?
            .ok_or_else(|| ConfigError::ProfileNotFound(name.clone()))?;

        let profile = match self.get_k_axis()? {
            Some(axis) => {
                let own = profile.k_field();
                let pinned = profile.with_k_field(axis)?;
                if own != Some(axis) {
                    tracing::warn!(
                        profile = pinned.name(),
                        profile_axis = ?own,
                        pinned_axis = %axis,
                        "qc/k_axis 覆盖方案自身的 K 取值轴"
                    );
                }
                pinned
            }
            None => profile,
        };

        tracing::debug!(profile = profile.name(), "加载生效质检方案");
        Ok(profile)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    /// 生效方案名称
    pub const ACTIVE_PROFILE: &str = "qc/active_profile";

    /// K 检测点取值轴（x / y）
    pub const K_AXIS: &str = "qc/k_axis";

    /// 方案存储前缀
    pub const PROFILE_PREFIX: &str = "qc_profile/";

    pub fn profile_key(name: &str) -> String {
        format!("{}{}", PROFILE_PREFIX, name.trim())
    }
}
