// ==========================================
// 坐标测量质检系统 - 质检方案配置 API
// ==========================================
// 职责: 质检方案查询、保存、切换，K 检测点取值轴设置
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, QcProfile, QcProfileReader};
use crate::domain::types::MeasureField;

/// 方案概览
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// 已保存的方案名称
    pub profiles: Vec<String>,
    /// 当前生效方案
    pub active: String,
    /// K 检测点取值轴覆盖（None = 沿用方案本身）
    pub k_axis: Option<MeasureField>,
}

// ==========================================
// ConfigApi - 质检方案配置 API
// ==========================================
pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    /// 创建新的ConfigApi实例
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    /// 查询方案概览
    pub fn get_profile_summary(&self) -> ApiResult<ProfileSummary> {
        Ok(ProfileSummary {
            profiles: self.config_manager.list_profiles()?,
            active: self.config_manager.get_active_profile_name()?,
            k_axis: self.config_manager.get_k_axis()?,
        })
    }

    /// 查询当前生效方案（含 K 轴覆盖）
    pub fn get_active_profile(&self) -> ApiResult<QcProfile> {
        Ok(self.config_manager.load_active_profile()?)
    }

    /// 从 JSON 保存质检方案（同名覆盖）
    ///
    /// JSON 反序列化时即完成方案完整性校验。
    pub fn save_profile_json(&self, json: &str) -> ApiResult<String> {
        let profile: QcProfile = serde_json::from_str(json)
            .map_err(|e| ApiError::InvalidInput(format!("质检方案格式错误: {}", e)))?;
        self.config_manager.save_profile(&profile)?;
        Ok(profile.name().to_string())
    }

    /// 切换生效方案
    pub fn set_active_profile(&self, name: &str) -> ApiResult<()> {
        if name.trim().is_empty() {
            return Err(ApiError::InvalidInput("方案名称不能为空".to_string()));
        }
        Ok(self.config_manager.set_active_profile(name)?)
    }

    /// 设置 K 检测点取值轴（"x" / "y"）
    pub fn set_k_axis(&self, axis: &str) -> ApiResult<()> {
        let field = match axis.trim().to_lowercase().as_str() {
            "x" => MeasureField::X,
            "y" => MeasureField::Y,
            other => {
                return Err(ApiError::InvalidInput(format!(
                    "K 轴仅支持 x / y，收到: {}",
                    other
                )))
            }
        };
        Ok(self.config_manager.set_k_axis(field)?)
    }
}
