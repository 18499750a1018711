// ==========================================
// 坐标测量质检系统 - 测量文件导入 API
// ==========================================
// 职责: 封装测量文件导入、文件查询、文件删除
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::measurement::MeasurementFile;
use crate::importer::{MeasurementImporter, MeasurementImporterImpl};
use crate::repository::MeasurementRepository;

/// 导入API
pub struct ImportApi {
    importer: MeasurementImporterImpl,
    measurement_repo: Arc<MeasurementRepository>,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(measurement_repo: Arc<MeasurementRepository>) -> Self {
        Self {
            importer: MeasurementImporterImpl::new(measurement_repo.clone()),
            measurement_repo,
        }
    }

    /// 导入测量文件
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(MeasurementFile): 文件ID、测量点数、跳过行数
    /// - Err(ApiError): 错误信息
    pub async fn import_file(&self, file_path: &str) -> ApiResult<MeasurementFile> {
        if file_path.trim().is_empty() {
            return Err(ApiError::InvalidInput("文件路径不能为空".to_string()));
        }

        Ok(self.importer.import_file(Path::new(file_path)).await?)
    }

    /// 导入测量文本（上传内容已在内存中）
    pub async fn import_text(&self, file_name: &str, text: &str) -> ApiResult<MeasurementFile> {
        if file_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("文件名不能为空".to_string()));
        }

        Ok(self.importer.import_text(file_name, text).await?)
    }

    /// 批量导入测量文件（各文件结果独立）
    pub async fn import_files(
        &self,
        file_paths: Vec<String>,
    ) -> Vec<(String, ApiResult<MeasurementFile>)> {
        let paths: Vec<PathBuf> = file_paths.iter().map(PathBuf::from).collect();
        let results = self.importer.batch_import(paths).await;

        file_paths
            .into_iter()
            .zip(results)
            .map(|(path, (_, result))| (path, result.map_err(ApiError::from)))
            .collect()
    }

    /// 列出已导入的测量文件（最新在前）
    pub fn list_files(&self) -> ApiResult<Vec<MeasurementFile>> {
        Ok(self.measurement_repo.list_files()?)
    }

    /// 查询单个测量文件的导入元数据
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): 文件不存在
    pub fn get_file(&self, file_id: &str) -> ApiResult<MeasurementFile> {
        if file_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("文件ID不能为空".to_string()));
        }

        self.measurement_repo
            .find_file(file_id)?
            .ok_or_else(|| ApiError::NotFound(format!("MeasurementFile(id={})不存在", file_id)))
    }

    /// 删除测量文件及其测量点
    ///
    /// # 返回
    /// - Ok(()): 已删除
    /// - Err(ApiError::NotFound): 文件不存在
    pub fn delete_file(&self, file_id: &str) -> ApiResult<()> {
        if file_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("文件ID不能为空".to_string()));
        }

        if !self.measurement_repo.delete_file(file_id)? {
            return Err(ApiError::NotFound(format!(
                "MeasurementFile(id={})不存在",
                file_id
            )));
        }

        tracing::info!(file_id, "测量文件已删除");
        Ok(())
    }
}
