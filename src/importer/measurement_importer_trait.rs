// ==========================================
// 坐标测量质检系统 - 测量文件导入 Trait
// ==========================================
// 职责: 定义测量文件导入接口（不包含实现）
// ==========================================

use crate::domain::measurement::MeasurementFile;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

// ==========================================
// MeasurementImporter Trait
// ==========================================
// 用途: 测量文件导入主接口
// 实现者: MeasurementImporterImpl
#[async_trait]
pub trait MeasurementImporter: Send + Sync {
    /// 导入一份测量文本
    ///
    /// # 参数
    /// - file_name: 原始文件名（仅用于展示）
    /// - text: 文件全文
    ///
    /// # 返回
    /// - Ok(MeasurementFile): 新文件头（含 file_id / 点数 / 跳过行数）
    /// - Err: 落库失败
    ///
    /// # 导入流程
    /// 1. 整文件解析为测量点（解析完成后才落库）
    /// 2. 生成 file_id
    /// 3. 文件头 + 测量点单事务落库
    async fn import_text(&self, file_name: &str, text: &str) -> ImportResult<MeasurementFile>;

    /// 从磁盘导入测量文件
    ///
    /// # 返回
    /// - Err(FileNotFound / FileReadError): 文件无法读取
    async fn import_file(&self, file_path: &Path) -> ImportResult<MeasurementFile>;

    /// 批量导入多个文件（并发执行）
    ///
    /// # 说明
    /// - 每个文件的导入是独立的，互不影响
    /// - 如果某个文件导入失败，不影响其他文件
    /// - 结果顺序与输入顺序一致
    async fn batch_import(
        &self,
        file_paths: Vec<PathBuf>,
    ) -> Vec<(PathBuf, ImportResult<MeasurementFile>)>;
}
