// ==========================================
// 坐标测量质检系统 - 测量文件导入器实现
// ==========================================
// 红线: 测量点集每次上传只解析一次，落库后不再修改
// ==========================================

use crate::domain::measurement::MeasurementFile;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::line_parser::LineParser;
use crate::importer::measurement_importer_trait::MeasurementImporter;
use crate::repository::MeasurementRepository;
use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

pub struct MeasurementImporterImpl {
    repo: Arc<MeasurementRepository>,
    parser: LineParser,
}

impl MeasurementImporterImpl {
    pub fn new(repo: Arc<MeasurementRepository>) -> Self {
        Self {
            repo,
            parser: LineParser,
        }
    }
}

#[async_trait]
impl MeasurementImporter for MeasurementImporterImpl {
    async fn import_text(&self, file_name: &str, text: &str) -> ImportResult<MeasurementFile> {
        let start = Instant::now();

        // 阶段 1: 整文件解析
        let parsed = self.parser.parse(text)?;

        // 阶段 2: 文件头
        let file = MeasurementFile {
            file_id: Uuid::new_v4().to_string(),
            file_name: file_name.to_string(),
            point_count: parsed.points.len(),
            skipped_lines: parsed.skipped_lines,
            imported_at: Utc::now(),
        };

        // 阶段 3: 落库
        self.repo.insert_file(&file, &parsed.points)?;

        tracing::info!(
            file_id = %file.file_id,
            file_name = %file.file_name,
            points = file.point_count,
            skipped = file.skipped_lines,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "测量文件导入完成"
        );
        Ok(file)
    }

    async fn import_file(&self, file_path: &Path) -> ImportResult<MeasurementFile> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let text = tokio::fs::read_to_string(file_path).await?;
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.display().to_string());

        self.import_text(&file_name, &text).await
    }

    async fn batch_import(
        &self,
        file_paths: Vec<PathBuf>,
    ) -> Vec<(PathBuf, ImportResult<MeasurementFile>)> {
        let tasks = file_paths.iter().map(|path| self.import_file(path));
        let results = join_all(tasks).await;

        let outcome: Vec<_> = file_paths.into_iter().zip(results).collect();
        let failed = outcome.iter().filter(|(_, r)| r.is_err()).count();
        if failed > 0 {
            tracing::warn!(total = outcome.len(), failed, "批量导入存在失败文件");
        }
        outcome
    }
}
