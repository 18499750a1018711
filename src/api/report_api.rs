// ==========================================
// 坐标测量质检系统 - 检测报告 API
// ==========================================
// 职责: 单文件报告、批量报告、公差表查询、报告导出
// 红线: 每次请求重新读取测量点集与生效方案，不缓存报告
// 红线: 批量报告各文件互相隔离，单个文件失败不影响其他文件
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::config::{QcProfileReader, ToleranceBand};
use crate::domain::report::FileMeasurementReport;
use crate::domain::types::ReportLabel;
use crate::engine::ReportAssembler;
use crate::repository::MeasurementRepository;

// ==========================================
// ReportApi - 检测报告 API
// ==========================================

/// 检测报告API
///
/// 职责：
/// 1. 按文件ID组装检测报告
/// 2. 多文件并发组装
/// 3. 公差表展示
pub struct ReportApi {
    measurement_repo: Arc<MeasurementRepository>,
    profile_reader: Arc<dyn QcProfileReader>,
}

impl ReportApi {
    /// 创建新的ReportApi实例
    pub fn new(
        measurement_repo: Arc<MeasurementRepository>,
        profile_reader: Arc<dyn QcProfileReader>,
    ) -> Self {
        Self {
            measurement_repo,
            profile_reader,
        }
    }

    /// 按生效方案构造报告组装引擎
    fn assembler(&self) -> ApiResult<ReportAssembler> {
        let profile = self.profile_reader.load_active_profile()?;
        Ok(ReportAssembler::new(Arc::new(profile)))
    }

    /// 查询单文件检测报告
    ///
    /// # 参数
    /// - file_id: 测量文件ID
    ///
    /// # 返回
    /// - Ok(FileMeasurementReport): 14 个标签的检测报告
    /// - Err(ApiError::NotFound): 文件不存在
    #[instrument(skip(self))]
    pub fn get_file_report(&self, file_id: &str) -> ApiResult<FileMeasurementReport> {
        if file_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("文件ID不能为空".to_string()));
        }

        let assembler = self.assembler()?;
        let report = assembler.assemble_for_file(&*self.measurement_repo, file_id)?;

        tracing::info!(file_id, all_valid = report.is_all_valid(), "检测报告已生成");
        Ok(report)
    }

    /// 批量查询检测报告
    ///
    /// 每个文件在阻塞线程池中独立组装；结果顺序与请求顺序一致。
    /// 整批共用同一份生效方案。
    ///
    /// # 返回
    /// - Ok(Vec<(file_id, 单文件结果)>)
    /// - Err(ApiError): 仅当生效方案无法加载时
    #[instrument(skip(self, file_ids), fields(count = file_ids.len()))]
    pub async fn get_batch_report(
        &self,
        file_ids: Vec<String>,
    ) -> ApiResult<Vec<(String, ApiResult<FileMeasurementReport>)>> {
        let assembler = self.assembler()?;

        let tasks = file_ids.iter().cloned().map(|file_id| {
            let assembler = assembler.clone();
            let repo = self.measurement_repo.clone();
            tokio::task::spawn_blocking(move || {
                assembler
                    .assemble_for_file(&*repo, &file_id)
                    .map_err(ApiError::from)
            })
        });
        let joined = join_all(tasks).await;

        let results: Vec<(String, ApiResult<FileMeasurementReport>)> = file_ids
            .into_iter()
            .zip(joined)
            .map(|(file_id, joined)| {
                let result = joined
                    .map_err(|e| ApiError::InternalError(format!("报告任务异常退出: {}", e)))
                    .and_then(|r| r);
                (file_id, result)
            })
            .collect();

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        if failed > 0 {
            tracing::warn!(total = results.len(), failed, "批量报告存在失败文件");
        } else {
            tracing::info!(total = results.len(), "批量报告已生成");
        }
        Ok(results)
    }

    /// 查询公差表（14 个对外标签，无公差带的标签为 None）
    pub fn get_tolerance_table(&self) -> ApiResult<BTreeMap<ReportLabel, Option<ToleranceBand>>> {
        let profile = self.profile_reader.load_active_profile()?;
        Ok(profile.tolerance_table())
    }

    /// 导出单文件检测报告（格式化 JSON）
    pub fn export_report_json(&self, file_id: &str) -> ApiResult<String> {
        let report = self.get_file_report(file_id)?;
        serde_json::to_string_pretty(&report)
            .map_err(|e| ApiError::InternalError(format!("报告序列化失败: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::{ConfigError, ConfigResult};
    use crate::config::QcProfile;
    use crate::db::init_schema;
    use crate::domain::measurement::{DataPoint, MeasurementFile};
    use crate::domain::types::MeasureField;
    use chrono::Utc;
    use rusqlite::Connection;
    use std::sync::Mutex;

    struct FixedProfile(QcProfile);

    impl QcProfileReader for FixedProfile {
        fn load_active_profile(&self) -> ConfigResult<QcProfile> {
            Ok(self.0.clone())
        }
    }

    struct BrokenProfile;

    impl QcProfileReader for BrokenProfile {
        fn load_active_profile(&self) -> ConfigResult<QcProfile> {
            Err(ConfigError::ProfileNotFound("line-9".to_string()))
        }
    }

    fn setup(profile: QcProfile) -> (Arc<MeasurementRepository>, ReportApi) {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let repo = Arc::new(MeasurementRepository::from_connection(Arc::new(Mutex::new(
            conn,
        ))));
        let api = ReportApi::new(repo.clone(), Arc::new(FixedProfile(profile)));
        (repo, api)
    }

    fn store(repo: &MeasurementRepository, file_id: &str, points: Vec<DataPoint>) {
        let file = MeasurementFile {
            file_id: file_id.to_string(),
            file_name: format!("{}.txt", file_id),
            point_count: points.len(),
            skipped_lines: 0,
            imported_at: Utc::now(),
        };
        repo.insert_file(&file, &points).unwrap();
    }

    fn circle(index: i64, diameter: f64) -> DataPoint {
        let mut p = DataPoint::new(index, "CIRCLE");
        p.diameter = Some(diameter);
        p
    }

    fn k_point(x: f64, y: f64) -> DataPoint {
        let mut p = DataPoint::new(17, "PT-COMP");
        p.x = Some(x);
        p.y = Some(y);
        p
    }

    #[test]
    fn test_get_file_report() {
        let (repo, api) = setup(QcProfile::default_profile());
        store(&repo, "F1", vec![circle(1, 25.0), circle(10, 9.0)]);

        let report = api.get_file_report("F1").unwrap();
        assert_eq!(report.len(), 14);
        assert_eq!(report.get(ReportLabel::A).unwrap().value, "25.000");
        assert_eq!(report.get(ReportLabel::G).unwrap().value, "G2");
    }

    #[test]
    fn test_get_file_report_unknown_file() {
        let (_repo, api) = setup(QcProfile::default_profile());
        assert!(matches!(api.get_file_report("nope"), Err(ApiError::NotFound(_))));
        assert!(matches!(api.get_file_report("  "), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_profile_failure_surfaces() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let repo = Arc::new(MeasurementRepository::from_connection(Arc::new(Mutex::new(
            conn,
        ))));
        let api = ReportApi::new(repo, Arc::new(BrokenProfile));

        assert!(matches!(api.get_tolerance_table(), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_profile_drives_k_axis() {
        let profile = QcProfile::default_profile()
            .with_k_field(MeasureField::Y)
            .unwrap();
        let (repo, api) = setup(profile);
        store(&repo, "F1", vec![k_point(0.05, -0.5)]);

        let report = api.get_file_report("F1").unwrap();
        let k = report.get(ReportLabel::K).unwrap();
        assert_eq!(k.value, "0.500");
        assert!(!k.is_valid);
    }

    #[tokio::test]
    async fn test_batch_report_isolates_failures_and_keeps_order() {
        let (repo, api) = setup(QcProfile::default_profile());
        store(&repo, "F1", vec![circle(1, 25.0)]);
        store(&repo, "F2", vec![circle(1, 26.0)]);

        let ids = vec!["F2".to_string(), "missing".to_string(), "F1".to_string()];
        let results = api.get_batch_report(ids).await.unwrap();

        let order: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["F2", "missing", "F1"]);

        let f2 = results[0].1.as_ref().unwrap();
        assert!(!f2.get(ReportLabel::A).unwrap().is_valid);
        assert!(matches!(results[1].1, Err(ApiError::NotFound(_))));
        let f1 = results[2].1.as_ref().unwrap();
        assert!(f1.get(ReportLabel::A).unwrap().is_valid);
    }

    #[tokio::test]
    async fn test_batch_report_matches_single_reports() {
        let (repo, api) = setup(QcProfile::default_profile());
        store(&repo, "F1", vec![circle(9, 8.0), circle(12, 7.0)]);
        store(&repo, "F2", vec![circle(13, 12.0)]);

        let results = api
            .get_batch_report(vec!["F1".to_string(), "F2".to_string()])
            .await
            .unwrap();
        for (file_id, result) in results {
            assert_eq!(result.unwrap(), api.get_file_report(&file_id).unwrap());
        }
    }

    #[test]
    fn test_tolerance_table() {
        let (_repo, api) = setup(QcProfile::default_profile());
        let table = api.get_tolerance_table().unwrap();

        assert_eq!(table.len(), 14);
        assert_eq!(table[&ReportLabel::G], Some(ToleranceBand::new(7.8, 8.2)));
        assert_eq!(table[&ReportLabel::M], None);
    }

    #[test]
    fn test_export_report_json() {
        let (repo, api) = setup(QcProfile::default_profile());
        store(&repo, "F1", vec![circle(1, 25.0)]);

        let json = api.export_report_json("F1").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["A"]["value"], "25.000");
        assert_eq!(value["A"]["isValid"], true);
        assert_eq!(value["N"]["value"], "-");
    }
}
