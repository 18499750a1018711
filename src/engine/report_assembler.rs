// ==========================================
// 坐标测量质检系统 - 检测报告组装引擎
// ==========================================
// 职责: 取值 → 公差校验 → 复合 G 汇总 → 单文件检测报告
// 输入: DataPoint 集 + QcProfile（不可变配置）
// 输出: FileMeasurementReport（14 个对外标签）
// ==========================================
// 红线: 纯函数，不持有可变状态，不缓存测量点
// 红线: 单文件与批量报告使用同一逻辑，文件之间无状态传递
// ==========================================

#[cfg(test)]
mod tests;

use crate::config::profile::QcProfile;
use crate::domain::measurement::DataPoint;
use crate::domain::report::{CheckpointResult, FileMeasurementReport};
use crate::domain::types::{CheckpointLabel, ReportLabel};
use crate::engine::extractor::ValueExtractor;
use crate::engine::g_aggregator::GAggregator;
use crate::engine::validator::ToleranceValidator;
use crate::repository::{DataPointSource, RepositoryResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// ReportAssembler - 检测报告组装引擎
// ==========================================
#[derive(Clone)]
pub struct ReportAssembler {
    profile: Arc<QcProfile>,
}

impl ReportAssembler {
    pub fn new(profile: Arc<QcProfile>) -> Self {
        Self { profile }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算全部 17 个内部检测点（含 G1-G4 单项）
    pub fn evaluate_checkpoints(
        &self,
        points: &[DataPoint],
    ) -> BTreeMap<CheckpointLabel, CheckpointResult> {
        let extractor = ValueExtractor::new();

        CheckpointLabel::ALL
            .iter()
            .map(|label| {
                let value = extractor.extract(self.profile.rule(*label), points);
                let result = ToleranceValidator.validate(value, self.profile.band(*label));
                if !result.is_valid {
                    tracing::debug!(label = %label, value = %result.value, "检测点超差");
                }
                (*label, result)
            })
            .collect()
    }

    /// 组装单文件检测报告
    #[instrument(skip(self, points), fields(profile = %self.profile.name(), points = points.len()))]
    pub fn assemble(&self, points: &[DataPoint]) -> FileMeasurementReport {
        let mut internal = self.evaluate_checkpoints(points);

        // G1-G4 单项只在内部使用
        let bores: BTreeMap<CheckpointLabel, CheckpointResult> = CheckpointLabel::BORES
            .iter()
            .filter_map(|label| internal.remove(label).map(|r| (*label, r)))
            .collect();
        let composite_g = GAggregator.aggregate(&bores);

        let mut entries: BTreeMap<ReportLabel, CheckpointResult> = internal
            .into_iter()
            .map(|(label, result)| (label.report_label(), result))
            .collect();
        entries.insert(ReportLabel::G, composite_g);

        let report = FileMeasurementReport::from_entries(entries);
        let failed = report.failed_labels();
        if !failed.is_empty() {
            tracing::warn!(failed = ?failed, "检测报告存在不合格检测点");
        }
        report
    }

    /// 读取测量点集并组装报告（每次重新读取，不缓存）
    ///
    /// # 返回
    /// - Err: 存储层无法返回测量点集（原样上抛）
    pub fn assemble_for_file(
        &self,
        source: &dyn DataPointSource,
        file_id: &str,
    ) -> RepositoryResult<FileMeasurementReport> {
        let points = source.load_data_points(file_id)?;
        Ok(self.assemble(&points))
    }
}
