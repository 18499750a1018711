use super::*;
use crate::config::mapping::default_rules;
use crate::config::tolerance::{default_bands, ToleranceBand};
use crate::domain::types::MeasureField;
use crate::importer::line_parser::LineParser;
use crate::repository::RepositoryError;

// ==========================================
// 测试辅助函数
// ==========================================

fn default_assembler() -> ReportAssembler {
    ReportAssembler::new(Arc::new(QcProfile::default_profile()))
}

/// 四孔直径行（索引 9-12）
fn bore_lines(values: [Option<&str>; 4]) -> String {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|d| format!("{};CIRCLE;0;0;0;0;0;0;bore;{};0.1", 9 + i, d)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse(text: &str) -> Vec<DataPoint> {
    LineParser.parse(text).unwrap().points
}

/// 全部合格的完整测量文件
const NOMINAL_FILE: &str = "\
1;CIRCLE;0;0;0;0;0;0;A;25.010;0.05
2;CIRCLE;0;0;0;0;0;0;B;24.990;0.05
3;PLANE;0;0;-0.020;0;0;0;C;;
4;DISTANCE;0;100.020;x;x;x;x;0
5;PT-COMP;0;0;10.050
6;PT-COMP;0;0;9.950
7;PT-COMP;0;0;10.000
8;CIRCLE;-0.040;0;0;0;0;0;F;6.0;0.1
9;CIRCLE;0;0;0;0;0;0;G;8.000;0.1
10;CIRCLE;0;0;0;0;0;0;G;8.100;0.1
11;CIRCLE;0;0;0;0;0;0;G;7.950;0.1
12;CIRCLE;0;0;0;0;0;0;G;7.900;0.1
13;CIRCLE;0;0;0;0;0;0;H;12.000;0.05
14;DISTANCE;0;0;0;0;0;0;50.050
15;CIRCLE;0;0;0;0;0;0;J;6.010;0.05
16;CIRCLE;0;0;0;0;0;0;J;5.990;0.05
17;PT-COMP;-0.150;0.300;0
18;PLANE;0;0;0;0;0;12.5;L;;
";

// ==========================================
// 报告结构
// ==========================================

#[test]
fn test_report_has_fourteen_labels_in_order() {
    let report = default_assembler().assemble(&parse(NOMINAL_FILE));

    let labels: Vec<ReportLabel> = report.iter().map(|(l, _)| *l).collect();
    assert_eq!(labels, ReportLabel::ALL.to_vec());
}

#[test]
fn test_internal_evaluation_has_seventeen_labels() {
    let internal = default_assembler().evaluate_checkpoints(&parse(NOMINAL_FILE));
    assert_eq!(internal.len(), 17);
    assert_eq!(internal[&CheckpointLabel::G2].value, "8.100");
}

#[test]
fn test_nominal_file_values() {
    let report = default_assembler().assemble(&parse(NOMINAL_FILE));
    let value = |label| report.get(label).unwrap().value.clone();

    assert_eq!(value(ReportLabel::A), "25.010");
    assert_eq!(value(ReportLabel::B), "24.990");
    // 平面度取绝对值
    assert_eq!(value(ReportLabel::C), "0.020");
    assert_eq!(value(ReportLabel::D), "100.020");
    // 三点平均
    assert_eq!(value(ReportLabel::E), "10.000");
    assert_eq!(value(ReportLabel::F), "0.040");
    // 四孔全部合格 → G1 原值
    assert_eq!(value(ReportLabel::G), "8.000");
    assert_eq!(value(ReportLabel::H), "12.000");
    assert_eq!(value(ReportLabel::I), "50.050");
    assert_eq!(value(ReportLabel::J), "6.000");
    // 默认方案 K 取 |x|
    assert_eq!(value(ReportLabel::K), "0.150");
    assert_eq!(value(ReportLabel::L), "12.500");
    // 人工/目视项
    assert_eq!(value(ReportLabel::M), "-");
    assert_eq!(value(ReportLabel::N), "-");

    assert!(report.is_all_valid());
}

#[test]
fn test_empty_point_set_is_all_dashes_and_valid() {
    let report = default_assembler().assemble(&[]);
    assert_eq!(report.len(), 14);
    for (_, result) in report.iter() {
        assert_eq!(result.value, "-");
        assert!(result.is_valid);
    }
}

// ==========================================
// 复合 G
// ==========================================

#[test]
fn test_g_failing_case() {
    let points = parse(&bore_lines([Some("8.000"), Some("9.000"), None, Some("8.100")]));
    let report = default_assembler().assemble(&points);

    let g = report.get(ReportLabel::G).unwrap();
    assert_eq!(g.value, "G2");
    assert!(!g.is_valid);
    assert_eq!(report.failed_labels(), vec![ReportLabel::G]);
}

#[test]
fn test_g_passing_case() {
    let points = parse(&bore_lines([Some("8.000"), Some("8.100"), None, Some("7.900")]));
    let report = default_assembler().assemble(&points);

    let g = report.get(ReportLabel::G).unwrap();
    assert_eq!(g.value, "8.000");
    assert!(g.is_valid);
}

// ==========================================
// 公差边界 / 无公差带
// ==========================================

#[test]
fn test_band_boundaries_inclusive() {
    let points = parse("1;CIRCLE;0;0;0;0;0;0;;24.95;0\n2;CIRCLE;0;0;0;0;0;0;;25.05;0");
    let report = default_assembler().assemble(&points);

    assert!(report.get(ReportLabel::A).unwrap().is_valid);
    assert!(report.get(ReportLabel::B).unwrap().is_valid);
}

#[test]
fn test_out_of_band_value_is_invalid() {
    let points = parse("13;CIRCLE;0;0;0;0;0;0;;12.2;0");
    let report = default_assembler().assemble(&points);

    let h = report.get(ReportLabel::H).unwrap();
    assert_eq!(h.value, "12.200");
    assert!(!h.is_valid);
}

#[test]
fn test_label_without_band_never_fails() {
    let points = parse("18;PLANE;0;0;0;0;0;-999.5;;;");
    let report = default_assembler().assemble(&points);

    let l = report.get(ReportLabel::L).unwrap();
    assert_eq!(l.value, "-999.500");
    assert!(l.is_valid);
}

#[test]
fn test_missing_point_is_valid_even_with_band() {
    let report = default_assembler().assemble(&parse("99;CIRCLE;0;0;0;0;0;0;;1;0"));
    let a = report.get(ReportLabel::A).unwrap();
    assert_eq!(a.value, "-");
    assert!(a.is_valid);
}

// ==========================================
// 方案作为显式配置
// ==========================================

#[test]
fn test_k_axis_follows_profile() {
    let points = parse("17;PT-COMP;-0.150;-0.300;0");

    let x_report = default_assembler().assemble(&points);
    assert_eq!(x_report.get(ReportLabel::K).unwrap().value, "0.150");
    assert!(x_report.get(ReportLabel::K).unwrap().is_valid);

    let y_profile = QcProfile::default_profile()
        .with_k_field(MeasureField::Y)
        .unwrap();
    let y_report = ReportAssembler::new(Arc::new(y_profile)).assemble(&points);
    let k = y_report.get(ReportLabel::K).unwrap();
    assert_eq!(k.value, "0.300");
    assert!(!k.is_valid);
}

#[test]
fn test_alternate_tolerance_profile() {
    let mut bands = default_bands();
    bands.insert(CheckpointLabel::A, ToleranceBand::new(25.02, 25.10));
    let strict = QcProfile::new("strict", default_rules(), bands).unwrap();

    let points = parse("1;CIRCLE;0;0;0;0;0;0;;25.010;0");
    let default_report = default_assembler().assemble(&points);
    let strict_report = ReportAssembler::new(Arc::new(strict)).assemble(&points);

    assert!(default_report.get(ReportLabel::A).unwrap().is_valid);
    assert!(!strict_report.get(ReportLabel::A).unwrap().is_valid);
}

#[test]
fn test_same_input_same_report() {
    let assembler = default_assembler();
    let points = parse(NOMINAL_FILE);
    assert_eq!(assembler.assemble(&points), assembler.assemble(&points));
}

// ==========================================
// 存储层读取
// ==========================================

struct FixedSource(Vec<DataPoint>);

impl DataPointSource for FixedSource {
    fn load_data_points(&self, file_id: &str) -> RepositoryResult<Vec<DataPoint>> {
        if file_id == "known" {
            Ok(self.0.clone())
        } else {
            Err(RepositoryError::NotFound {
                entity: "MeasurementFile".to_string(),
                id: file_id.to_string(),
            })
        }
    }
}

#[test]
fn test_assemble_for_file_reads_source() {
    let source = FixedSource(parse(NOMINAL_FILE));
    let report = default_assembler().assemble_for_file(&source, "known").unwrap();
    assert_eq!(report.get(ReportLabel::A).unwrap().value, "25.010");
}

#[test]
fn test_assemble_for_file_propagates_fetch_failure() {
    let source = FixedSource(vec![]);
    let err = default_assembler()
        .assemble_for_file(&source, "unknown")
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}
