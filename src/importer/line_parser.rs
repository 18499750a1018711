// ==========================================
// 坐标测量质检系统 - 测量行解析器
// ==========================================
// 输入: 单个测量文件的全文（UTF-8）
// 输出: 按文件原始顺序的 DataPoint 序列（不重排）
// ==========================================
// 容错:
// - 字段不足 3 个的行: 静默跳过
// - 数值字段无法解析: 置空，记录保留
// - 未知类型标签: 仅保留 index/type_tag
// ==========================================

use crate::domain::measurement::DataPoint;
use crate::domain::types::LineLayout;
use crate::importer::error::ImportResult;
use csv::{ReaderBuilder, StringRecord};

/// 有效行的最少字段数
pub const MIN_FIELDS: usize = 3;

/// 解析结果
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    /// 测量点（文件顺序）
    pub points: Vec<DataPoint>,
    /// 被跳过的非空行数
    pub skipped_lines: usize,
    /// 被跳过行在源文件中的行号（从 1 开始，含空行计数）
    pub skipped_line_numbers: Vec<u64>,
}

pub struct LineParser;

impl LineParser {
    /// 解析测量文件全文
    pub fn parse(&self, text: &str) -> ImportResult<ParsedFile> {
        // 分号分隔、无表头、无引号语义、行长度可变
        let mut reader = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(text.as_bytes());

        let mut parsed = ParsedFile::default();
        for result in reader.records() {
            let record = result?;

            // 仅含空白的行视为空行
            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }

            match self.parse_record(&record) {
                Some(point) => parsed.points.push(point),
                None => {
                    let line = source_line(text, &record);
                    tracing::debug!(line, fields = record.len(), "跳过无效测量行");
                    parsed.skipped_lines += 1;
                    parsed.skipped_line_numbers.push(line);
                }
            }
        }

        tracing::debug!(
            points = parsed.points.len(),
            skipped = parsed.skipped_lines,
            "测量文件解析完成"
        );
        Ok(parsed)
    }

    /// 解析单行
    ///
    /// # 返回
    /// - None: 字段不足或序号无法解析（无法形成查找键）
    fn parse_record(&self, record: &StringRecord) -> Option<DataPoint> {
        if record.len() < MIN_FIELDS {
            return None;
        }

        let index = record.get(0)?.trim().parse::<i64>().ok()?;
        let type_tag = sanitize_type_tag(record.get(1).unwrap_or(""));
        let mut point = DataPoint::new(index, type_tag);

        let num = |i: usize| parse_number(record.get(i));

        match LineLayout::for_tag(&point.type_tag) {
            LineLayout::Full => {
                point.x = num(2);
                point.y = num(3);
                point.z = num(4);
                point.rot_x = num(5);
                point.rot_y = num(6);
                point.rot_z = num(7);
                point.note = record.get(8).map(|s| s.trim().to_string()).unwrap_or_default();
                point.diameter = num(9);
                point.tolerance = num(10);
            }
            LineLayout::PointOnly => {
                point.x = num(2);
                point.y = num(3);
                point.z = num(4);
            }
            LineLayout::Distance => {
                // 无描述列，整体前移一位
                point.x = num(1);
                point.y = num(2);
                point.z = num(3);
                point.diameter = num(8);
            }
            LineLayout::Unknown => {}
        }

        Some(point)
    }
}

/// 记录在源文件中的行号（从 1 开始）
///
/// csv 记录的 position 停在上一条记录的行尾，其后被跳过的空行需要补计。
fn source_line(text: &str, record: &StringRecord) -> u64 {
    let Some(pos) = record.position() else {
        return 0;
    };
    let start = usize::try_from(pos.byte()).unwrap_or(usize::MAX);
    let blank_lines = text
        .as_bytes()
        .get(start..)
        .unwrap_or_default()
        .iter()
        .take_while(|b| matches!(**b, b'\r' | b'\n'))
        .filter(|b| **b == b'\n')
        .count() as u64;
    pos.line() + blank_lines
}

/// 清洗类型标签: TRIM 后仅保留 [A-Z0-9-]
pub fn sanitize_type_tag(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// 解析数值字段（缺失/空/"-"/非数值/非有限值 → None）
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
