// ==========================================
// 坐标测量质检系统 - 引擎层
// ==========================================
// 职责: 取值、公差校验、复合 G 汇总、报告组装
// 红线: Engine 不拼 SQL, 不持有可变状态
// ==========================================

pub mod extractor;
pub mod g_aggregator;
pub mod report_assembler;
pub mod validator;

// 重导出核心引擎
pub use extractor::ValueExtractor;
pub use g_aggregator::GAggregator;
pub use report_assembler::ReportAssembler;
pub use validator::{format_value, ToleranceValidator};
