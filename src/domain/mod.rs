// ==========================================
// 资产盘点工具 - 领域模型层
// ==========================================
// 职责: 定义记录、规范字段、导入结果、分页窗口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod inventory;
pub mod record;
pub mod types;

// 重导出核心类型
pub use inventory::{page_count, ExtractOutcome, ImportSummary, PageWindow, PAGE_SIZE};
pub use record::Record;
pub use types::CanonicalField;
