// ==========================================
// 资产盘点工具 - 引擎层
// ==========================================
// 职责: 记录集管理、过滤、分页
// 红线: 引擎不做 IO，不落库
// ==========================================

pub mod error;
pub mod filter;
pub mod record_store;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use filter::{FilterEngine, FilterQuery};
pub use record_store::RecordStore;
