// ==========================================
// 资产盘点工具 - API 层
// ==========================================
// 职责: 唯一的状态持有者，向命令行/界面暴露盘点操作
// 红线: 错误统一转换为 ApiError，不向外泄露下层错误类型
// ==========================================

pub mod error;
pub mod inventory_api;

pub use error::{ApiError, ApiResult};
pub use inventory_api::InventoryApi;
