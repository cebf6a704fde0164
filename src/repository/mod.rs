// ==========================================
// 资产盘点工具 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 本地键值存储 + 盘点全集持久化
// 约束: 所有查询使用参数化
// ==========================================

pub mod blob_store;
pub mod error;
pub mod inventory_repo;

// 重导出核心仓储
pub use blob_store::{BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use error::{RepositoryError, RepositoryResult};
pub use inventory_repo::{InventoryRepository, INVENTORY_STORAGE_KEY};
