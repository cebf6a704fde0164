// ==========================================
// 资产盘点工具 - 应用状态
// ==========================================
// 职责: 按配置装配 存储 → 仓储 → 控制器，并在启动时恢复持久化数据
// ==========================================

use std::sync::Arc;

use tracing::info;

use crate::api::{ApiResult, InventoryApi};
use crate::config::AppConfig;
use crate::exporter::SpreadsheetExporter;
use crate::importer::XlsxInventoryImporter;
use crate::repository::{BlobStore, InventoryRepository, SqliteBlobStore};

/// 应用状态
///
/// 进程内唯一，持有盘点控制器
pub struct AppState {
    /// 生效配置
    pub config: AppConfig,

    /// 盘点控制器
    pub api: InventoryApi,
}

impl AppState {
    /// 装配并从持久化数据恢复
    ///
    /// # 错误
    /// - CorruptState: 存量数据损坏（不覆盖，由调用方决定是否清空）
    pub fn new(config: AppConfig) -> ApiResult<Self> {
        let mut state = Self::open(config)?;
        let restored = state.api.hydrate()?;
        info!(restored, records = state.api.inventory().len(), "AppState 初始化完成");
        Ok(state)
    }

    /// 仅装配，不读取持久化数据
    pub fn open(config: AppConfig) -> ApiResult<Self> {
        info!(db_path = %config.db_path, "装配 AppState");

        let store: Arc<dyn BlobStore> = Arc::new(SqliteBlobStore::new(&config.db_path)?);
        Ok(Self::with_store(config, store))
    }

    /// 使用指定存储装配（测试时注入内存存储）
    pub fn with_store(config: AppConfig, store: Arc<dyn BlobStore>) -> Self {
        let api = InventoryApi::new(
            InventoryRepository::new(store),
            Box::new(XlsxInventoryImporter::new()),
            SpreadsheetExporter::new(),
        );
        Self { config, api }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryBlobStore;

    #[test]
    fn test_new_on_fresh_db() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            db_path: dir.path().join("inv.db").to_string_lossy().to_string(),
            locale: "es".to_string(),
        };

        let state = AppState::new(config).unwrap();
        assert!(state.api.inventory().is_empty());
    }

    #[test]
    fn test_with_store() {
        let config = AppConfig {
            db_path: ":memory:".to_string(),
            locale: "es".to_string(),
        };
        let state = AppState::with_store(config, Arc::new(MemoryBlobStore::new()));
        assert!(!state.api.can_export());
    }
}
