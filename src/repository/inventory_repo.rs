// ==========================================
// 资产盘点工具 - 盘点全集持久化
// ==========================================
// 格式: 固定 key 下存 UTF-8 JSON 数组，元素为扁平 字段→字符串 对象
// 红线: 损坏的存量数据必须报错，不得静默丢弃
// ==========================================

use crate::domain::Record;
use crate::perf::PerfGuard;
use crate::repository::blob_store::BlobStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::sync::Arc;
use tracing::{debug, info};

/// 持久化 key
pub const INVENTORY_STORAGE_KEY: &str = "sunarpInventory";

// ==========================================
// InventoryRepository
// ==========================================
pub struct InventoryRepository {
    store: Arc<dyn BlobStore>,
    key: String,
}

impl InventoryRepository {
    /// 使用默认 key 创建
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self::with_key(store, INVENTORY_STORAGE_KEY)
    }

    /// 指定 key 创建
    pub fn with_key(store: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 保存全集（整体覆盖）
    pub fn save(&self, inventory: &[Record]) -> RepositoryResult<()> {
        let _perf = PerfGuard::new("inventory_save");
        let json = serde_json::to_string(inventory)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        self.store.set(&self.key, &json)?;
        info!(key = %self.key, count = inventory.len(), bytes = json.len(), "盘点全集已保存");
        Ok(())
    }

    /// 读取全集
    ///
    /// # 返回
    /// - Ok(None): key 从未写入
    /// - Ok(Some(records)): 读取成功
    /// - Err(CorruptState): 存量数据无法解析
    pub fn load(&self) -> RepositoryResult<Option<Vec<Record>>> {
        let raw = match self.store.get(&self.key)? {
            Some(raw) => raw,
            None => {
                debug!(key = %self.key, "无持久化数据");
                return Ok(None);
            }
        };

        let records: Vec<Record> =
            serde_json::from_str(&raw).map_err(|e| RepositoryError::CorruptState {
                key: self.key.clone(),
                message: e.to_string(),
            })?;

        info!(key = %self.key, count = records.len(), "盘点全集已加载");
        Ok(Some(records))
    }

    /// 删除持久化数据
    pub fn clear(&self) -> RepositoryResult<()> {
        self.store.remove(&self.key)?;
        info!(key = %self.key, "持久化数据已删除");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CanonicalField;
    use crate::repository::blob_store::MemoryBlobStore;

    fn repo() -> (Arc<MemoryBlobStore>, InventoryRepository) {
        let store = Arc::new(MemoryBlobStore::new());
        let repo = InventoryRepository::new(store.clone());
        (store, repo)
    }

    fn sample() -> Vec<Record> {
        vec![
            [("codigo_patrimonial", "A1"), ("descripcion", "Escritorio")]
                .into_iter()
                .collect(),
            [("codigo_patrimonial", "A2"), ("descripcion", "")]
                .into_iter()
                .collect(),
        ]
    }

    #[test]
    fn test_load_absent() {
        let (_, repo) = repo();
        assert_eq!(repo.load().unwrap(), None);
    }

    #[test]
    fn test_save_load_round_trip() {
        let (_, repo) = repo();
        let records = sample();

        repo.save(&records).unwrap();
        assert_eq!(repo.load().unwrap(), Some(records));
    }

    #[test]
    fn test_empty_inventory_round_trip() {
        let (_, repo) = repo();
        repo.save(&[]).unwrap();
        assert_eq!(repo.load().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_stored_layout_is_json_array() {
        let (store, repo) = repo();
        repo.save(&sample()).unwrap();

        let raw = store.get(INVENTORY_STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["codigo_patrimonial"], "A1");
    }

    #[test]
    fn test_corrupt_state_fails_loudly() {
        let (store, repo) = repo();
        store.set(INVENTORY_STORAGE_KEY, "{not json").unwrap();

        let err = repo.load().unwrap_err();
        assert!(matches!(err, RepositoryError::CorruptState { .. }));

        // 非字符串值同样视为损坏
        store
            .set(INVENTORY_STORAGE_KEY, r#"[{"codigo_patrimonial": 12}]"#)
            .unwrap();
        assert!(matches!(
            repo.load().unwrap_err(),
            RepositoryError::CorruptState { .. }
        ));
    }

    #[test]
    fn test_clear() {
        let (_, repo) = repo();
        repo.save(&sample()).unwrap();
        repo.clear().unwrap();
        assert_eq!(repo.load().unwrap(), None);
    }

    #[test]
    fn test_unicode_values_survive() {
        let (_, repo) = repo();
        let mut record = Record::new();
        record.insert(CanonicalField::UbicacFisica, "Área de Tecnología – 2º piso");
        repo.save(&[record.clone()]).unwrap();
        assert_eq!(repo.load().unwrap(), Some(vec![record]));
    }
}
