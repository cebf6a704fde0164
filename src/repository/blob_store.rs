// ==========================================
// 资产盘点工具 - 键值存储
// ==========================================
// 职责: 按 key 存取字符串（"最后写入者获胜"）
// 实现: SqliteBlobStore（blob_kv 表）/ MemoryBlobStore（测试用）
// 红线: 不理解 value 内容，不含业务逻辑
// ==========================================

use crate::db::{configure_sqlite_connection, ensure_schema, open_sqlite_connection};
use crate::perf::install_sqlite_tracing;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// BlobStore Trait
// ==========================================
pub trait BlobStore: Send + Sync {
    /// 读取 key；从未写入过返回 None
    fn get(&self, key: &str) -> RepositoryResult<Option<String>>;

    /// 写入 key（覆盖）
    fn set(&self, key: &str, value: &str) -> RepositoryResult<()>;

    /// 删除 key（不存在时无操作）
    fn remove(&self, key: &str) -> RepositoryResult<()>;
}

// ==========================================
// SqliteBlobStore
// ==========================================
pub struct SqliteBlobStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBlobStore {
    /// 打开数据库文件
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let mut conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        install_sqlite_tracing(&mut conn);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 并建表（幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
            ensure_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM blob_kv WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO blob_kv (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM blob_kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

// ==========================================
// MemoryBlobStore
// ==========================================
#[derive(Default)]
pub struct MemoryBlobStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> RepositoryResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> RepositoryResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn sqlite_store() -> SqliteBlobStore {
        let conn = open_in_memory().unwrap();
        SqliteBlobStore::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    fn exercise(store: &dyn BlobStore) {
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v1".to_string()));

        // 最后写入者获胜
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v2".to_string()));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        store.remove("k").unwrap();
    }

    #[test]
    fn test_sqlite_blob_store() {
        exercise(&sqlite_store());
    }

    #[test]
    fn test_memory_blob_store() {
        exercise(&MemoryBlobStore::new());
    }

    #[test]
    fn test_sqlite_blob_store_utf8() {
        let store = sqlite_store();
        store.set("k", "Ubicación física – ñ").unwrap();
        assert_eq!(
            store.get("k").unwrap().as_deref(),
            Some("Ubicación física – ñ")
        );
    }
}
