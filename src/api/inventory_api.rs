// ==========================================
// 资产盘点工具 - 盘点 API（唯一控制器）
// ==========================================
// 职责: 持有应用状态（记录集 + 过滤视图 + 页码），
//       串联 导入 → 落库 → 过滤 → 分页 → 编辑 → 导出
// 约束: 所有状态变更只经由本对象；各操作顺序执行，互不重叠
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{CanonicalField, ImportSummary, PageWindow, Record, PAGE_SIZE};
use crate::engine::{FilterQuery, RecordStore};
use crate::exporter::{ExportFormat, SpreadsheetExporter};
use crate::importer::InventoryImporter;
use crate::repository::InventoryRepository;
use std::path::Path;
use tracing::{info, instrument, warn};

// ==========================================
// InventoryApi
// ==========================================
pub struct InventoryApi {
    store: RecordStore,
    repo: InventoryRepository,
    importer: Box<dyn InventoryImporter>,
    exporter: SpreadsheetExporter,
}

impl InventoryApi {
    /// 创建（空记录集，未从持久化恢复）
    pub fn new(
        repo: InventoryRepository,
        importer: Box<dyn InventoryImporter>,
        exporter: SpreadsheetExporter,
    ) -> Self {
        Self {
            store: RecordStore::new(),
            repo,
            importer,
            exporter,
        }
    }

    /// 从持久化数据恢复
    ///
    /// # 返回
    /// - Ok(true): 已恢复
    /// - Ok(false): 无持久化数据
    /// - Err(CorruptState): 存量数据损坏（不清空、不覆盖）
    pub fn hydrate(&mut self) -> ApiResult<bool> {
        match self.repo.load()? {
            Some(records) => {
                info!(count = records.len(), "从持久化数据恢复盘点全集");
                self.store.replace(records);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ==========================================
    // 导入
    // ==========================================

    /// 导入盘点表
    ///
    /// 先落库再替换内存集：任何一步失败都不改动当前状态
    ///
    /// # 返回
    /// - Ok(ImportSummary): 含缺失字段（非致命，由调用方提示）
    #[instrument(skip(self))]
    pub async fn import_file(&mut self, file_path: Option<&Path>) -> ApiResult<ImportSummary> {
        let imported = self.importer.import_file(file_path).await.map_err(|e| {
            warn!(error = %e, "导入失败，状态未改动");
            ApiError::from(e)
        })?;

        self.commit_import(imported.records)?;
        Ok(imported.summary)
    }

    /// 导入已读入内存的文件
    pub fn import_bytes(&mut self, file_name: &str, bytes: &[u8]) -> ApiResult<ImportSummary> {
        crate::importer::validate_selected_file(Some(Path::new(file_name)))?;
        let imported = self.importer.import_bytes(file_name, bytes)?;
        self.commit_import(imported.records)?;
        Ok(imported.summary)
    }

    fn commit_import(&mut self, records: Vec<Record>) -> ApiResult<()> {
        self.repo.save(&records)?;
        self.store.replace(records);
        Ok(())
    }

    // ==========================================
    // 过滤 / 分页
    // ==========================================

    /// 应用过滤条件（页码重置为 1）
    pub fn filter(&mut self, query: FilterQuery) {
        self.store.apply_filter(query);
    }

    /// 取指定页（固定页大小）
    pub fn page(&self, page_number: usize) -> PageWindow<'_> {
        self.store.page(page_number, PAGE_SIZE)
    }

    /// 跳转页码并返回该页
    pub fn go_to_page(&mut self, page_number: usize) -> PageWindow<'_> {
        self.store.set_current_page(page_number);
        self.store.current_page_window(PAGE_SIZE)
    }

    /// 当前页
    pub fn current_page(&self) -> PageWindow<'_> {
        self.store.current_page_window(PAGE_SIZE)
    }

    // ==========================================
    // 编辑
    // ==========================================

    /// 修改过滤视图中第 filtered_index 条记录的字段，并重新落库
    #[instrument(skip(self, value))]
    pub fn update_field(
        &mut self,
        filtered_index: usize,
        field: CanonicalField,
        value: &str,
    ) -> ApiResult<Record> {
        let updated = self
            .store
            .update_field(filtered_index, field, value)?
            .clone();
        self.repo.save(self.store.inventory())?;
        Ok(updated)
    }

    /// 修改描述（界面上唯一的编辑入口）
    pub fn update_description(&mut self, filtered_index: usize, value: &str) -> ApiResult<Record> {
        self.update_field(filtered_index, CanonicalField::Descripcion, value)
    }

    // ==========================================
    // 导出
    // ==========================================

    /// 导出全集（与当前过滤条件无关）
    pub fn export(&self, format: ExportFormat) -> ApiResult<Vec<u8>> {
        Ok(self.exporter.export(self.store.inventory(), format)?)
    }

    /// 导出到文件
    pub async fn export_to_file(&self, path: &Path, format: ExportFormat) -> ApiResult<()> {
        let bytes = self.export(format)?;
        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| ApiError::ExportError(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), bytes = bytes.len(), "导出文件已写入");
        Ok(())
    }

    // ==========================================
    // 清空
    // ==========================================

    /// 清空内存集并删除持久化数据
    pub fn clear(&mut self) -> ApiResult<()> {
        self.repo.clear()?;
        self.store.replace(Vec::new());
        Ok(())
    }

    // ==========================================
    // 只读访问
    // ==========================================

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn inventory(&self) -> &[Record] {
        self.store.inventory()
    }

    pub fn query(&self) -> &FilterQuery {
        self.store.query()
    }

    /// 是否可导出（界面上导出按钮的启用条件）
    pub fn can_export(&self) -> bool {
        !self.store.is_empty()
    }
}
