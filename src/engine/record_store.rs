// ==========================================
// 资产盘点工具 - 记录集
// ==========================================
// 职责: 持有全集 + 当前过滤视图 + 当前页码
// 说明: 过滤视图保存全集下标，编辑通过视图下标直接改动全集中的记录，
//       因此改动对视图与全集同时可见
// ==========================================

use crate::domain::{page_count, CanonicalField, PageWindow, Record};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::filter::{FilterEngine, FilterQuery};
use tracing::{debug, info};

// ==========================================
// RecordStore - 记录集
// ==========================================
#[derive(Debug)]
pub struct RecordStore {
    /// 全集（源行顺序）
    inventory: Vec<Record>,
    /// 过滤视图: 全集下标
    filtered: Vec<usize>,
    /// 当前过滤条件
    query: FilterQuery,
    /// 当前页码（1 起）
    current_page: usize,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            inventory: Vec::new(),
            filtered: Vec::new(),
            query: FilterQuery::default(),
            current_page: 1,
        }
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以给定记录集初始化
    pub fn with_records(records: Vec<Record>) -> Self {
        let mut store = Self::new();
        store.replace(records);
        store
    }

    /// 整体替换全集（不与旧数据合并）
    ///
    /// 过滤视图 = 全集，过滤条件清空，页码重置为 1
    pub fn replace(&mut self, records: Vec<Record>) {
        info!(count = records.len(), "替换盘点全集");
        self.filtered = (0..records.len()).collect();
        self.inventory = records;
        self.query = FilterQuery::default();
        self.current_page = 1;
    }

    /// 应用过滤条件并重算视图，页码重置为 1
    pub fn apply_filter(&mut self, query: FilterQuery) {
        self.filtered = FilterEngine.apply(&self.inventory, &query);
        self.query = query;
        self.current_page = 1;
        debug!(filtered = self.filtered.len(), "过滤视图已重算");
    }

    /// 按视图下标修改字段
    ///
    /// # 错误
    /// - IndexOutOfRange: 下标不在 [0, filtered_len)
    /// - FieldNotPresent: 记录不含该字段（保持所有记录 key 集一致）
    pub fn update_field(
        &mut self,
        filtered_index: usize,
        field: CanonicalField,
        value: impl Into<String>,
    ) -> EngineResult<&Record> {
        let inventory_index = *self
            .filtered
            .get(filtered_index)
            .ok_or(EngineError::IndexOutOfRange {
                index: filtered_index,
                len: self.filtered.len(),
            })?;

        let record = &mut self.inventory[inventory_index];
        if !record.set_existing(field, value) {
            return Err(EngineError::FieldNotPresent {
                field: field.as_str().to_string(),
            });
        }

        debug!(filtered_index, inventory_index, field = %field, "记录已修改");
        Ok(&self.inventory[inventory_index])
    }

    /// 取过滤视图的一页
    ///
    /// 越界页（含 0）返回空窗口，不报错
    pub fn page(&self, page_number: usize, page_size: usize) -> PageWindow<'_> {
        let total_items = self.filtered.len();
        let start = page_number
            .checked_sub(1)
            .and_then(|p| p.checked_mul(page_size))
            .unwrap_or(total_items);
        let start = start.min(total_items);
        let end = start.saturating_add(page_size).min(total_items);

        PageWindow {
            page: page_number,
            page_size,
            total_pages: page_count(total_items, page_size),
            total_items,
            start_index: start,
            items: self.filtered[start..end]
                .iter()
                .map(|&idx| &self.inventory[idx])
                .collect(),
        }
    }

    /// 当前页
    pub fn current_page_window(&self, page_size: usize) -> PageWindow<'_> {
        self.page(self.current_page, page_size)
    }

    /// 跳转页码（越界由调用方处理）
    pub fn set_current_page(&mut self, page_number: usize) {
        self.current_page = page_number;
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    /// 全集
    pub fn inventory(&self) -> &[Record] {
        &self.inventory
    }

    /// 过滤视图（按顺序）
    pub fn filtered(&self) -> impl Iterator<Item = &Record> + '_ {
        self.filtered.iter().map(move |&idx| &self.inventory[idx])
    }

    /// 视图下标 → 记录
    pub fn filtered_get(&self, filtered_index: usize) -> Option<&Record> {
        self.filtered
            .get(filtered_index)
            .map(|&idx| &self.inventory[idx])
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }
}
