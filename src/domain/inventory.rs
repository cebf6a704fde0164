// ==========================================
// 资产盘点工具 - 导入结果 / 分页窗口
// ==========================================

use crate::domain::record::Record;
use crate::domain::types::CanonicalField;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 固定页大小
pub const PAGE_SIZE: usize = 30;

// ==========================================
// ExtractOutcome - 行提取结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOutcome {
    /// 提取出的记录（源行顺序）
    pub records: Vec<Record>,
    /// 检测到的规范字段（期望字段顺序）
    pub detected: Vec<CanonicalField>,
    /// 缺失的规范字段（期望字段顺序）
    pub missing: Vec<CanonicalField>,
}

impl ExtractOutcome {
    pub fn has_missing(&self) -> bool {
        !self.missing.is_empty()
    }
}

// ==========================================
// ImportSummary - 导入汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    /// 导入批次ID
    pub batch_id: Uuid,
    /// 导入时间
    pub imported_at: DateTime<Utc>,
    /// 源文件名
    pub file_name: String,
    /// 读取的工作表名
    pub sheet_name: String,
    /// 导入记录数
    pub total_rows: usize,
    /// 检测到的字段
    pub detected: Vec<CanonicalField>,
    /// 缺失的字段（非致命，需提示用户）
    pub missing: Vec<CanonicalField>,
}

// ==========================================
// PageWindow - 分页窗口
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow<'a> {
    /// 页码（1 起）
    pub page: usize,
    pub page_size: usize,
    /// 总页数 = ceil(total_items / page_size)
    pub total_pages: usize,
    /// 过滤视图中的记录总数
    pub total_items: usize,
    /// 本页第一条在过滤视图中的下标（编辑时用于定位）
    pub start_index: usize,
    pub items: Vec<&'a Record>,
}

impl PageWindow<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 计算总页数
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, PAGE_SIZE), 0);
        assert_eq!(page_count(30, PAGE_SIZE), 1);
        assert_eq!(page_count(31, PAGE_SIZE), 2);
        assert_eq!(page_count(65, PAGE_SIZE), 3);
        assert_eq!(page_count(10, 0), 0);
    }
}
