// ==========================================
// 资产盘点工具 - 盘点表导入器
// ==========================================
// 职责: 整合导入流程，从文件到记录集
// 流程: 校验文件 → 异步读取 → 解析 → 表头规范化/行提取 → 汇总
// 说明: 本模块不改动任何状态；落库与替换内存集由调用方负责
// ==========================================

use crate::domain::{ImportSummary, Record};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{validate_selected_file, ExcelParser};
use crate::importer::row_extractor::RowExtractor;
use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ImportedInventory - 导入产物
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportedInventory {
    pub summary: ImportSummary,
    pub records: Vec<Record>,
}

// ==========================================
// InventoryImporter Trait
// ==========================================
// 用途: 盘点表导入主接口
// 实现者: XlsxInventoryImporter
#[async_trait]
pub trait InventoryImporter: Send + Sync {
    /// 从文件导入盘点记录
    ///
    /// # 参数
    /// - file_path: 用户所选文件（None 表示未选择）
    ///
    /// # 返回
    /// - Ok(ImportedInventory): 记录集 + 汇总（含缺失字段）
    /// - Err: 输入错误 / 解析错误
    async fn import_file(&self, file_path: Option<&Path>) -> ImportResult<ImportedInventory>;

    /// 从内存字节导入（文件已由调用方读取）
    fn import_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<ImportedInventory>;
}

// ==========================================
// XlsxInventoryImporter - xlsx 导入实现
// ==========================================
pub struct XlsxInventoryImporter {
    parser: ExcelParser,
    extractor: RowExtractor,
}

impl XlsxInventoryImporter {
    pub fn new() -> Self {
        Self {
            parser: ExcelParser,
            extractor: RowExtractor,
        }
    }
}

impl Default for XlsxInventoryImporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryImporter for XlsxInventoryImporter {
    #[instrument(skip(self))]
    async fn import_file(&self, file_path: Option<&Path>) -> ImportResult<ImportedInventory> {
        let path = validate_selected_file(file_path).map_err(|e| {
            warn!(error = %e, "文件校验未通过");
            e
        })?;

        // === 步骤 1: 读取文件（唯一的异步边界）===
        debug!("步骤 1: 读取文件");
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            error!(error = %e, path = %path.display(), "文件读取失败");
            match e.kind() {
                std::io::ErrorKind::NotFound => ImportError::FileNotFound(path.display().to_string()),
                _ => ImportError::from(e),
            }
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        self.import_bytes(&file_name, &bytes)
    }

    fn import_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<ImportedInventory> {
        let batch_id = Uuid::new_v4();
        info!(batch_id = %batch_id, file_name = %file_name, size = bytes.len(), "开始导入盘点表");

        // === 步骤 2: 解析工作表 ===
        debug!("步骤 2: 解析工作表");
        let sheet = self.parser.parse_bytes(bytes).map_err(|e| {
            error!(error = %e, "文件解析失败");
            e
        })?;
        let (header_row, data_rows) = sheet.split_header()?;
        debug!(sheet = %sheet.sheet_name, rows = data_rows.len(), "工作表解析完成");

        // === 步骤 3: 表头规范化 + 行提取 ===
        debug!("步骤 3: 行提取");
        let outcome = self.extractor.extract(header_row, data_rows)?;

        if outcome.has_missing() {
            let missing: Vec<&str> = outcome.missing.iter().map(|f| f.as_str()).collect();
            warn!(missing = ?missing, "部分期望字段未找到，仅提取已有字段");
        }

        let summary = ImportSummary {
            batch_id,
            imported_at: Utc::now(),
            file_name: file_name.to_string(),
            sheet_name: sheet.sheet_name.clone(),
            total_rows: outcome.records.len(),
            detected: outcome.detected,
            missing: outcome.missing,
        };

        info!(
            batch_id = %batch_id,
            total_rows = summary.total_rows,
            detected = summary.detected.len(),
            missing = summary.missing.len(),
            "盘点表导入完成"
        );

        Ok(ImportedInventory {
            summary,
            records: outcome.records,
        })
    }
}
