// ==========================================
// 资产盘点工具 - 盘点全集导出
// ==========================================
// 输出: 单工作表 xlsx / CSV
// 表头: 全集中出现过的字段（规范字段按期望顺序在前，其余 key 按字典序在后）
// ==========================================

use crate::domain::{CanonicalField, Record};
use crate::exporter::error::{ExportError, ExportResult};
use crate::perf::PerfGuard;
use rust_xlsxwriter::Workbook;
use std::collections::BTreeSet;
use tracing::info;

/// 导出文件名
pub const EXPORT_FILE_NAME: &str = "inventario_sunarp_2026.xlsx";

/// 工作表名
pub const EXPORT_SHEET_NAME: &str = "Inventario";

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// 计算导出列
pub fn export_columns(inventory: &[Record]) -> Vec<String> {
    let canonical = CanonicalField::ALL
        .iter()
        .filter(|f| inventory.iter().any(|r| r.contains(**f)))
        .map(|f| f.as_str().to_string());

    let extras: BTreeSet<&str> = inventory
        .iter()
        .flat_map(|r| r.keys())
        .filter(|k| CanonicalField::ALL.iter().all(|f| f.as_str() != *k))
        .collect();

    canonical
        .chain(extras.into_iter().map(str::to_string))
        .collect()
}

/// 数据行下标 → xlsx 行号（第 0 行为表头）
fn cell_row(row_idx: usize) -> ExportResult<u32> {
    row_idx
        .checked_add(1)
        .and_then(|row| u32::try_from(row).ok())
        .ok_or_else(|| ExportError::XlsxWriteError(format!("行号超出范围: {}", row_idx)))
}

/// 列下标 → xlsx 列号
fn cell_col(col_idx: usize) -> ExportResult<u16> {
    u16::try_from(col_idx)
        .map_err(|_| ExportError::XlsxWriteError(format!("列号超出范围: {}", col_idx)))
}

// ==========================================
// SpreadsheetExporter
// ==========================================
pub struct SpreadsheetExporter {
    sheet_name: String,
}

impl SpreadsheetExporter {
    pub fn new() -> Self {
        Self::with_sheet_name(EXPORT_SHEET_NAME)
    }

    pub fn with_sheet_name(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    /// 按格式导出
    pub fn export(&self, inventory: &[Record], format: ExportFormat) -> ExportResult<Vec<u8>> {
        match format {
            ExportFormat::Xlsx => self.export_xlsx(inventory),
            ExportFormat::Csv => self.export_csv(inventory),
        }
    }

    /// 导出 xlsx 字节
    ///
    /// # 错误
    /// - EmptyInventory: 全集为空
    pub fn export_xlsx(&self, inventory: &[Record]) -> ExportResult<Vec<u8>> {
        let _perf = PerfGuard::new("inventory_export_xlsx");
        if inventory.is_empty() {
            return Err(ExportError::EmptyInventory);
        }

        let columns = export_columns(inventory);
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, name) in columns.iter().enumerate() {
            worksheet.write_string(0, cell_col(col)?, name)?;
        }

        for (row_idx, record) in inventory.iter().enumerate() {
            let row = cell_row(row_idx)?;
            for (col, name) in columns.iter().enumerate() {
                let value = record.get_key(name).unwrap_or("");
                if !value.is_empty() {
                    worksheet.write_string(row, cell_col(col)?, value)?;
                }
            }
        }

        let bytes = workbook.save_to_buffer()?;
        info!(rows = inventory.len(), columns = columns.len(), bytes = bytes.len(), "xlsx 导出完成");
        Ok(bytes)
    }

    /// 导出 CSV 字节（UTF-8）
    pub fn export_csv(&self, inventory: &[Record]) -> ExportResult<Vec<u8>> {
        let _perf = PerfGuard::new("inventory_export_csv");
        if inventory.is_empty() {
            return Err(ExportError::EmptyInventory);
        }

        let columns = export_columns(inventory);
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&columns)?;
        for record in inventory {
            writer.write_record(columns.iter().map(|c| record.get_key(c).unwrap_or("")))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::CsvWriteError(e.to_string()))?;
        info!(rows = inventory.len(), columns = columns.len(), "csv 导出完成");
        Ok(bytes)
    }
}

impl Default for SpreadsheetExporter {
    fn default() -> Self {
        Self::new()
    }
}
