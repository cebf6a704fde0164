// ==========================================
// 资产盘点工具 - 导出层
// ==========================================
// 职责: 盘点全集 → 表格文件字节
// ==========================================

pub mod error;
pub mod spreadsheet_exporter;

pub use error::{ExportError, ExportResult};
pub use spreadsheet_exporter::{
    export_columns, ExportFormat, SpreadsheetExporter, EXPORT_FILE_NAME, EXPORT_SHEET_NAME,
};
