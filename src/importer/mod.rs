// ==========================================
// 资产盘点工具 - 导入层
// ==========================================
// 职责: 外部盘点表导入，生成内部记录集
// 支持: Excel (.xlsx)
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod header_normalizer;
pub mod inventory_importer;
pub mod row_extractor;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{validate_selected_file, ExcelParser, RawSheet, SPREADSHEET_EXTENSION};
pub use header_normalizer::normalize;
pub use inventory_importer::{ImportedInventory, InventoryImporter, XlsxInventoryImporter};
pub use row_extractor::{HeaderMapping, RowExtractor};
