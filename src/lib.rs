// ==========================================
// 资产盘点工具 - 核心库
// ==========================================
// 功能: 导入 .xlsx 盘点表 → 搜索/分页 → 编辑描述 → 导出
// 技术栈: Rust + SQLite（本地键值持久化）+ calamine / rust_xlsxwriter
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与规范字段
pub mod domain;

// 导入层 - 表格解析与行提取
pub mod importer;

// 引擎层 - 记录集、过滤、分页
pub mod engine;

// 数据仓储层 - 本地持久化
pub mod repository;

// 导出层 - 表格文件生成
pub mod exporter;

// 配置层
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 性能统计
pub mod perf;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 控制器
pub mod api;

// 应用层 - 状态装配与命令行
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{CanonicalField, ImportSummary, PageWindow, Record, PAGE_SIZE};
pub use engine::{FilterEngine, FilterQuery, RecordStore};
pub use exporter::{ExportFormat, SpreadsheetExporter};
pub use importer::{normalize, InventoryImporter, XlsxInventoryImporter};
pub use repository::{BlobStore, InventoryRepository, MemoryBlobStore, SqliteBlobStore};
pub use api::{ApiError, ApiResult, InventoryApi};
pub use config::AppConfig;

// ==========================================
// 常量定义
// ==========================================

// 版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 应用名称
pub const APP_NAME: &str = "Inventario Patrimonial";
