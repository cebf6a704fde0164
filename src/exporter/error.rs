// ==========================================
// 资产盘点工具 - 导出模块错误类型
// ==========================================

use thiserror::Error;

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    /// 空集无法推导表头
    #[error("导出失败: 盘点全集为空")]
    EmptyInventory,

    #[error("Excel 写入失败: {0}")]
    XlsxWriteError(String),

    #[error("CSV 写入失败: {0}")]
    CsvWriteError(String),

    #[error("文件写入失败: {0}")]
    FileWriteError(String),
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::XlsxWriteError(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvWriteError(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::FileWriteError(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
