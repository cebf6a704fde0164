// ==========================================
// 资产盘点工具 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 输入错误（用户可见，立即终止，不改动状态）=====
    #[error("未选择文件")]
    NoFileSelected,

    #[error("文件格式不支持: {0}（仅支持 .xlsx）")]
    UnsupportedFormat(String),

    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件数据不足: 至少需要表头行和一行数据")]
    InsufficientData,

    // ===== 解析错误 =====
    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),
}

impl ImportError {
    /// 是否属于输入错误（文件未选/扩展名/数据不足）
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ImportError::NoFileSelected
                | ImportError::UnsupportedFormat(_)
                | ImportError::FileNotFound(_)
                | ImportError::InsufficientData
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(err.to_string()),
            _ => ImportError::FileReadError(err.to_string()),
        }
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
