// ==========================================
// 资产盘点工具 - API层错误类型
// ==========================================
// 职责: 汇总各层错误，转换为面向用户的错误消息
// 分类: 输入错误 / 解析错误 / 下标错误 / 持久化错误 / 导出错误
// ==========================================

use crate::engine::error::EngineError;
use crate::exporter::error::ExportError;
use crate::i18n::t;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误（立即提示，不改动状态）
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 解析错误
    // ==========================================
    #[error("文件处理失败: {0}")]
    ImportError(String),

    // ==========================================
    // 编辑错误
    // ==========================================
    #[error("下标越界: index={index}, 过滤视图长度={len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("记录不含字段: {0}")]
    FieldNotPresent(String),

    // ==========================================
    // 持久化错误
    // ==========================================
    #[error("持久化状态已损坏: {0}")]
    CorruptState(String),

    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 错误代码（界面/日志用）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::ImportError(_) => "IMPORT_ERROR",
            ApiError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            ApiError::FieldNotPresent(_) => "FIELD_NOT_PRESENT",
            ApiError::CorruptState(_) => "CORRUPT_STATE",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::ExportError(_) => "EXPORT_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

// ==========================================
// 从 ImportError 转换
// 输入错误与解析错误分开归类，输入错误消息本地化
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::NoFileSelected => ApiError::InvalidInput(t("import.no_file")),
            ImportError::UnsupportedFormat(_) => ApiError::InvalidInput(t("import.bad_extension")),
            ImportError::InsufficientData => ApiError::InvalidInput(t("import.insufficient_data")),
            other if other.is_input_error() => ApiError::InvalidInput(other.to_string()),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::IndexOutOfRange { index, len } => ApiError::IndexOutOfRange { index, len },
            EngineError::FieldNotPresent { field } => ApiError::FieldNotPresent(field),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::CorruptState { key, message } => {
                ApiError::CorruptState(format!("key={}: {}", key, message))
            }
            RepositoryError::DatabaseConnectionError(msg)
            | RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::SerializationError(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_input_errors_map_to_invalid_input() {
        let api_err: ApiError = ImportError::InsufficientData.into();
        assert!(matches!(api_err, ApiError::InvalidInput(_)));

        let api_err: ApiError = ImportError::UnsupportedFormat("a.csv".to_string()).into();
        assert_eq!(api_err.code(), "INVALID_INPUT");

        let api_err: ApiError = ImportError::FileNotFound("/tmp/x.xlsx".to_string()).into();
        assert_eq!(api_err.code(), "INVALID_INPUT");
        assert!(api_err.to_string().contains("/tmp/x.xlsx"));
    }

    #[test]
    fn test_parse_error_maps_to_import_error() {
        let api_err: ApiError = ImportError::ExcelParseError("zip".to_string()).into();
        assert_eq!(api_err.code(), "IMPORT_ERROR");
    }

    #[test]
    fn test_repository_error_conversion() {
        let repo_err = RepositoryError::CorruptState {
            key: "sunarpInventory".to_string(),
            message: "EOF".to_string(),
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::CorruptState(msg) => assert!(msg.contains("sunarpInventory")),
            _ => panic!("Expected CorruptState"),
        }
    }

    #[test]
    fn test_serialization_error_maps_to_internal() {
        let api_err: ApiError = RepositoryError::SerializationError("bad map".to_string()).into();
        assert_eq!(api_err.code(), "INTERNAL_ERROR");
        assert!(api_err.to_string().contains("bad map"));
    }

    #[test]
    fn test_engine_error_codes() {
        let api_err: ApiError = EngineError::IndexOutOfRange { index: 5, len: 2 }.into();
        assert_eq!(api_err.code(), "INDEX_OUT_OF_RANGE");
        assert!(api_err.to_string().contains("index=5"));
    }
}
