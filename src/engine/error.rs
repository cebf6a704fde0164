// ==========================================
// 资产盘点工具 - 引擎层错误类型
// ==========================================

use thiserror::Error;

/// 记录集/过滤视图操作错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 过滤视图下标越界（界面接线错误，不应在正常操作中出现）
    #[error("下标越界: index={index}, 过滤视图长度={len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// 记录上不存在该字段（导入时未检测到）
    #[error("记录不含字段: {field}")]
    FieldNotPresent { field: String },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
