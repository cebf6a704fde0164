// ==========================================
// 资产盘点工具 - 文件解析器
// ==========================================
// 支持: Excel (.xlsx)
// 输出: 第一个工作表的原始行（第一行为表头）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

/// 唯一接受的扩展名
pub const SPREADSHEET_EXTENSION: &str = "xlsx";

// ==========================================
// RawSheet - 原始工作表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSheet {
    pub sheet_name: String,
    /// 工作表已用区域内的全部行（含空行），单元格已转为字符串
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    /// 拆分为 (表头行, 数据行)
    ///
    /// 少于 2 行视为数据不足
    pub fn split_header(&self) -> ImportResult<(&[String], &[Vec<String>])> {
        match self.rows.split_first() {
            Some((header, data)) if !data.is_empty() => Ok((header.as_slice(), data)),
            _ => Err(ImportError::InsufficientData),
        }
    }
}

/// 校验所选文件
///
/// # 规则
/// - 未选择文件 → NoFileSelected
/// - 文件名不以 .xlsx 结尾 → UnsupportedFormat
pub fn validate_selected_file(path: Option<&Path>) -> ImportResult<&Path> {
    let path = path.ok_or(ImportError::NoFileSelected)?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ImportError::UnsupportedFormat(path.display().to_string()))?;

    if !file_name.ends_with(&format!(".{}", SPREADSHEET_EXTENSION)) {
        return Err(ImportError::UnsupportedFormat(file_name.to_string()));
    }

    Ok(path)
}

// ==========================================
// ExcelParser - xlsx 解析
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    /// 解析 xlsx 字节为原始行
    ///
    /// # 说明
    /// - 只读取第一个工作表
    /// - 区域内的空行保留，单元格值不做修剪
    pub fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawSheet> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        let rows = range
            .rows()
            .map(|cells| cells.iter().map(|cell| cell.to_string()).collect::<Vec<_>>())
            .collect();

        Ok(RawSheet { sheet_name, rows })
    }
}
