// ==========================================
// 资产盘点工具 - 行提取器
// ==========================================
// 职责: 原始单元格 → 仅含已识别字段的记录 + 缺失字段清单
// 流程: 表头规范化 → 字段定位 → 逐行取值
// ==========================================

use crate::domain::{CanonicalField, ExtractOutcome, Record};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::header_normalizer::normalize;
use tracing::debug;

// ==========================================
// HeaderMapping - 表头映射（临时结构，不持久化）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMapping {
    /// 规范化后的表头（保持列位置）
    normalized: Vec<String>,
    /// 已检测字段及其列下标（期望字段顺序）
    columns: Vec<(CanonicalField, usize)>,
}

impl HeaderMapping {
    /// 由原始表头行构建映射
    ///
    /// 同一字段命中多列时取最左列
    pub fn from_header_row<S: AsRef<str>>(header_row: &[S]) -> Self {
        let normalized: Vec<String> = header_row.iter().map(|h| normalize(h.as_ref())).collect();

        let columns = CanonicalField::ALL
            .iter()
            .filter_map(|field| {
                normalized
                    .iter()
                    .position(|label| field.matches_normalized(label))
                    .map(|idx| (*field, idx))
            })
            .collect();

        Self {
            normalized,
            columns,
        }
    }

    pub fn normalized_headers(&self) -> &[String] {
        &self.normalized
    }

    /// 字段所在列
    pub fn column_of(&self, field: CanonicalField) -> Option<usize> {
        self.columns
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, idx)| *idx)
    }

    /// 检测到的字段（期望字段顺序）
    pub fn detected(&self) -> Vec<CanonicalField> {
        self.columns.iter().map(|(f, _)| *f).collect()
    }

    /// 缺失的字段（期望字段顺序）
    pub fn missing(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .iter()
            .copied()
            .filter(|f| self.column_of(*f).is_none())
            .collect()
    }

    /// 从一行单元格构建记录；缺失/空白单元格取空串
    pub fn build_record<S: AsRef<str>>(&self, row: &[S]) -> Record {
        let mut record = Record::new();
        for (field, idx) in &self.columns {
            let value = row.get(*idx).map(|c| c.as_ref()).unwrap_or("");
            record.insert(*field, value);
        }
        record
    }
}

// ==========================================
// RowExtractor - 行提取器
// ==========================================
pub struct RowExtractor;

impl RowExtractor {
    /// 提取记录
    ///
    /// # 参数
    /// - header_row: 第一行（原始列名）
    /// - data_rows: 数据行
    ///
    /// # 返回
    /// - Ok(ExtractOutcome): 记录 + 检测/缺失字段
    /// - Err(InsufficientData): 没有数据行
    pub fn extract<H, C>(&self, header_row: &[H], data_rows: &[Vec<C>]) -> ImportResult<ExtractOutcome>
    where
        H: AsRef<str>,
        C: AsRef<str>,
    {
        if data_rows.is_empty() {
            return Err(ImportError::InsufficientData);
        }

        let mapping = HeaderMapping::from_header_row(header_row);
        debug!(normalized = ?mapping.normalized_headers(), "表头规范化完成");

        let detected = mapping.detected();
        let missing = mapping.missing();
        debug!(detected = ?detected, missing = ?missing, "字段检测完成");

        let records = data_rows
            .iter()
            .map(|row| mapping.build_record(row))
            .collect();

        Ok(ExtractOutcome {
            records,
            detected,
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_extract_recognized_fields_only() {
        let headers = ["Codigo", "Usuario", "Extra"];
        let data = vec![row(&["A1", "U1", "X"])];

        let outcome = RowExtractor.extract(&headers, &data).unwrap();

        assert_eq!(
            outcome.detected,
            vec![CanonicalField::CodigoPatrimonial, CanonicalField::Usuario]
        );
        assert_eq!(outcome.missing.len(), 7);
        assert!(!outcome.missing.contains(&CanonicalField::Usuario));

        let expected: Record = [("codigo_patrimonial", "A1"), ("usuario", "U1")]
            .into_iter()
            .collect();
        assert_eq!(outcome.records, vec![expected]);
    }

    #[test]
    fn test_extract_header_only_is_insufficient() {
        let headers = ["Código Patrimonial"];
        let data: Vec<Vec<String>> = Vec::new();

        let result = RowExtractor.extract(&headers, &data);
        assert!(matches!(result, Err(ImportError::InsufficientData)));
    }

    #[test]
    fn test_extract_detected_in_expected_order() {
        // 源列顺序与期望顺序不同
        let headers = ["Estado", "Marca", "CÓDIGO PATRIMONIAL"];
        let data = vec![row(&["Bueno", "HP", "740800000001"])];

        let outcome = RowExtractor.extract(&headers, &data).unwrap();
        assert_eq!(
            outcome.detected,
            vec![
                CanonicalField::CodigoPatrimonial,
                CanonicalField::Marca,
                CanonicalField::Estado
            ]
        );
        assert_eq!(
            outcome.records[0].get(CanonicalField::CodigoPatrimonial),
            Some("740800000001")
        );
    }

    #[test]
    fn test_short_rows_default_to_empty() {
        let headers = ["Usuario", "Marca", "Modelo"];
        let data = vec![row(&["U1"]), row(&["U2", "", "M2"])];

        let outcome = RowExtractor.extract(&headers, &data).unwrap();
        assert_eq!(outcome.records[0].get(CanonicalField::Marca), Some(""));
        assert_eq!(outcome.records[0].get(CanonicalField::Modelo), Some(""));
        assert_eq!(outcome.records[1].get(CanonicalField::Modelo), Some("M2"));
        // 所有记录 key 集合一致
        assert_eq!(outcome.records[0].len(), outcome.records[1].len());
    }

    #[test]
    fn test_duplicate_header_leftmost_wins() {
        let headers = ["Usuario", "usuario ", "Ubicación Física", "Ubicacion"];
        let data = vec![row(&["left", "right", "Sede A", "Sede B"])];

        let outcome = RowExtractor.extract(&headers, &data).unwrap();
        assert_eq!(outcome.records[0].get(CanonicalField::Usuario), Some("left"));
        assert_eq!(
            outcome.records[0].get(CanonicalField::UbicacFisica),
            Some("Sede A")
        );
    }

    #[test]
    fn test_bom_prefixed_first_header_detected() {
        let headers = ["\u{FEFF}Código Patrimonial", "Usuario"];
        let data = vec![row(&["740800000001", "U1"])];

        let outcome = RowExtractor.extract(&headers, &data).unwrap();
        assert_eq!(
            outcome.detected,
            vec![CanonicalField::CodigoPatrimonial, CanonicalField::Usuario]
        );
        assert_eq!(
            outcome.records[0].get(CanonicalField::CodigoPatrimonial),
            Some("740800000001")
        );
    }

    #[test]
    fn test_all_fields_present() {
        let headers: Vec<&str> = CanonicalField::ALL.iter().map(|f| f.label()).collect();
        let data = vec![row(&["1", "2", "3", "4", "5", "6", "7", "8", "9"])];

        let outcome = RowExtractor.extract(&headers, &data).unwrap();
        assert!(!outcome.has_missing());
        assert_eq!(outcome.records[0].len(), 9);
        assert_eq!(outcome.records[0].get(CanonicalField::NroSerie), Some("8"));
    }
}
