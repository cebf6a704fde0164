// ==========================================
// 资产盘点工具 - 过滤引擎
// ==========================================
// 规则: 四个谓词（全文 + 编码/位置/使用人）逻辑与
// - 大小写不敏感的子串匹配
// - 空查询对该维度不做限制
// - 全文查询命中记录任一字段值即可
// - 限定字段缺失时，非空限定查询视为不匹配
// - 结果保持原有顺序（稳定过滤）
// ==========================================

use crate::domain::{CanonicalField, Record};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ==========================================
// FilterQuery - 过滤条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterQuery {
    /// 全文检索
    pub general: String,
    /// codigo_patrimonial
    pub codigo: String,
    /// ubicac_fisica
    pub ubicacion: String,
    /// usuario
    pub usuario: String,
}

impl FilterQuery {
    pub fn new(
        general: impl Into<String>,
        codigo: impl Into<String>,
        ubicacion: impl Into<String>,
        usuario: impl Into<String>,
    ) -> Self {
        Self {
            general: general.into(),
            codigo: codigo.into(),
            ubicacion: ubicacion.into(),
            usuario: usuario.into(),
        }
    }

    /// 四个维度均为空
    pub fn is_empty(&self) -> bool {
        self.general.is_empty()
            && self.codigo.is_empty()
            && self.ubicacion.is_empty()
            && self.usuario.is_empty()
    }
}

/// 预先转小写的查询
struct LoweredQuery {
    general: String,
    scoped: [(CanonicalField, String); 3],
}

impl From<&FilterQuery> for LoweredQuery {
    fn from(q: &FilterQuery) -> Self {
        Self {
            general: q.general.to_lowercase(),
            scoped: [
                (CanonicalField::CodigoPatrimonial, q.codigo.to_lowercase()),
                (CanonicalField::UbicacFisica, q.ubicacion.to_lowercase()),
                (CanonicalField::Usuario, q.usuario.to_lowercase()),
            ],
        }
    }
}

impl LoweredQuery {
    fn matches(&self, record: &Record) -> bool {
        let general_ok = self.general.is_empty()
            || record
                .values()
                .any(|v| v.to_lowercase().contains(&self.general));

        general_ok
            && self.scoped.iter().all(|(field, needle)| {
                needle.is_empty()
                    || record
                        .get(*field)
                        .is_some_and(|v| v.to_lowercase().contains(needle.as_str()))
            })
    }
}

// ==========================================
// FilterEngine - 过滤引擎
// ==========================================
// 红线: 纯计算，不改动记录
pub struct FilterEngine;

impl FilterEngine {
    /// 单条记录是否满足条件
    pub fn matches(&self, record: &Record, query: &FilterQuery) -> bool {
        LoweredQuery::from(query).matches(record)
    }

    /// 过滤全集，返回命中记录在全集中的下标（保持顺序）
    pub fn apply(&self, inventory: &[Record], query: &FilterQuery) -> Vec<usize> {
        if query.is_empty() {
            return (0..inventory.len()).collect();
        }

        let lowered = LoweredQuery::from(query);
        let hits: Vec<usize> = inventory
            .iter()
            .enumerate()
            .filter(|(_, r)| lowered.matches(r))
            .map(|(idx, _)| idx)
            .collect();

        debug!(total = inventory.len(), hits = hits.len(), "过滤完成");
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    fn inventory() -> Vec<Record> {
        vec![
            record(&[
                ("codigo_patrimonial", "740800000001"),
                ("usuario", "JPEREZ"),
                ("ubicac_fisica", "Sede Central - Piso 2"),
                ("descripcion", "Monitor LED 24"),
            ]),
            record(&[
                ("codigo_patrimonial", "740800000002"),
                ("usuario", "MROJAS"),
                ("ubicac_fisica", "Oficina Zonal Piura"),
                ("descripcion", "CPU Core i5"),
            ]),
            record(&[
                ("codigo_patrimonial", "112200000003"),
                ("usuario", "jperez"),
                ("ubicac_fisica", "Sede Central - Archivo"),
                ("descripcion", "Impresora láser"),
            ]),
        ]
    }

    #[test]
    fn test_empty_query_keeps_all_in_order() {
        let inv = inventory();
        assert_eq!(FilterEngine.apply(&inv, &FilterQuery::default()), vec![0, 1, 2]);
    }

    #[test]
    fn test_general_matches_any_field() {
        let inv = inventory();
        let q = FilterQuery::new("monitor", "", "", "");
        assert_eq!(FilterEngine.apply(&inv, &q), vec![0]);

        // 全文检索覆盖非限定字段
        let q = FilterQuery::new("PIURA", "", "", "");
        assert_eq!(FilterEngine.apply(&inv, &q), vec![1]);
    }

    #[test]
    fn test_scoped_case_insensitive() {
        let inv = inventory();
        let q = FilterQuery::new("", "", "", "JPerez");
        assert_eq!(FilterEngine.apply(&inv, &q), vec![0, 2]);

        let q = FilterQuery::new("", "7408", "", "");
        assert_eq!(FilterEngine.apply(&inv, &q), vec![0, 1]);
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let inv = inventory();
        let q = FilterQuery::new("", "", "sede central", "jperez");
        assert_eq!(FilterEngine.apply(&inv, &q), vec![0, 2]);

        let q = FilterQuery::new("impresora", "", "sede central", "jperez");
        assert_eq!(FilterEngine.apply(&inv, &q), vec![2]);

        let q = FilterQuery::new("impresora", "7408", "", "");
        assert!(FilterEngine.apply(&inv, &q).is_empty());
    }

    #[test]
    fn test_absent_scoped_field_fails_non_empty_query() {
        let inv = vec![record(&[("descripcion", "Silla")])];

        let q = FilterQuery::new("", "", "", "x");
        assert!(FilterEngine.apply(&inv, &q).is_empty());

        // 空查询不受字段缺失影响
        assert_eq!(FilterEngine.apply(&inv, &FilterQuery::default()), vec![0]);
    }

    #[test]
    fn test_filtered_records_satisfy_all_predicates() {
        let inv = inventory();
        let queries = [
            FilterQuery::new("e", "", "", ""),
            FilterQuery::new("", "0000", "central", ""),
            FilterQuery::new("i", "", "", "rojas"),
            FilterQuery::new("zzz", "", "", ""),
        ];
        for q in &queries {
            let hits = FilterEngine.apply(&inv, q);
            assert!(hits.len() <= inv.len());
            for idx in hits {
                assert!(FilterEngine.matches(&inv[idx], q));
            }
        }
    }
}
