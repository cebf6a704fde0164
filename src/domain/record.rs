// ==========================================
// 资产盘点工具 - 盘点记录
// ==========================================
// 职责: 记录 = 字段名 → 字符串值 的映射
// 说明: 字段集合随导入而变化，读取任何字段都必须按"可能缺失"处理
// ==========================================

use crate::domain::types::CanonicalField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Record - 单条盘点记录
// ==========================================
// 持久化格式: 扁平 JSON 对象 {"codigo_patrimonial": "...", ...}
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取规范字段（缺失返回 None）
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.get_key(field.as_str())
    }

    /// 按原始 key 读取
    pub fn get_key(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// 字段是否存在
    pub fn contains(&self, field: CanonicalField) -> bool {
        self.fields.contains_key(field.as_str())
    }

    /// 写入规范字段（存在则覆盖）
    pub fn insert(&mut self, field: CanonicalField, value: impl Into<String>) {
        self.fields.insert(field.as_str().to_string(), value.into());
    }

    /// 仅覆盖已存在的字段
    ///
    /// # 返回
    /// - true: 已更新
    /// - false: 字段不存在，记录未改动
    pub fn set_existing(&mut self, field: CanonicalField, value: impl Into<String>) -> bool {
        match self.fields.get_mut(field.as_str()) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// 所有 key（字典序）
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// 所有值
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
