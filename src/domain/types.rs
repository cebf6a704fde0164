// ==========================================
// 资产盘点工具 - 领域类型定义
// ==========================================
// 职责: 标准字段词表（9 个规范字段 + 表头别名）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 规范字段 (Canonical Field)
// ==========================================
// 顺序即"期望字段顺序": detected / missing / 导出列序均按此顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    CodigoPatrimonial, // 资产编码
    Responsable,       // 责任人
    Usuario,           // 使用人
    Descripcion,       // 描述
    UbicacFisica,      // 物理位置
    Marca,             // 品牌
    Modelo,            // 型号
    NroSerie,          // 序列号
    Estado,            // 状态
}

impl CanonicalField {
    /// 全部规范字段（期望字段顺序）
    pub const ALL: [CanonicalField; 9] = [
        CanonicalField::CodigoPatrimonial,
        CanonicalField::Responsable,
        CanonicalField::Usuario,
        CanonicalField::Descripcion,
        CanonicalField::UbicacFisica,
        CanonicalField::Marca,
        CanonicalField::Modelo,
        CanonicalField::NroSerie,
        CanonicalField::Estado,
    ];

    /// 规范键名（记录中的 key、导出表头）
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::CodigoPatrimonial => "codigo_patrimonial",
            CanonicalField::Responsable => "responsable",
            CanonicalField::Usuario => "usuario",
            CanonicalField::Descripcion => "descripcion",
            CanonicalField::UbicacFisica => "ubicac_fisica",
            CanonicalField::Marca => "marca",
            CanonicalField::Modelo => "modelo",
            CanonicalField::NroSerie => "nro_serie",
            CanonicalField::Estado => "estado",
        }
    }

    /// 表格列标题（界面展示用）
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalField::CodigoPatrimonial => "Código Patrimonial",
            CanonicalField::Responsable => "Responsable",
            CanonicalField::Usuario => "Usuario",
            CanonicalField::Descripcion => "Descripción",
            CanonicalField::UbicacFisica => "Ubicación Física",
            CanonicalField::Marca => "Marca",
            CanonicalField::Modelo => "Modelo",
            CanonicalField::NroSerie => "Nro. Serie",
            CanonicalField::Estado => "Estado",
        }
    }

    /// 表头别名（均为规范化之后的写法，不含规范键名本身）
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::CodigoPatrimonial => {
                &["codigo", "cod_patrimonial", "cod._patrimonial", "codigo_patrim"]
            }
            CanonicalField::Responsable => &["responsable_del_bien"],
            CanonicalField::Usuario => &["usuario_final"],
            CanonicalField::Descripcion => &["descripcion_del_bien", "detalle"],
            CanonicalField::UbicacFisica => {
                &["ubicacion_fisica", "ubicac._fisica", "ubicacion"]
            }
            CanonicalField::Marca => &[],
            CanonicalField::Modelo => &[],
            CanonicalField::NroSerie => &[
                "nro._serie",
                "nro_de_serie",
                "numero_de_serie",
                "serie",
            ],
            CanonicalField::Estado => &["estado_de_conservacion", "estado_conservacion"],
        }
    }

    /// 判断一个已规范化的表头是否指向本字段（规范键名或别名）
    pub fn matches_normalized(&self, normalized: &str) -> bool {
        self.as_str() == normalized || self.aliases().contains(&normalized)
    }

    /// 由已规范化的表头识别字段
    pub fn from_normalized(normalized: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.matches_normalized(normalized))
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalField::from_normalized(s.trim())
            .ok_or_else(|| format!("未知的规范字段: {}", s))
    }
}
