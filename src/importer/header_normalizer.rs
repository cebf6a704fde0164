// ==========================================
// 资产盘点工具 - 表头规范化
// ==========================================
// 规则（按顺序）: 小写 → 去首尾空白 → NFD 分解并去除 U+0300..U+036F 组合音标
//               → 连续空白折叠为单个 '_'
// 空白: Unicode 空白字符，另加 U+FEFF（UTF-8 BOM 常残留在首列表头）
// ==========================================

use unicode_normalization::UnicodeNormalization as _;

/// 组合附加符号区块
const COMBINING_DIACRITICS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// 字节序标记（零宽不换行空格）
const BYTE_ORDER_MARK: char = '\u{FEFF}';

fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == BYTE_ORDER_MARK
}

/// 规范化原始列名
///
/// 纯函数、全函数、幂等: `normalize(normalize(x)) == normalize(x)`
///
/// # 示例
/// ```
/// use inventario_patrimonial::importer::header_normalizer::normalize;
/// assert_eq!(normalize("Código Patrimonial"), "codigo_patrimonial");
/// ```
pub fn normalize(label: &str) -> String {
    let lowered = label.to_lowercase();
    let stripped: String = lowered
        .trim_matches(is_blank)
        .nfd()
        .filter(|c| !COMBINING_DIACRITICS.contains(c))
        .collect();

    let mut out = String::with_capacity(stripped.len());
    let mut in_whitespace = false;
    for c in stripped.chars() {
        if is_blank(c) {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}
