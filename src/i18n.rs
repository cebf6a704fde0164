// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// rust-i18n，语言包见 locales/{es,en,zh-CN}.yml
// 默认西班牙语；rust_i18n::i18n! 宏在 lib.rs 中初始化
// ==========================================

use crate::domain::CanonicalField;
use tracing::warn;

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 已加载的语言包
pub fn available_locales() -> Vec<&'static str> {
    rust_i18n::available_locales!()
}

/// 切换语言
///
/// 未加载的语言代码不生效，返回 false
pub fn set_locale(locale: &str) -> bool {
    if !available_locales().contains(&locale) {
        warn!(locale, "语言包不存在，保持 {}", current_locale());
        return false;
    }
    rust_i18n::set_locale(locale);
    true
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use inventario_patrimonial::i18n::t;
/// let msg = t("export.empty");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息，替换 `%{name}` 占位符
///
/// # 示例
/// ```no_run
/// use inventario_patrimonial::i18n::t_with_args;
/// let msg = t_with_args("export.done", &[("path", "/tmp/inventario.xlsx")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    args.iter()
        .fold(rust_i18n::t!(key).to_string(), |text, (name, value)| {
            text.replace(&format!("%{{{}}}", name), value)
        })
}

/// 缺失表头提示横幅（规范字段名以逗号分隔）
pub fn missing_headers_warning(missing: &[CanonicalField]) -> String {
    let fields: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
    t_with_args("import.missing_headers", &[("fields", fields.join(", ").as_str())])
}
