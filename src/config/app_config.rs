// ==========================================
// 资产盘点工具 - 应用配置
// ==========================================
// 环境变量:
// - INVENTARIO_DB_PATH: SQLite 文件路径（默认: 用户数据目录/inventario-patrimonial/inventario.db）
// - INVENTARIO_LOCALE: 界面语言 es / en / zh-CN（默认: es）
// ==========================================

use std::path::PathBuf;
use tracing::warn;

pub const ENV_DB_PATH: &str = "INVENTARIO_DB_PATH";
pub const ENV_LOCALE: &str = "INVENTARIO_LOCALE";

pub const DEFAULT_LOCALE: &str = "es";
pub const SUPPORTED_LOCALES: [&str; 3] = ["es", "en", "zh-CN"];

const DB_FILE_NAME: &str = "inventario.db";
const DATA_DIR_NAME: &str = "inventario-patrimonial";

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: String,
    pub locale: String,
}

impl AppConfig {
    /// 从进程环境变量解析
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源解析（测试时注入）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = non_blank(lookup(ENV_DB_PATH)).unwrap_or_else(default_db_path);

        let locale = match non_blank(lookup(ENV_LOCALE)) {
            Some(raw) => match resolve_locale(&raw) {
                Some(locale) => locale.to_string(),
                None => {
                    warn!(locale = %raw, "不支持的界面语言，回退到默认语言");
                    DEFAULT_LOCALE.to_string()
                }
            },
            None => DEFAULT_LOCALE.to_string(),
        };

        Self { db_path, locale }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

fn default_db_path() -> String {
    let mut path = PathBuf::from(".").join(DB_FILE_NAME);

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join(DATA_DIR_NAME);
        match std::fs::create_dir_all(&dir) {
            Ok(()) => path = dir.join(DB_FILE_NAME),
            Err(e) => warn!(dir = %dir.display(), error = %e, "无法创建数据目录，使用当前目录"),
        }
    }

    path.to_string_lossy().to_string()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 匹配支持的语言代码（大小写不敏感，下划线与连字符等价）
pub fn resolve_locale(raw: &str) -> Option<&'static str> {
    let wanted = raw.trim().replace('_', "-").to_lowercase();
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|l| l.to_lowercase() == wanted)
}
