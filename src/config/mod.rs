// ==========================================
// 资产盘点工具 - 配置层
// ==========================================
// 职责: 运行期配置（数据库路径、界面语言）
// 来源: 环境变量 > 默认值
// ==========================================

pub mod app_config;

pub use app_config::{
    resolve_locale, AppConfig, DEFAULT_LOCALE, ENV_DB_PATH, ENV_LOCALE, SUPPORTED_LOCALES,
};
