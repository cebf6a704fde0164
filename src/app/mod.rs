// ==========================================
// 资产盘点工具 - 应用层
// ==========================================
// 职责: 状态装配 + 命令行交互
// ==========================================

pub mod cli;
pub mod state;

// 重导出
pub use cli::{run, Cli, Command};
pub use state::AppState;
