// ==========================================
// 资产盘点工具 - 命令行主入口
// ==========================================

use clap::Parser;
use inventario_patrimonial::app::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    inventario_patrimonial::logging::init();

    tracing::info!(
        version = inventario_patrimonial::VERSION,
        "{} 启动",
        inventario_patrimonial::APP_NAME
    );

    let cli = Cli::parse();
    app::run(cli).await
}
