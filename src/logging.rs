// ==========================================
// 日志系统初始化
// ==========================================
// tracing-subscriber fmt 输出，RUST_LOG 控制级别
// INVENTARIO_LOG_FORMAT=json 时输出 JSON 行
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=inventario_patrimonial=trace,perf=debug
/// - INVENTARIO_LOG_FORMAT: `json` 输出结构化日志
///
/// # 示例
/// ```no_run
/// use inventario_patrimonial::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("INVENTARIO_LOG_FORMAT")
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // 日志写 stderr，stdout 留给表格/导出内容
    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("logging already initialized: {}", e);
    }
}

/// 初始化测试环境的日志系统
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
