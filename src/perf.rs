// ==========================================
// 资产盘点工具 - 性能统计
// ==========================================
// 职责: 记录导入/保存/导出耗时，以及期间执行的 SQL 数
// 开关:
// - `INVENTARIO_PERF_SQL=1` 开启 SQL 计数（Debug 默认开启）
// - `INVENTARIO_SLOW_SQL_MS=50` 慢 SQL 阈值（毫秒）
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

static SQL_TRACE_ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_SQL_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static GUARD_DEPTH: Cell<u32> = const { Cell::new(0) };
    static SQL_COUNT: Cell<u64> = const { Cell::new(0) };
}

fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().map(|v| {
        matches!(
            v.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

/// 为连接安装 SQL trace/profile 回调
pub fn install_sqlite_tracing(conn: &mut Connection) {
    let enabled = env_flag("INVENTARIO_PERF_SQL").unwrap_or(cfg!(debug_assertions));
    SQL_TRACE_ENABLED.store(enabled, Ordering::Relaxed);

    if !enabled {
        conn.trace(None);
        conn.profile(None);
        return;
    }

    let slow_ms = std::env::var("INVENTARIO_SLOW_SQL_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(50);
    SLOW_SQL_MS.store(slow_ms, Ordering::Relaxed);

    conn.trace(Some(on_sql_trace));
    conn.profile(Some(on_sql_profile));
}

fn on_sql_trace(_sql: &str) {
    if GUARD_DEPTH.with(|d| d.get()) == 0 {
        return;
    }
    SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
}

fn on_sql_profile(sql: &str, duration: Duration) {
    let ms = duration.as_millis() as u64;
    let threshold = SLOW_SQL_MS.load(Ordering::Relaxed);
    if threshold > 0 && ms >= threshold {
        let one_line: String = sql.split_whitespace().collect::<Vec<_>>().join(" ");
        let short: String = one_line.chars().take(200).collect();
        tracing::warn!(target: "slow_sql", duration_ms = ms, sql = %short, "slow sql");
    }
}

/// 性能统计 Guard：drop 时输出 elapsed_ms + SQL 数
///
/// ```ignore
/// let _perf = inventario_patrimonial::perf::PerfGuard::new("inventory_export");
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    sql_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        GUARD_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            op,
            start: Instant::now(),
            sql_start: SQL_COUNT.with(|c| c.get()),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let sql_count = SQL_COUNT.with(|c| c.get()).saturating_sub(self.sql_start);

        if SQL_TRACE_ENABLED.load(Ordering::Relaxed) {
            tracing::info!(target: "perf", op = self.op, elapsed_ms, sql_count, "done");
        } else {
            tracing::info!(target: "perf", op = self.op, elapsed_ms, "done");
        }

        GUARD_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
