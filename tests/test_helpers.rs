// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、内存中生成 xlsx 盘点表
// ==========================================

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use inventario_patrimonial::app::AppState;
use inventario_patrimonial::config::AppConfig;

/// 创建临时目录及其中的数据库路径
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("inventario.db").to_string_lossy().to_string();
    (dir, db_path)
}

/// 基于临时数据库装配 AppState（从持久化恢复）
pub fn open_state(db_path: &str) -> AppState {
    let config = AppConfig {
        db_path: db_path.to_string(),
        locale: "es".to_string(),
    };
    AppState::new(config).unwrap()
}

/// 生成 xlsx 字节（第一行为表头）
pub fn build_xlsx(rows: &[Vec<String>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            worksheet.write_string(r as u32, c as u16, value).unwrap();
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// 写出 xlsx 文件
pub fn write_xlsx(dir: &Path, file_name: &str, rows: &[Vec<String>]) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, build_xlsx(rows)).unwrap();
    path
}

/// 全部九个字段都齐全的盘点表
///
/// 偶数行使用人 JPEREZ，奇数行 MROJAS；前 10 行位于 Sede Central
pub fn full_inventory_rows(n: usize) -> Vec<Vec<String>> {
    let header = [
        "Código Patrimonial",
        "Responsable",
        "Usuario",
        "Descripción",
        "Ubicac. Física",
        "Marca",
        "Modelo",
        "Nro. Serie",
        "Estado",
    ];
    let mut rows = vec![header.iter().map(|h| h.to_string()).collect::<Vec<_>>()];
    for i in 0..n {
        rows.push(vec![
            format!("7408{:08}", i),
            "Ana Torres".to_string(),
            if i % 2 == 0 { "JPEREZ" } else { "MROJAS" }.to_string(),
            format!("Monitor LED {}", i),
            if i < 10 { "Sede Central - Piso 2" } else { "Oficina Zonal" }.to_string(),
            "HP".to_string(),
            "V24i".to_string(),
            format!("SN-{:05}", i),
            "Bueno".to_string(),
        ]);
    }
    rows
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
