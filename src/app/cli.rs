// ==========================================
// 资产盘点工具 - 命令行
// ==========================================
// 子命令: import / list / edit / export / clear
// 输出: 表格与提示写 stdout，日志写 stderr
// ==========================================

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::app::state::AppState;
use crate::config::{resolve_locale, AppConfig};
use crate::domain::{CanonicalField, ImportSummary, PageWindow};
use crate::engine::FilterQuery;
use crate::exporter::{ExportFormat, EXPORT_FILE_NAME};
use crate::i18n::{missing_headers_warning, t, t_with_args};

#[derive(Parser, Debug)]
#[command(
    name = "inventario",
    version,
    about = "Importa, busca, edita y exporta el inventario patrimonial."
)]
pub struct Cli {
    /// SQLite database file (overrides INVENTARIO_DB_PATH).
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// UI language: es, en or zh-CN (overrides INVENTARIO_LOCALE).
    #[arg(long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import an .xlsx inventory sheet, replacing the stored inventory.
    Import {
        /// Workbook to import (first worksheet is read).
        file: PathBuf,
    },

    /// Show one page of the (filtered) inventory.
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Page number, starting at 1.
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Print the page as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Edit a field of the record at a filtered index.
    Edit {
        #[command(flatten)]
        filters: FilterArgs,

        /// Index within the filtered view (as shown by `list`).
        index: usize,

        /// Field to edit.
        #[arg(long, default_value = "descripcion", value_parser = parse_field)]
        field: CanonicalField,

        /// New value.
        value: String,
    },

    /// Export the whole inventory (filters are ignored).
    Export {
        /// Output file (default: inventario_sunarp_2026.xlsx / .csv).
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = FormatArg::Xlsx)]
        format: FormatArg,
    },

    /// Remove the stored inventory.
    Clear,
}

/// Search boxes: general text plus code, location and user.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Matches any field value.
    #[arg(long, default_value = "")]
    pub q: String,

    #[arg(long, default_value = "")]
    pub codigo: String,

    #[arg(long, default_value = "")]
    pub ubicacion: String,

    #[arg(long, default_value = "")]
    pub usuario: String,
}

impl FilterArgs {
    pub fn to_query(&self) -> FilterQuery {
        FilterQuery::new(
            self.q.as_str(),
            self.codigo.as_str(),
            self.ubicacion.as_str(),
            self.usuario.as_str(),
        )
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

fn parse_field(raw: &str) -> std::result::Result<CanonicalField, String> {
    raw.parse()
}

// ==========================================
// 入口
// ==========================================

/// 解析配置、装配状态并执行子命令
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env();
    if let Some(db) = &cli.db {
        config.db_path = db.to_string_lossy().to_string();
    }
    if let Some(raw) = &cli.locale {
        match resolve_locale(raw) {
            Some(locale) => config.locale = locale.to_string(),
            None => warn!(locale = %raw, "不支持的界面语言，沿用 {}", config.locale),
        }
    }

    crate::i18n::set_locale(&config.locale);

    // clear 不读取存量数据，损坏的状态也能清掉
    let mut state = match cli.command {
        Command::Clear => AppState::open(config),
        _ => AppState::new(config),
    }
    .map_err(localize)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&mut state, cli.command, &mut out).await
}

/// 在已装配的状态上执行一个子命令
pub async fn execute<W: Write>(state: &mut AppState, command: Command, out: &mut W) -> Result<()> {
    debug!(?command, "执行子命令");
    match command {
        Command::Import { file } => {
            let summary = state
                .api
                .import_file(Some(file.as_path()))
                .await
                .map_err(localize)?;
            write_import_summary(out, &summary)?;
            write!(out, "{}", render_page(&state.api.current_page()))?;
        }

        Command::List {
            filters,
            page,
            json,
        } => {
            state.api.filter(filters.to_query());
            let window = state.api.go_to_page(page);
            if json {
                writeln!(out, "{}", page_to_json(&window)?)?;
            } else {
                write!(out, "{}", render_page(&window))?;
            }
        }

        Command::Edit {
            filters,
            index,
            field,
            value,
        } => {
            state.api.filter(filters.to_query());
            state
                .api
                .update_field(index, field, &value)
                .map_err(|e| {
                    let message = e.to_string();
                    anyhow!(t_with_args("edit.failed", &[("message", message.as_str())]))
                })?;
            writeln!(
                out,
                "{}",
                t_with_args(
                    "edit.done",
                    &[
                        ("index", index.to_string().as_str()),
                        ("field", field.as_str()),
                        ("value", value.as_str()),
                    ],
                )
            )?;
        }

        Command::Export { out: path, format } => {
            if !state.api.can_export() {
                return Err(anyhow!(t("export.empty")));
            }
            let format = ExportFormat::from(format);
            let path = path.unwrap_or_else(|| default_export_path(format));
            state
                .api
                .export_to_file(&path, format)
                .await
                .map_err(localize)?;
            writeln!(
                out,
                "{}",
                t_with_args("export.done", &[("path", path.display().to_string().as_str())])
            )?;
        }

        Command::Clear => {
            state.api.clear().map_err(localize)?;
            writeln!(out, "{}", t("clear.done"))?;
        }
    }
    out.flush().context("stdout flush failed")?;
    Ok(())
}

fn default_export_path(format: ExportFormat) -> PathBuf {
    Path::new(EXPORT_FILE_NAME).with_extension(format.extension())
}

fn localize(err: ApiError) -> anyhow::Error {
    match err {
        ApiError::CorruptState(msg) => {
            anyhow!(t_with_args("state.corrupt", &[("message", msg.as_str())]))
        }
        ApiError::ImportError(msg) => {
            anyhow!(t_with_args("import.failed", &[("message", msg.as_str())]))
        }
        other => anyhow::Error::new(other),
    }
}

// ==========================================
// 渲染
// ==========================================

fn write_import_summary<W: Write>(out: &mut W, summary: &ImportSummary) -> Result<()> {
    if !summary.missing.is_empty() {
        writeln!(out, "{}", missing_headers_warning(&summary.missing))?;
    }
    writeln!(
        out,
        "{}",
        t_with_args(
            "import.done",
            &[
                ("count", summary.total_rows.to_string().as_str()),
                ("file", summary.file_name.as_str()),
                ("sheet", summary.sheet_name.as_str()),
            ],
        )
    )?;
    Ok(())
}

/// 把一页渲染为文本表格：过滤视图下标 + 九个规范字段（缺失为空）+ 分页页脚
pub fn render_page(window: &PageWindow<'_>) -> String {
    if window.is_empty() {
        return format!("{}\n", t("list.empty"));
    }

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(window.items.len() + 1);
    rows.push(
        std::iter::once("#".to_string())
            .chain(CanonicalField::ALL.iter().map(|f| f.label().to_string()))
            .collect(),
    );
    for (offset, record) in window.items.iter().enumerate() {
        rows.push(
            std::iter::once((window.start_index + offset).to_string())
                .chain(
                    CanonicalField::ALL
                        .iter()
                        .map(|f| record.get(*f).unwrap_or("").to_string()),
                )
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..rows[0].len())
        .map(|col| {
            rows.iter()
                .map(|r| r[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut text = String::new();
    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        text.push_str(cells.join(" | ").trim_end());
        text.push('\n');
    }
    text.push_str(&t_with_args(
        "list.footer",
        &[
            ("page", window.page.to_string().as_str()),
            ("pages", window.total_pages.to_string().as_str()),
            ("total", window.total_items.to_string().as_str()),
        ],
    ));
    text.push('\n');
    text
}

fn page_to_json(window: &PageWindow<'_>) -> Result<String> {
    let value = serde_json::json!({
        "page": window.page,
        "page_size": window.page_size,
        "total_pages": window.total_pages,
        "total_items": window.total_items,
        "start_index": window.start_index,
        "items": window.items,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;
    use crate::repository::MemoryBlobStore;
    use std::sync::Arc;

    fn state() -> AppState {
        let config = AppConfig {
            db_path: ":memory:".to_string(),
            locale: "es".to_string(),
        };
        AppState::with_store(config, Arc::new(MemoryBlobStore::new()))
    }

    #[test]
    fn test_cli_parses_edit() {
        let cli = Cli::try_parse_from([
            "inventario",
            "edit",
            "--usuario",
            "jperez",
            "3",
            "Nuevo texto",
        ])
        .unwrap();
        match cli.command {
            Command::Edit {
                filters,
                index,
                field,
                value,
            } => {
                assert_eq!(filters.usuario, "jperez");
                assert_eq!(index, 3);
                assert_eq!(field, CanonicalField::Descripcion);
                assert_eq!(value, "Nuevo texto");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_field_alias() {
        let cli = Cli::try_parse_from(["inventario", "edit", "--field", "serie", "0", "SN1"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Command::Edit {
                field: CanonicalField::NroSerie,
                ..
            }
        ));
        assert!(Cli::try_parse_from(["inventario", "edit", "--field", "precio", "0", "x"]).is_err());
    }

    #[test]
    fn test_render_page_columns() {
        let records: Vec<Record> = vec![[("codigo_patrimonial", "A1"), ("usuario", "U1")]
            .into_iter()
            .collect()];
        let window = PageWindow {
            page: 1,
            page_size: 30,
            total_pages: 1,
            total_items: 1,
            start_index: 0,
            items: records.iter().collect(),
        };

        let text = render_page(&window);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#"));
        assert!(lines[0].contains("Código Patrimonial"));
        assert!(lines[1].starts_with("0"));
        assert!(lines[1].contains("A1"));
        assert!(lines[1].contains("U1"));
    }

    #[tokio::test]
    async fn test_export_empty_is_reported() {
        let mut state = state();
        let mut out = Vec::new();
        let result = execute(
            &mut state,
            Command::Export {
                out: None,
                format: FormatArg::Xlsx,
            },
            &mut out,
        )
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_default_export_path() {
        assert_eq!(
            default_export_path(ExportFormat::Csv),
            PathBuf::from("inventario_sunarp_2026.csv")
        );
        assert_eq!(
            default_export_path(ExportFormat::Xlsx),
            PathBuf::from(EXPORT_FILE_NAME)
        );
    }
}
