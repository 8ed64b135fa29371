//! tabzero: Convert a CSV, Excel, JSON or SQL file into another tabular encoding
//!
//! Usage:
//!   # Convert a CSV file to JSON records on stdout
//!   tabzero people.csv --to json
//!
//!   # Convert the first sheet of a workbook to a SQL script
//!   tabzero Book1.xlsx --to sql -o book1.sql
//!
//!   # Semicolon separated input, print a summary to stderr
//!   tabzero export.csv --to csv --delimiter ';' --report
//!
//! Logging is controlled with `RUST_LOG` (default: info) and written to stderr.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tabzero::{ConverterBuilder, SourceKind, TargetFormat};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "tabzero")]
#[command(version, about = "Convert between CSV, Excel, JSON and SQL", long_about = None)]
struct Args {
    /// Source file (format is detected from the extension)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Target format: json, csv or sql (anything else copies the input unchanged)
    #[arg(long = "to", value_name = "FORMAT")]
    target: TargetFormat,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// CSV field delimiter for reading and writing
    #[arg(long, value_name = "CHAR", default_value_t = ',')]
    delimiter: char,

    /// Fail on unreadable spreadsheets instead of emitting sample data
    #[arg(long)]
    no_fallback: bool,

    /// Print a JSON summary of the conversion to stderr
    #[arg(long)]
    report: bool,
}

/// 変換結果のサマリー
#[derive(Serialize, Debug)]
struct Report {
    message: String,
    source_file: String,
    source_format: String,
    target_format: String,
    result_file: Option<String>,
}

/// サマリーのメッセージ
///
/// 認識できないフォーマットでは、入力がそのままコピーされたことを示します。
fn report_message(source_file: &str, source_format: &str, target: &TargetFormat) -> String {
    if target.is_recognized() {
        format!(
            "File {} converted from {} to {}",
            source_file, source_format, target
        )
    } else {
        format!(
            "File {} copied unchanged (unrecognized target format '{}')",
            source_file, target
        )
    }
}

/// ログの初期化（`RUST_LOG`で制御、出力先は標準エラー）
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let delimiter = match u8::try_from(args.delimiter) {
        Ok(byte) => byte,
        Err(_) => bail!("Delimiter must be a single ASCII character: {:?}", args.delimiter),
    };

    let converter = ConverterBuilder::new()
        .with_delimiter(delimiter)
        .with_synthetic_fallback(!args.no_fallback)
        .build()
        .context("Invalid converter configuration")?;

    let converted = converter
        .convert(&args.input, &args.target)
        .with_context(|| format!("Failed to convert {}", args.input.display()))?;

    match &args.output {
        Some(path) => std::fs::write(path, &converted)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&converted)
                .and_then(|_| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }

    if args.report {
        let source_file = args
            .input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| args.input.display().to_string());
        let source_format = SourceKind::from_path(&args.input).to_string();

        let report = Report {
            message: report_message(&source_file, &source_format, &args.target),
            source_file,
            source_format,
            target_format: args.target.to_string(),
            result_file: args.output.as_ref().map(|path| path.display().to_string()),
        };
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_message_for_recognized_target() {
        assert_eq!(
            report_message("people.csv", "csv", &TargetFormat::Json),
            "File people.csv converted from csv to json"
        );
    }

    #[test]
    fn test_report_message_for_unrecognized_target() {
        let target = TargetFormat::from_label("yaml");
        assert_eq!(
            report_message("people.csv", "csv", &target),
            "File people.csv copied unchanged (unrecognized target format 'yaml')"
        );
    }

    #[test]
    fn test_args_parse_target_and_delimiter() {
        let args = Args::parse_from(["tabzero", "in.csv", "--to", "sql", "--delimiter", ";"]);
        assert_eq!(args.target, TargetFormat::Sql);
        assert_eq!(args.delimiter, ';');
        assert!(!args.no_fallback);
    }
}
