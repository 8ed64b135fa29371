//! tabzero - Pure-Rust converter between CSV, Excel, JSON and SQL tabular encodings
//!
//! This crate converts a single source file (XLSX/XLS, CSV, JSON, SQL or an
//! unrecognized file) into JSON records, CSV text or a SQL script.
//! Spreadsheets and CSV files are extracted into a table whose first row is the
//! header; other sources are wrapped as a single opaque value.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Convert with default settings
//!     let json = tabzero::convert("people.csv", "json")?;
//!     std::fs::write("people.json", json)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! For content that is already in memory, use `convert_bytes`:
//!
//! ```rust,no_run
//! use tabzero::{ConverterBuilder, TargetFormat};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = ConverterBuilder::new().build()?;
//! let sql = converter.convert_bytes("people.csv", b"name,age\nAda,30\n", &TargetFormat::Sql)?;
//! assert!(String::from_utf8(sql)?.contains("CREATE TABLE people"));
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use tabzero::{ConverterBuilder, TargetFormat};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_delimiter(b';')              // semicolon separated CSV
//!         .with_synthetic_fallback(false)    // surface broken workbooks as errors
//!         .with_fallback_table_name("uploads")
//!         .build()?;
//!
//!     let csv = converter.convert_to_string("Book1.xlsx", &TargetFormat::Csv)?;
//!     println!("{}", csv);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Unrecognized Targets
//!
//! An unrecognized target label is not an error: the source bytes are returned
//! unchanged.
//!
//! ```rust,no_run
//! # fn main() -> Result<(), tabzero::ConvertError> {
//! let bytes = tabzero::convert("people.csv", "yaml")?;
//! assert_eq!(bytes, std::fs::read("people.csv")?);
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod formatter;
mod opaque;
mod output;
mod parser;
mod plan;
mod sanitize;
mod synthetic;
mod types;

use std::path::Path;

// 公開API
pub use api::{SourceKind, SpreadsheetKind, TargetFormat};
pub use builder::{Converter, ConverterBuilder};
pub use error::ConvertError;
pub use sanitize::{sanitize_identifier, DEFAULT_IDENTIFIER, DEFAULT_TABLE_NAME};

/// デフォルト設定でファイルを変換する
///
/// `target`は出力フォーマットのラベル（`"json"`, `"csv"`, `"sql"`）です。
/// それ以外のラベルでは入力のバイト列をそのまま返します。
pub fn convert<P: AsRef<Path>>(path: P, target: &str) -> Result<Vec<u8>, ConvertError> {
    Converter::default().convert(path, &TargetFormat::from_label(target))
}
