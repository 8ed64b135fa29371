//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。
//! 入力ファイルの種類（拡張子から判定）と出力フォーマット（ラベルから判定）を表します。

use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::sanitize::split_file_name;

/// スプレッドシートの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpreadsheetKind {
    /// Office Open XML形式（`.xlsx`）
    Xlsx,

    /// 旧来のバイナリ形式（`.xls`）
    Xls,
}

/// 入力ファイルの種類
///
/// 入力ファイルの拡張子（大文字小文字を区別しない）から判定します。
/// 実際の中身の検証は行いません。
///
/// | 拡張子 | 種類 |
/// | ------ | ---- |
/// | `.xlsx` / `.xls` | `Spreadsheet` |
/// | `.csv` | `Delimited` |
/// | `.json` | `StructuredArray` |
/// | `.sql` | `RelationalScript` |
/// | その他・拡張子なし | `Unknown` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// スプレッドシート（先頭シートをテーブルとして抽出）
    Spreadsheet(SpreadsheetKind),

    /// CSVテキスト（テーブルとして抽出）
    Delimited,

    /// JSONテキスト（分解せずに1つの値として扱う）
    StructuredArray,

    /// SQLスクリプト（分解せずに1つの値として扱う）
    RelationalScript,

    /// 認識できない拡張子
    Unknown,
}

impl SourceKind {
    /// ファイルパスの拡張子から種類を判定する
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use tabzero::{SourceKind, SpreadsheetKind};
    ///
    /// assert_eq!(SourceKind::from_path("data/Report.XLSX"),
    ///            SourceKind::Spreadsheet(SpreadsheetKind::Xlsx));
    /// assert_eq!(SourceKind::from_path("notes.txt"), SourceKind::Unknown);
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let (_, extension) = split_file_name(path.as_ref());
        let extension = extension.map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("xlsx") => SourceKind::Spreadsheet(SpreadsheetKind::Xlsx),
            Some("xls") => SourceKind::Spreadsheet(SpreadsheetKind::Xls),
            Some("csv") => SourceKind::Delimited,
            Some("json") => SourceKind::StructuredArray,
            Some("sql") => SourceKind::RelationalScript,
            _ => SourceKind::Unknown,
        }
    }

    /// 種類を表す短いラベル（ログやレポート用）
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Spreadsheet(SpreadsheetKind::Xlsx) => "xlsx",
            SourceKind::Spreadsheet(SpreadsheetKind::Xls) => "xls",
            SourceKind::Delimited => "csv",
            SourceKind::StructuredArray => "json",
            SourceKind::RelationalScript => "sql",
            SourceKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 出力フォーマット
///
/// 変換先のフォーマットをラベル（`"json"`, `"csv"`, `"sql"`）で指定します。
/// 認識できないラベルはエラーにならず、入力をそのまま返す恒等変換になります。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    /// JSON配列（各行をヘッダー名をキーとするオブジェクトとして出力）
    ///
    /// # 出力例
    ///
    /// ```json
    /// [
    ///   {
    ///     "name": "Ada",
    ///     "age": "30"
    ///   }
    /// ]
    /// ```
    Json,

    /// CSV形式
    ///
    /// # 出力例
    ///
    /// ```csv
    /// name,age
    /// Ada,30
    /// ```
    Csv,

    /// SQLスクリプト（CREATE TABLE + INSERT文）
    ///
    /// # 出力例
    ///
    /// ```sql
    /// CREATE TABLE people (name TEXT, age TEXT);
    ///
    /// -- Inserting 1 rows
    /// INSERT INTO people (name, age) VALUES ('Ada','30');
    /// ```
    Sql,

    /// 認識できないラベル（恒等変換）
    Other(String),
}

impl TargetFormat {
    /// ラベルから出力フォーマットを判定する
    ///
    /// ラベルは完全一致で比較します（`"JSON"`は`Other`になります）。
    pub fn from_label(label: &str) -> Self {
        match label {
            "json" => TargetFormat::Json,
            "csv" => TargetFormat::Csv,
            "sql" => TargetFormat::Sql,
            other => TargetFormat::Other(other.to_string()),
        }
    }

    /// フォーマットのラベル
    pub fn label(&self) -> &str {
        match self {
            TargetFormat::Json => "json",
            TargetFormat::Csv => "csv",
            TargetFormat::Sql => "sql",
            TargetFormat::Other(label) => label,
        }
    }

    /// 出力ファイルに付ける拡張子
    ///
    /// 認識できないフォーマットでは`None`を返します
    /// （入力ファイルの拡張子を引き継ぐのが適切なため）。
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            TargetFormat::Json => Some("json"),
            TargetFormat::Csv => Some("csv"),
            TargetFormat::Sql => Some("sql"),
            TargetFormat::Other(_) => None,
        }
    }

    /// 認識済みのフォーマットかどうか
    pub fn is_recognized(&self) -> bool {
        !matches!(self, TargetFormat::Other(_))
    }
}

impl FromStr for TargetFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TargetFormat::from_label(s))
    }
}

impl From<&str> for TargetFormat {
    fn from(label: &str) -> Self {
        TargetFormat::from_label(label)
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
