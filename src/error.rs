//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// tabzeroクレート全体で使用するエラー型
///
/// 変換処理の各段階（読み込み、解析、出力）で発生する失敗を
/// カテゴリごとに1つのバリアントで表現します。
///
/// # エラーの種類
///
/// - `Read`: 入力ファイルの読み込みに失敗
/// - `Open`: スプレッドシートのコンテナを開けない（通常はフォールバックで回復）
/// - `NoSheets`: ワークブックにシートが1つもない
/// - `Sheet`: 先頭シートのセル読み込みに失敗
/// - `Parse`: CSVの解析に失敗
/// - `Serialize`: JSONのシリアライズに失敗
/// - `Write`: 出力先への書き込みに失敗
/// - `Config`: ビルダー設定の検証に失敗
///
/// # 使用例
///
/// ```rust,no_run
/// use tabzero::ConvertError;
///
/// match tabzero::convert("missing.csv", "json") {
///     Err(ConvertError::Read(e)) => eprintln!("読み込み失敗: {}", e),
///     Err(e) => eprintln!("{}", e),
///     Ok(bytes) => println!("{} bytes", bytes.len()),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 入力ファイルの読み込み中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("failed to read source file: {0}")]
    Read(#[from] std::io::Error),

    /// スプレッドシートのコンテナを開けなかったエラー
    ///
    /// 合成データへのフォールバックが有効な場合は呼び出し元に返りません。
    #[error("failed to open spreadsheet: {0}")]
    Open(calamine::Error),

    /// ワークブックにシートが含まれていない
    #[error("spreadsheet has no sheets")]
    NoSheets,

    /// 先頭シートの行を読み込めなかったエラー
    #[error("failed to read spreadsheet rows: {0}")]
    Sheet(calamine::Error),

    /// CSVの解析エラー（不正なクォートなど）
    #[error("failed to parse CSV at line {line}: {message}")]
    Parse {
        /// エラーが検出された行番号（1始まり）
        line: u64,
        /// エラーの詳細メッセージ
        message: String,
    },

    /// JSONのシリアライズエラー
    #[error("failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    /// 出力先への書き込みエラー
    #[error("failed to write output: {0}")]
    Write(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use tabzero::{ConverterBuilder, ConvertError};
    ///
    /// let result = ConverterBuilder::new().with_delimiter(b'"').build();
    ///
    /// match result {
    ///     Err(ConvertError::Config(msg)) => println!("設定エラー: {}", msg),
    ///     _ => {}
    /// }
    /// ```
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<csv::Error> for ConvertError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|pos| pos.line()).unwrap_or(0);
        ConvertError::Parse {
            line,
            message: err.to_string(),
        }
    }
}

impl ConvertError {
    /// 書き込み系のI/Oエラーを`Write`に変換する
    ///
    /// `From<std::io::Error>`は読み込み側（`Read`）に割り当てているため、
    /// 出力時のエラーはこのヘルパーで明示的に変換します。
    pub(crate) fn write(err: impl std::fmt::Display) -> Self {
        ConvertError::Write(err.to_string())
    }
}
