//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::io::Cursor;
use std::path::Path;

use crate::api::{SourceKind, TargetFormat};
use crate::error::ConvertError;
use crate::opaque::OpaqueAdapter;
use crate::parser::{DelimitedParser, WorkbookParser};
use crate::plan::ConversionPlan;
use crate::sanitize::{file_stem, sanitize_identifier, table_name_for, DEFAULT_TABLE_NAME};
use crate::synthetic;
use crate::types::Table;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConversionConfig {
    /// CSVの読み書きで使用する区切り文字
    pub delimiter: u8,

    /// スプレッドシートを開けない場合に合成データへフォールバックするか
    pub synthetic_fallback: bool,

    /// ファイル名からテーブル名を導出できない場合のテーブル名
    pub fallback_table_name: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            synthetic_fallback: true,
            fallback_table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use tabzero::ConverterBuilder;
///
/// # fn main() -> Result<(), tabzero::ConvertError> {
/// let converter = ConverterBuilder::new()
///     .with_delimiter(b';')
///     .with_synthetic_fallback(false)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 区切り文字: `,`
    /// - 合成データへのフォールバック: 有効
    /// - フォールバック時のテーブル名: `imported_data`
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// CSVの区切り文字を指定する
    ///
    /// CSV入力の解析とCSV出力の両方に適用されます。
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use tabzero::ConverterBuilder;
    ///
    /// let builder = ConverterBuilder::new().with_delimiter(b'\t');
    /// ```
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// スプレッドシートを開けない場合の合成データへのフォールバックを切り替える
    ///
    /// # 引数
    ///
    /// * `enabled: bool`:
    ///   * `true`: ファイル名から推測した形のサンプルデータを出力する（デフォルト）
    ///   * `false`: `ConvertError::Open`を返す
    pub fn with_synthetic_fallback(mut self, enabled: bool) -> Self {
        self.config.synthetic_fallback = enabled;
        self
    }

    /// ファイル名からテーブル名を導出できない場合のテーブル名を指定する
    ///
    /// 正規化が不要なSQL識別子である必要があります（`build()`時に検証）。
    pub fn with_fallback_table_name(mut self, name: impl Into<String>) -> Self {
        self.config.fallback_table_name = name.into();
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Converter)` - 設定が有効な場合
    /// * `Err(ConvertError::Config)` - 設定が無効な場合
    ///
    /// # エラー
    ///
    /// - 区切り文字が`"`・`\n`・`\r`、または非ASCII文字の場合
    /// - フォールバック時のテーブル名が空、または正規化が必要な場合
    pub fn build(self) -> Result<Converter, ConvertError> {
        // 1. 区切り文字の検証
        let delimiter = self.config.delimiter;
        if !delimiter.is_ascii() || matches!(delimiter, b'"' | b'\n' | b'\r') {
            return Err(ConvertError::Config(format!(
                "Invalid delimiter: {:?}",
                delimiter as char
            )));
        }

        // 2. フォールバック時のテーブル名の検証
        let name = &self.config.fallback_table_name;
        if name.is_empty() {
            return Err(ConvertError::Config(
                "Fallback table name must not be empty".to_string(),
            ));
        }
        if sanitize_identifier(name) != *name {
            return Err(ConvertError::Config(format!(
                "Fallback table name is not a valid identifier: '{}'",
                name
            )));
        }

        // 3. Converterインスタンス生成
        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// 入力ファイルを指定されたフォーマットに変換するためのメインエントリーポイントです。
/// 構築後は不変で、複数スレッドから同時に使用できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use tabzero::{ConverterBuilder, TargetFormat};
///
/// # fn main() -> Result<(), tabzero::ConvertError> {
/// let converter = ConverterBuilder::new().build()?;
/// let json = converter.convert("people.csv", &TargetFormat::Json)?;
/// std::fs::write("people.json", json)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    /// 変換設定（不変）
    config: ConversionConfig,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// ファイルを読み込み、指定されたフォーマットに変換する
    ///
    /// # 引数
    ///
    /// * `path` - 入力ファイルのパス（拡張子から入力の種類を判定）
    /// * `target` - 出力フォーマット
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - 変換結果のバイト列
    /// * `Err(ConvertError::Read)` - ファイルを読み込めなかった場合
    /// * `Err(ConvertError)` - 変換に失敗した場合
    pub fn convert<P: AsRef<Path>>(
        &self,
        path: P,
        target: &TargetFormat,
    ) -> Result<Vec<u8>, ConvertError> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        self.convert_bytes(path, &content, target)
    }

    /// メモリ上の内容を、指定されたフォーマットに変換する
    ///
    /// `file_name`は入力の種類の判定とテーブル名の導出にのみ使用し、
    /// ファイルシステムにはアクセスしません。
    pub fn convert_bytes<P: AsRef<Path>>(
        &self,
        file_name: P,
        content: &[u8],
        target: &TargetFormat,
    ) -> Result<Vec<u8>, ConvertError> {
        let file_name = file_name.as_ref();
        let source = SourceKind::from_path(file_name);
        let plan = ConversionPlan::select(source, target);

        tracing::debug!(
            file = %file_name.display(),
            %source,
            %target,
            ?plan,
            "selected conversion plan"
        );

        let output = match plan {
            ConversionPlan::Tabular(formatter) => {
                let table = self.extract_table(source, file_name, content)?;
                let table_name = table_name_for(file_name, &self.config.fallback_table_name);

                let mut output = Vec::new();
                formatter.render(&table, &table_name, self.config.delimiter, &mut output)?;
                output
            }
            ConversionPlan::Opaque(wrap) => {
                OpaqueAdapter::new(source).wrap(content, wrap, self.config.delimiter)?
            }
            ConversionPlan::Passthrough => content.to_vec(),
        };

        tracing::info!(
            file = %file_name.display(),
            %source,
            %target,
            bytes = output.len(),
            "conversion completed"
        );

        Ok(output)
    }

    /// 変換結果を文字列として取得する
    ///
    /// 変換結果がUTF-8として不正な場合（恒等変換したバイナリなど）は
    /// `ConvertError::Write`を返します。
    pub fn convert_to_string<P: AsRef<Path>>(
        &self,
        path: P,
        target: &TargetFormat,
    ) -> Result<String, ConvertError> {
        let bytes = self.convert(path, target)?;
        String::from_utf8(bytes).map_err(ConvertError::write)
    }

    /// 表形式の入力からテーブルを抽出
    fn extract_table(
        &self,
        source: SourceKind,
        file_name: &Path,
        content: &[u8],
    ) -> Result<Table, ConvertError> {
        let records = match source {
            SourceKind::Spreadsheet(_) => match WorkbookParser::open(Cursor::new(content)) {
                Ok(mut parser) => parser.read_first_sheet()?,
                Err(ConvertError::Open(err)) if self.config.synthetic_fallback => {
                    tracing::warn!(
                        file = %file_name.display(),
                        error = %err,
                        "spreadsheet could not be opened, falling back to synthetic data"
                    );
                    return Ok(synthetic::generate(&file_stem(file_name), content.len()));
                }
                Err(e) => return Err(e),
            },
            _ => DelimitedParser::new(self.config.delimiter).parse(content)?,
        };

        tracing::debug!(records = records.len(), "extracted tabular source");
        Ok(Table::from_records(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_builder_new() {
        let builder = ConverterBuilder::new();
        assert_eq!(builder.config.delimiter, b',');
        assert!(builder.config.synthetic_fallback);
        assert_eq!(builder.config.fallback_table_name, "imported_data");
    }

    #[test]
    fn test_builder_method_chaining() {
        let builder = ConverterBuilder::new()
            .with_delimiter(b';')
            .with_synthetic_fallback(false)
            .with_fallback_table_name("uploads");

        assert_eq!(builder.config.delimiter, b';');
        assert!(!builder.config.synthetic_fallback);
        assert_eq!(builder.config.fallback_table_name, "uploads");
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_build_success() {
        let result = ConverterBuilder::new().build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_with_invalid_delimiter() {
        for delimiter in [b'"', b'\n', b'\r', 0xE9] {
            match ConverterBuilder::new().with_delimiter(delimiter).build() {
                Err(ConvertError::Config(msg)) => assert!(msg.contains("Invalid delimiter")),
                other => panic!("Expected Config error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_build_with_tab_delimiter() {
        assert!(ConverterBuilder::new().with_delimiter(b'\t').build().is_ok());
    }

    #[test]
    fn test_build_with_empty_fallback_table_name() {
        match ConverterBuilder::new().with_fallback_table_name("").build() {
            Err(ConvertError::Config(msg)) => assert!(msg.contains("must not be empty")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_build_with_unsanitized_fallback_table_name() {
        match ConverterBuilder::new()
            .with_fallback_table_name("my table")
            .build()
        {
            Err(ConvertError::Config(msg)) => assert!(msg.contains("my table")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_converter_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Converter>();
    }

    #[test]
    fn test_convert_bytes_delimited_to_json() {
        let converter = Converter::default();
        let output = converter
            .convert_bytes("people.csv", b"name,age\nAda,30\n", &TargetFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value, serde_json::json!([{"name": "Ada", "age": "30"}]));
    }

    #[test]
    fn test_convert_bytes_uses_file_stem_as_table_name() {
        let converter = Converter::default();
        let output = converter
            .convert_bytes("sales data.csv", b"id\n1\n", &TargetFormat::Sql)
            .unwrap();
        let sql = String::from_utf8(output).unwrap();
        assert!(sql.contains("CREATE TABLE sales_data (id TEXT);"));
    }

    #[test]
    fn test_convert_bytes_uses_fallback_table_name_for_empty_stem() {
        let converter = ConverterBuilder::new()
            .with_fallback_table_name("uploads")
            .build()
            .unwrap();
        let output = converter
            .convert_bytes(".csv", b"id\n1\n", &TargetFormat::Sql)
            .unwrap();
        let sql = String::from_utf8(output).unwrap();
        assert!(sql.contains("CREATE TABLE uploads (id TEXT);"));
    }

    #[test]
    fn test_convert_bytes_custom_delimiter_round_trip() {
        let converter = ConverterBuilder::new().with_delimiter(b';').build().unwrap();
        let output = converter
            .convert_bytes("a.csv", b"x;y\n1,5;2\n", &TargetFormat::Csv)
            .unwrap();
        assert_eq!(output, b"x;y\n1,5;2\n");
    }

    #[test]
    fn test_corrupt_spreadsheet_falls_back_to_synthetic_data() {
        let converter = Converter::default();
        let content = vec![b'x'; 450];
        let output = converter
            .convert_bytes("employees_q1.xlsx", &content, &TargetFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let records = value.as_array().unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0]["email"], "john.doe1@example.com");
    }

    #[test]
    fn test_corrupt_spreadsheet_without_fallback() {
        let converter = ConverterBuilder::new()
            .with_synthetic_fallback(false)
            .build()
            .unwrap();
        let result = converter.convert_bytes("report.xlsx", b"not a workbook", &TargetFormat::Csv);
        assert!(matches!(result, Err(ConvertError::Open(_))));
    }

    #[test]
    fn test_malformed_csv_is_parse_error() {
        let converter = Converter::default();
        let result = converter.convert_bytes("bad.csv", b"a,b\n\"open,1\n", &TargetFormat::Json);
        assert!(matches!(result, Err(ConvertError::Parse { .. })));
    }

    #[test]
    fn test_passthrough_returns_original_bytes() {
        let converter = Converter::default();
        let content = b"\x00\x01binary";
        let output = converter
            .convert_bytes("blob.bin", content, &TargetFormat::from_label("xml"))
            .unwrap();
        assert_eq!(output, content);
    }

    #[test]
    fn test_convert_missing_file_is_read_error() {
        let converter = Converter::default();
        let result = converter.convert("definitely/missing/file.csv", &TargetFormat::Json);
        assert!(matches!(result, Err(ConvertError::Read(_))));
    }
}
