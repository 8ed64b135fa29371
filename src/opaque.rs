//! Opaque Adapter Module
//!
//! JSON・SQL・未知の拡張子の入力を、テーブルに分解せず1つの値として
//! 各出力フォーマットに包むモジュール。

use serde_json::{Map, Value};

use crate::api::SourceKind;
use crate::error::ConvertError;
use crate::output::write_records;

/// 分解しない入力の包み方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpaqueWrap {
    /// 1列のCSV（ヘッダー + 改行を平坦化した1行）
    Delimited,
    /// 要素1つのJSON配列
    Records,
    /// SQLコメント
    Relational,
}

/// 分解しない入力を包むアダプター
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpaqueAdapter {
    /// 入力ファイルの種類
    source: SourceKind,
}

impl OpaqueAdapter {
    pub fn new(source: SourceKind) -> Self {
        Self { source }
    }

    /// CSVヘッダー・JSONキーとして使うフィールド名
    pub fn field_label(&self) -> &'static str {
        match self.source {
            SourceKind::RelationalScript => "sql_content",
            _ => "content",
        }
    }

    /// 入力全体を指定の形式で包む
    ///
    /// 入力はUTF-8として解釈します（不正なバイト列は置換文字になります）。
    pub fn wrap(
        &self,
        content: &[u8],
        wrap: OpaqueWrap,
        delimiter: u8,
    ) -> Result<Vec<u8>, ConvertError> {
        let text = String::from_utf8_lossy(content);

        match wrap {
            OpaqueWrap::Delimited => {
                let rows = [
                    vec![self.field_label().to_string()],
                    vec![flatten_line_breaks(&text)],
                ];
                let mut output = Vec::new();
                write_records(rows.iter().map(Vec::as_slice), delimiter, &mut output)?;
                Ok(output)
            }
            OpaqueWrap::Records => {
                let mut record = Map::new();
                record.insert(self.field_label().to_string(), Value::String(text.into_owned()));
                let records = Value::Array(vec![Value::Object(record)]);
                Ok(serde_json::to_vec_pretty(&records)?)
            }
            OpaqueWrap::Relational => {
                let script = match self.source {
                    SourceKind::StructuredArray => format!("-- JSON Content:\n{}", text),
                    _ => format!("-- File content:\n/*\n{}\n*/", text),
                };
                Ok(script.into_bytes())
            }
        }
    }
}

/// 改行（`\r\n`, `\n`, `\r`）をそれぞれ空白1つに置き換える
fn flatten_line_breaks(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
