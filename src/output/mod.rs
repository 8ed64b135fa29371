//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod formatters;

use crate::api::TargetFormat;
use crate::error::ConvertError;
use crate::types::Table;
use std::io::Write;

pub(crate) use formatters::*;

/// 出力フォーマッター（Strategy Pattern）
///
/// テーブルを出力できる各フォーマット（JSON, CSV, SQL）をenumとして表現します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormatter {
    Records,
    Delimited,
    Relational,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    ///
    /// テーブルとして出力できないフォーマットの場合は`None`を返します。
    pub fn from_format(format: &TargetFormat) -> Option<Self> {
        match format {
            TargetFormat::Json => Some(OutputFormatter::Records),
            TargetFormat::Csv => Some(OutputFormatter::Delimited),
            TargetFormat::Sql => Some(OutputFormatter::Relational),
            TargetFormat::Other(_) => None,
        }
    }

    /// テーブルを指定されたフォーマットで出力する
    ///
    /// # 引数
    ///
    /// * `table` - 出力するテーブル
    /// * `table_name` - SQL出力で使用するテーブル名（正規化済み）
    /// * `delimiter` - CSV出力で使用する区切り文字
    /// * `writer` - 出力先のライター
    pub fn render<W: Write>(
        &self,
        table: &Table,
        table_name: &str,
        delimiter: u8,
        writer: &mut W,
    ) -> Result<(), ConvertError> {
        match self {
            OutputFormatter::Records => RecordsFormatter.render(table, writer),
            OutputFormatter::Delimited => DelimitedFormatter { delimiter }.render(table, writer),
            OutputFormatter::Relational => RelationalFormatter.render(table, table_name, writer),
        }
    }
}
