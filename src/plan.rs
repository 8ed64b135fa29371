//! Conversion Plan Module
//!
//! 入力の種類と出力フォーマットの組み合わせから、変換の進め方を決定する。

use crate::api::{SourceKind, TargetFormat};
use crate::opaque::OpaqueWrap;
use crate::output::OutputFormatter;

/// 変換の進め方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConversionPlan {
    /// テーブルとして抽出し、フォーマッターで出力する
    Tabular(OutputFormatter),

    /// 分解せずに1つの値として包む
    Opaque(OpaqueWrap),

    /// 入力のバイト列をそのまま返す
    Passthrough,
}

impl ConversionPlan {
    /// 入力の種類と出力フォーマットから変換の進め方を決定する
    ///
    /// | 入力 | JSON | CSV | SQL | その他 |
    /// | ---- | ---- | --- | --- | ------ |
    /// | スプレッドシート・CSV | Tabular | Tabular | Tabular | Passthrough |
    /// | JSON | Passthrough | Opaque | Opaque | Passthrough |
    /// | SQL | Opaque | Opaque | Passthrough | Passthrough |
    /// | 不明 | Opaque | Opaque | Opaque | Passthrough |
    pub fn select(source: SourceKind, target: &TargetFormat) -> Self {
        let Some(formatter) = OutputFormatter::from_format(target) else {
            return ConversionPlan::Passthrough;
        };

        match (source, formatter) {
            (SourceKind::Spreadsheet(_) | SourceKind::Delimited, formatter) => {
                ConversionPlan::Tabular(formatter)
            }
            (SourceKind::StructuredArray, OutputFormatter::Records) => ConversionPlan::Passthrough,
            (SourceKind::RelationalScript, OutputFormatter::Relational) => {
                ConversionPlan::Passthrough
            }
            (_, OutputFormatter::Records) => ConversionPlan::Opaque(OpaqueWrap::Records),
            (_, OutputFormatter::Delimited) => ConversionPlan::Opaque(OpaqueWrap::Delimited),
            (_, OutputFormatter::Relational) => ConversionPlan::Opaque(OpaqueWrap::Relational),
        }
    }
}
