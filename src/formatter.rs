//! Formatter Module
//!
//! スプレッドシートのセル値を表示用テキストに変換するモジュール。
//! 書式・数式・型情報はすべて平坦化され、テーブルには文字列のみが入ります。

use calamine::{Data, ExcelDateTime};
use chrono::{Duration, Timelike};

/// 日付・期間として扱うシリアル値の絶対値の上限（約27万年）
const MAX_SERIAL: f64 = 1.0e8;

/// セルフォーマッター
///
/// セル値のフォーマット処理のファサードとして機能します。
#[derive(Debug, Default)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// セル値を表示用テキストに変換
    ///
    /// | セル値 | 出力 |
    /// | ------ | ---- |
    /// | 文字列 | そのまま |
    /// | 整数・小数 | 最短表現（`30`, `2.5`） |
    /// | 論理値 | `TRUE` / `FALSE` |
    /// | エラー | エラーコード（`#DIV/0!`） |
    /// | 日付 | ISO 8601 |
    /// | 期間 | `[h]:mm:ss` |
    /// | 空 | 空文字列 |
    pub fn format_cell(&self, cell: &Data) -> String {
        match cell {
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => f.to_string(),
            Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            Data::Error(e) => e.to_string(),
            Data::DateTime(dt) => self
                .date_formatter
                .format(dt)
                .unwrap_or_else(|| dt.as_f64().to_string()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
            _ => String::new(),
        }
    }
}

/// 日付フォーマッター
///
/// calamineの`ExcelDateTime`を表示用テキストに変換します。
/// 1900年・1904年の日付システムの区別と、1900年うるう年バグの補正は
/// calamineに任せます。
#[derive(Debug, Default)]
pub(crate) struct DateFormatter;

impl DateFormatter {
    /// 日付・期間の値をフォーマット
    ///
    /// 日付は時刻部分がない場合は`%Y-%m-%d`、ある場合は`%Y-%m-%d %H:%M:%S`、
    /// 期間は通算時間で`[h]:mm:ss`（例: `36:00:00`）として出力します。
    /// 表現できない値の場合は`None`を返します。
    pub fn format(&self, value: &ExcelDateTime) -> Option<String> {
        let serial = value.as_f64();
        if !serial.is_finite() || serial.abs() > MAX_SERIAL {
            return None;
        }

        if value.is_duration() {
            return value.as_duration().map(format_duration);
        }

        let datetime = value.as_datetime()?;
        if datetime.num_seconds_from_midnight() == 0 {
            Some(datetime.format("%Y-%m-%d").to_string())
        } else {
            Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
        }
    }
}

/// 期間を通算時間の`[h]:mm:ss`形式に変換
fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3_600,
        total % 3_600 / 60,
        total % 60
    )
}
