//! Delimited Parser
//!
//! `csv`クレートを使用したCSVテキストの読み込み。
//! `csv`クレートはクォートの不整合を寛容に扱うため、読み込み前に
//! クォート構造を検証し、不正な入力を`Parse`エラーとして扱います。

use csv::ReaderBuilder;

use crate::error::ConvertError;

/// CSVパーサー
#[derive(Debug, Clone, Copy)]
pub(crate) struct DelimitedParser {
    /// フィールド区切り文字
    delimiter: u8,
}

impl DelimitedParser {
    /// 区切り文字を指定してパーサーを生成
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// CSVテキスト全体を解析し、すべての行を返す
    ///
    /// 行ごとのフィールド数は揃っていなくても構いません。空行は読み飛ばします。
    /// UTF-8として不正なバイト列は置換文字（U+FFFD）になります。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<Vec<String>>)` - 先頭行（ヘッダー）を含むすべての行
    /// * `Err(ConvertError::Parse)` - クォートが不正な場合
    pub fn parse(&self, content: &[u8]) -> Result<Vec<Vec<String>>, ConvertError> {
        let text = String::from_utf8_lossy(content);
        validate_quoting(text.as_bytes(), self.delimiter)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            records.push(record.iter().map(str::to_string).collect());
        }

        tracing::debug!(records = records.len(), "parsed delimited source");
        Ok(records)
    }
}

/// クォート構造の検証状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    /// フィールドの先頭
    FieldStart,
    /// クォートなしフィールドの途中
    Unquoted,
    /// クォート付きフィールドの途中
    Quoted,
    /// クォート付きフィールド内で`"`を読んだ直後
    QuoteInQuoted,
}

/// RFC 4180に沿ってクォートの使い方を検証する
///
/// 以下を不正とします。
///
/// - クォートなしフィールド内の`"`
/// - 閉じクォートの直後に区切り文字・改行以外が続く
/// - 閉じられていないクォート
fn validate_quoting(content: &[u8], delimiter: u8) -> Result<(), ConvertError> {
    let mut state = QuoteState::FieldStart;
    let mut line: u64 = 1;
    let mut quote_line: u64 = 1;

    let malformed = |line: u64, message: &str| ConvertError::Parse {
        line,
        message: message.to_string(),
    };

    for &byte in content {
        state = match (state, byte) {
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, b'\n') => {
                line += 1;
                QuoteState::Quoted
            }
            (QuoteState::Quoted, _) => QuoteState::Quoted,

            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,

            (_, b'\n') => {
                line += 1;
                QuoteState::FieldStart
            }
            (_, b'\r') => QuoteState::FieldStart,
            (_, b) if b == delimiter => QuoteState::FieldStart,

            (QuoteState::FieldStart, b'"') => {
                quote_line = line;
                QuoteState::Quoted
            }
            (QuoteState::FieldStart, _) => QuoteState::Unquoted,

            (QuoteState::Unquoted, b'"') => {
                return Err(malformed(line, "bare \" in non-quoted field"));
            }
            (QuoteState::Unquoted, _) => QuoteState::Unquoted,

            (QuoteState::QuoteInQuoted, _) => {
                return Err(malformed(line, "extraneous \" in quoted field"));
            }
        };
    }

    if state == QuoteState::Quoted {
        return Err(malformed(quote_line, "unterminated quoted field"));
    }

    Ok(())
}
