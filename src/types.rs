//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

/// 抽出されたテーブル
///
/// 先頭行をヘッダー、それ以降をデータ行として保持します。
/// 各行は可変長（ragged）で、ヘッダーより短い行は末尾が空セル、
/// 長い行は余分なセルが無視されるものとして扱います。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Table {
    /// ヘッダー名（重複は許容）
    pub headers: Vec<String>,

    /// データ行
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// 抽出した全行（先頭行がヘッダー）からテーブルを構築
    pub fn from_records(mut records: Vec<Vec<String>>) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let headers = records.remove(0);
        Self {
            headers,
            rows: records,
        }
    }

    /// ヘッダーもデータ行も持たないかどうか
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// セルを1つ以上持つデータ行
    ///
    /// 空行（セル数0）はレコードにもINSERT文にもならないため除外します。
    pub fn data_rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| row.as_slice())
    }

    /// ヘッダー数に揃えた行のセル
    ///
    /// 足りない位置は空文字列、余分なセルは切り捨てます。
    pub fn aligned<'a>(&self, row: &'a [String]) -> impl Iterator<Item = &'a str> + 'a {
        let width = self.headers.len();
        (0..width).map(move |idx| row.get(idx).map(String::as_str).unwrap_or(""))
    }

    /// ヘッダー行を含むすべての行（CSV出力用）
    pub fn all_rows(&self) -> impl Iterator<Item = &[String]> {
        let header = if self.is_empty() {
            None
        } else {
            Some(self.headers.as_slice())
        };
        header
            .into_iter()
            .chain(self.rows.iter().map(|row| row.as_slice()))
    }
}
