//! Identifier Sanitizer Module
//!
//! 任意の文字列をSQL識別子として使える形に正規化するモジュール。
//! 置換対象は空白・ハイフン・ピリオドのみで、予約語や先頭の数字、
//! 非ASCII文字はそのまま通します。

use std::path::Path;

/// 識別子が空になった場合のプレースホルダー
pub const DEFAULT_IDENTIFIER: &str = "column";

/// ファイル名からテーブル名を導出できない場合のテーブル名
pub const DEFAULT_TABLE_NAME: &str = "imported_data";

/// 文字列をSQL識別子に正規化する
///
/// # 使用例
///
/// ```rust
/// use tabzero::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("My Col-1.x"), "My_Col_1_x");
/// assert_eq!(sanitize_identifier(""), "column");
/// ```
pub fn sanitize_identifier(name: &str) -> String {
    if name.is_empty() {
        return DEFAULT_IDENTIFIER.to_string();
    }
    name.chars()
        .map(|c| match c {
            ' ' | '-' | '.' => '_',
            other => other,
        })
        .collect()
}

/// 入力ファイルのパスからテーブル名を導出する
///
/// 最後の拡張子を除いたファイル名を正規化します。
/// ファイル名が空の場合は`fallback`を使用します。
pub(crate) fn table_name_for(path: &Path, fallback: &str) -> String {
    match file_stem(path) {
        stem if stem.is_empty() => fallback.to_string(),
        stem => sanitize_identifier(&stem),
    }
}

/// 最後の拡張子を除いたファイル名
pub(crate) fn file_stem(path: &Path) -> String {
    split_file_name(path).0
}

/// ファイル名を最後の`.`で名前と拡張子に分割する
///
/// `Path::file_stem`と異なり、`.csv`のようなドットで始まるファイル名も
/// 空の名前と拡張子`csv`に分割します。
pub(crate) fn split_file_name(path: &Path) -> (String, Option<String>) {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match name.rfind('.') {
        Some(idx) => (name[..idx].to_string(), Some(name[idx + 1..].to_string())),
        None => (name, None),
    }
}
