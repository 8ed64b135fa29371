//! Synthetic Fallback Module
//!
//! スプレッドシートを開けなかった場合に使用する、決定的なサンプルデータを
//! 生成するモジュール。データの形はファイル名から推測します。

use crate::types::Table;

/// 生成するレコード数の下限
pub(crate) const MIN_RECORDS: usize = 3;

/// 生成するレコード数の上限
pub(crate) const MAX_RECORDS: usize = 100;

/// 1レコードあたりの入力バイト数の目安
const BYTES_PER_RECORD: usize = 100;

/// サンプルデータの形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SyntheticShape {
    /// id, name, email, department, salary
    Employee,
    /// id, name, category, price, stock
    Product,
    /// id, field1, field2, field3
    Generic,
}

/// ファイル名のキーワードと形の対応（先に一致したものが優先）
const SHAPE_KEYWORDS: &[(&[&str], SyntheticShape)] = &[
    (&["employee", "staff", "emp"], SyntheticShape::Employee),
    (&["product", "inventory", "item"], SyntheticShape::Product),
];

const EMPLOYEE_NAMES: [&str; 5] = [
    "John Doe",
    "Jane Smith",
    "Bob Johnson",
    "Alice Brown",
    "Charlie Wilson",
];

const DEPARTMENTS: [&str; 5] = ["Engineering", "Marketing", "Sales", "HR", "Finance"];

const PRODUCT_NAMES: [&str; 5] = ["Laptop", "Mouse", "Keyboard", "Monitor", "Headphones"];

const CATEGORIES: [&str; 5] = [
    "Electronics",
    "Accessories",
    "Computers",
    "Audio",
    "Peripherals",
];

impl SyntheticShape {
    /// ファイル名（拡張子なし）から形を選択
    ///
    /// 大文字・小文字を区別しない部分一致で判定します。
    pub fn for_stem(stem: &str) -> Self {
        let stem = stem.to_lowercase();
        SHAPE_KEYWORDS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|keyword| stem.contains(keyword)))
            .map(|(_, shape)| *shape)
            .unwrap_or(SyntheticShape::Generic)
    }

    /// 列名
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            SyntheticShape::Employee => &["id", "name", "email", "department", "salary"],
            SyntheticShape::Product => &["id", "name", "category", "price", "stock"],
            SyntheticShape::Generic => &["id", "field1", "field2", "field3"],
        }
    }

    /// `index`番目（0始まり）のレコード
    fn record(&self, index: usize) -> Vec<String> {
        let n = index + 1;
        match self {
            SyntheticShape::Employee => {
                let name = EMPLOYEE_NAMES[index % EMPLOYEE_NAMES.len()];
                let email = format!("{}{}@example.com", name.to_lowercase().replace(' ', "."), n);
                vec![
                    n.to_string(),
                    name.to_string(),
                    email,
                    DEPARTMENTS[index % DEPARTMENTS.len()].to_string(),
                    (50_000 + index * 1_000).to_string(),
                ]
            }
            SyntheticShape::Product => vec![
                n.to_string(),
                format!("{} {}", PRODUCT_NAMES[index % PRODUCT_NAMES.len()], n),
                CATEGORIES[index % CATEGORIES.len()].to_string(),
                (100 + index * 10).to_string(),
                (100 - (index as i64) * 2).to_string(),
            ],
            SyntheticShape::Generic => vec![
                n.to_string(),
                format!("Value {}-A", n),
                format!("Value {}-B", n),
                format!("Value {}-C", n),
            ],
        }
    }
}

/// 入力サイズから生成するレコード数を決める
pub(crate) fn record_count(byte_len: usize) -> usize {
    (byte_len / BYTES_PER_RECORD).clamp(MIN_RECORDS, MAX_RECORDS)
}

/// サンプルデータをテーブルとして生成
///
/// # 引数
///
/// * `stem` - 拡張子を除いたファイル名（形の選択に使用）
/// * `byte_len` - 入力ファイルのバイト数（レコード数の決定に使用）
pub(crate) fn generate(stem: &str, byte_len: usize) -> Table {
    let shape = SyntheticShape::for_stem(stem);
    let count = record_count(byte_len);

    tracing::debug!(?shape, records = count, "generating synthetic dataset");

    Table {
        headers: shape.headers().iter().map(|h| h.to_string()).collect(),
        rows: (0..count).map(|index| shape.record(index)).collect(),
    }
}
