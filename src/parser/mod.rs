//! Parser Module
//!
//! 表形式の入力（スプレッドシート、CSV）をメモリ上の行データに読み込みます。

mod delimited;
mod workbook;

pub(crate) use delimited::DelimitedParser;
pub(crate) use workbook::WorkbookParser;
