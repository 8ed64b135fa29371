//! Workbook Parser
//!
//! calamineを使用したスプレッドシートの読み込み。
//! 先頭シートのみを対象とし、すべてのセルを表示用テキストに平坦化します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::{Read, Seek};

use crate::error::ConvertError;
use crate::formatter::CellFormatter;

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブックレベルの操作を提供します。
/// XLSX/XLSなどの形式は中身から自動判定されます。
pub(crate) struct WorkbookParser<R: Read + Seek + Clone> {
    /// calamineのワークブック
    workbook: Sheets<R>,
}

impl<R: Read + Seek + Clone> WorkbookParser<R> {
    /// ワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - コンテナとして開けた場合
    /// * `Err(ConvertError::Open)` - スプレッドシートとして認識できない、または破損している場合
    pub fn open(reader: R) -> Result<Self, ConvertError> {
        let workbook = open_workbook_auto_from_rs(reader).map_err(ConvertError::Open)?;
        Ok(Self { workbook })
    }

    /// すべてのシート名を取得（ワークブック内の並び順）
    pub fn get_sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// 先頭シートの全行を表示用テキストとして抽出
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<Vec<String>>)` - 行ごとのセル（末尾の空セルは除去済み）
    /// * `Err(ConvertError::NoSheets)` - シートが1つもない場合
    /// * `Err(ConvertError::Sheet)` - シートのセルを読み込めなかった場合
    pub fn read_first_sheet(&mut self) -> Result<Vec<Vec<String>>, ConvertError> {
        let sheet_names = self.get_sheet_names();
        let sheet_name = select_first_sheet(&sheet_names)?;

        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(ConvertError::Sheet)?;

        tracing::debug!(sheet = sheet_name, "reading first worksheet");
        Ok(range_to_rows(&range, &CellFormatter::new()))
    }
}

/// シート一覧から先頭シートを選択
///
/// シートが1つもない場合は`NoSheets`を返します。
pub(crate) fn select_first_sheet(sheet_names: &[String]) -> Result<&str, ConvertError> {
    sheet_names
        .first()
        .map(String::as_str)
        .ok_or(ConvertError::NoSheets)
}

/// セル範囲を行のリストに変換
///
/// calamineの範囲は最初の使用セルから始まるため、A1からの位置を保つように
/// 先頭の空行・空列を補います。各行の末尾の空セルは除去します。
pub(crate) fn range_to_rows(range: &Range<Data>, formatter: &CellFormatter) -> Vec<Vec<String>> {
    let (start_row, start_col) = match range.start() {
        Some(start) => start,
        None => return Vec::new(),
    };

    let mut rows: Vec<Vec<String>> = (0..start_row).map(|_| Vec::new()).collect();

    for row in range.rows() {
        let mut cells: Vec<String> = (0..start_col).map(|_| String::new()).collect();
        cells.extend(row.iter().map(|cell| formatter.format_cell(cell)));

        while cells.last().is_some_and(|cell| cell.is_empty()) {
            cells.pop();
        }
        rows.push(cells);
    }

    rows
}
