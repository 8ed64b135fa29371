//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use serde_json::{Map, Value};
use std::io::Write;

use crate::error::ConvertError;
use crate::sanitize::sanitize_identifier;
use crate::types::Table;

/// JSON形式のフォーマッター
///
/// データ行ごとに、ヘッダー名をキーとするオブジェクトを出力します。
/// 値はすべて文字列で、型推論は行いません。
pub(crate) struct RecordsFormatter;

impl RecordsFormatter {
    pub(crate) fn render<W: Write>(&self, table: &Table, writer: &mut W) -> Result<(), ConvertError> {
        let records: Vec<Value> = table
            .data_rows()
            .map(|row| Value::Object(to_record(table, row)))
            .collect();

        serde_json::to_writer_pretty(&mut *writer, &records).map_err(|e| {
            if e.is_io() {
                ConvertError::write(e)
            } else {
                ConvertError::Serialize(e)
            }
        })?;
        writer.flush().map_err(ConvertError::write)?;

        Ok(())
    }
}

/// 1行をレコードに変換
///
/// キーの順序はヘッダーの並び順です。ヘッダーが重複する場合は
/// 最初の位置に後の列の値が入ります。
fn to_record(table: &Table, row: &[String]) -> Map<String, Value> {
    let mut record = Map::new();
    for (header, value) in table.headers.iter().zip(table.aligned(row)) {
        record.insert(header.clone(), Value::String(value.to_string()));
    }
    record
}

/// SQL形式のフォーマッター
///
/// CREATE TABLE文と、データ行ごとのINSERT文を出力します。
/// 列はすべて`TEXT`型で、値はすべて文字列リテラルとして出力します。
pub(crate) struct RelationalFormatter;

impl RelationalFormatter {
    pub(crate) fn render<W: Write>(
        &self,
        table: &Table,
        table_name: &str,
        writer: &mut W,
    ) -> Result<(), ConvertError> {
        let script = self.to_script(table, table_name);
        writer
            .write_all(script.as_bytes())
            .map_err(ConvertError::write)?;
        writer.flush().map_err(ConvertError::write)?;
        Ok(())
    }

    /// SQLスクリプトを文字列として生成
    ///
    /// データ行がない場合は空文字列を返します。
    pub fn to_script(&self, table: &Table, table_name: &str) -> String {
        let rows: Vec<&[String]> = table.data_rows().collect();
        if rows.is_empty() {
            return String::new();
        }

        let columns: Vec<String> = table
            .headers
            .iter()
            .map(|header| sanitize_identifier(header))
            .collect();
        let column_list = columns.join(", ");

        let mut script = String::new();

        // 1. コメントヘッダー
        script.push_str(&format!(
            "-- Converted from data to table '{}'\n",
            table_name
        ));
        script.push_str(&format!("-- Columns: {}\n\n", table.headers.join(", ")));

        // 2. CREATE TABLE
        let definitions: Vec<String> = columns.iter().map(|col| format!("{} TEXT", col)).collect();
        script.push_str(&format!(
            "CREATE TABLE {} ({});\n\n",
            table_name,
            definitions.join(", ")
        ));

        // 3. INSERT
        script.push_str(&format!("-- Inserting {} rows\n", rows.len()));
        let statements: Vec<String> = rows
            .iter()
            .map(|row| {
                let values: Vec<String> = table.aligned(row).map(quote_literal).collect();
                format!(
                    "INSERT INTO {} ({}) VALUES ({})",
                    table_name,
                    column_list,
                    values.join(",")
                )
            })
            .collect();
        script.push_str(&statements.join(";\n"));
        script.push(';');

        script
    }
}

/// 文字列リテラルとしてクォート
///
/// 内部のシングルクォートは2つに重ねます。それ以外のエスケープは行いません。
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// CSV形式のフォーマッター
///
/// ヘッダー行を含むすべての行を、そのままの順序で出力します。
/// 区切り文字・クォート・改行を含むフィールドはクォートされます。
pub(crate) struct DelimitedFormatter {
    /// フィールド区切り文字
    pub delimiter: u8,
}

impl DelimitedFormatter {
    pub(crate) fn render<W: Write>(&self, table: &Table, writer: &mut W) -> Result<(), ConvertError> {
        write_records(table.all_rows(), self.delimiter, writer)
    }
}

/// 行のリストをCSVとして書き込む
///
/// 行ごとのフィールド数は揃っていなくても構いません。
pub(crate) fn write_records<'a, I, W>(
    rows: I,
    delimiter: u8,
    writer: &mut W,
) -> Result<(), ConvertError>
where
    I: IntoIterator<Item = &'a [String]>,
    W: Write,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(writer);

    for row in rows {
        csv_writer.write_record(row).map_err(ConvertError::write)?;
    }
    csv_writer.flush().map_err(ConvertError::write)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(records: &[&[&str]]) -> Table {
        Table::from_records(
            records
                .iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn render_json(table: &Table) -> String {
        let mut output = Vec::new();
        RecordsFormatter.render(table, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn render_csv(table: &Table) -> String {
        let mut output = Vec::new();
        DelimitedFormatter { delimiter: b',' }
            .render(table, &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_records_keep_header_order() {
        let t = table(&[&["name", "age"], &["Ada", "30"], &["Grace"]]);
        let json = render_json(&t);

        assert_eq!(
            json,
            "[\n  {\n    \"name\": \"Ada\",\n    \"age\": \"30\"\n  },\n  {\n    \"name\": \"Grace\",\n    \"age\": \"\"\n  }\n]"
        );
    }

    #[test]
    fn test_records_empty() {
        assert_eq!(render_json(&table(&[&["name", "age"]])), "[]");
        assert_eq!(render_json(&Table::default()), "[]");
    }

    #[test]
    fn test_records_duplicate_headers_later_wins() {
        let t = table(&[&["id", "id", "x"], &["1", "2", "3"]]);
        let value: Value = serde_json::from_str(&render_json(&t)).unwrap();
        let record = value[0].as_object().unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record["id"], "2");
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["id", "x"]);
    }

    #[test]
    fn test_records_skip_empty_rows_and_drop_extra_cells() {
        let t = table(&[&["a"], &[], &["1", "extra"]]);
        let value: Value = serde_json::from_str(&render_json(&t)).unwrap();

        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0], serde_json::json!({"a": "1"}));
    }

    #[test]
    fn test_relational_script() {
        let t = table(&[&["name", "age"], &["Ada", "30"], &["Grace", ""]]);
        let sql = RelationalFormatter.to_script(&t, "people");

        assert_eq!(
            sql,
            "-- Converted from data to table 'people'\n\
             -- Columns: name, age\n\
             \n\
             CREATE TABLE people (name TEXT, age TEXT);\n\
             \n\
             -- Inserting 2 rows\n\
             INSERT INTO people (name, age) VALUES ('Ada','30');\n\
             INSERT INTO people (name, age) VALUES ('Grace','');"
        );
    }

    #[test]
    fn test_relational_sanitizes_columns_but_keeps_original_in_comment() {
        let t = table(&[&["first name", "e-mail", ""], &["Ada", "a@x", "?"]]);
        let sql = RelationalFormatter.to_script(&t, "t");

        assert!(sql.contains("-- Columns: first name, e-mail, \n"));
        assert!(sql.contains("CREATE TABLE t (first_name TEXT, e_mail TEXT, column TEXT);"));
        assert!(sql.contains("INSERT INTO t (first_name, e_mail, column) VALUES ('Ada','a@x','?');"));
    }

    #[test]
    fn test_relational_escapes_quotes() {
        let t = table(&[&["name"], &["O'Brien"]]);
        let sql = RelationalFormatter.to_script(&t, "t");
        assert!(sql.contains("VALUES ('O''Brien');"));
    }

    #[test]
    fn test_relational_pads_and_truncates_rows() {
        let t = table(&[&["a", "b"], &["1"], &["1", "2", "3"]]);
        let sql = RelationalFormatter.to_script(&t, "t");

        assert!(sql.contains("VALUES ('1','');"));
        assert!(sql.contains("VALUES ('1','2');"));
        assert!(!sql.contains("'3'"));
    }

    #[test]
    fn test_relational_empty_without_data_rows() {
        assert_eq!(RelationalFormatter.to_script(&table(&[&["a", "b"]]), "t"), "");
        assert_eq!(RelationalFormatter.to_script(&Table::default(), "t"), "");
    }

    #[test]
    fn test_relational_is_deterministic() {
        let t = table(&[&["k", "v"], &["1", "x"], &["2", "y"]]);
        assert_eq!(
            RelationalFormatter.to_script(&t, "t"),
            RelationalFormatter.to_script(&t, "t")
        );
    }

    #[test]
    fn test_delimited_round_trip_quoting() {
        let t = table(&[&["name", "note"], &["Ada", "a, b"], &["Grace", "say \"hi\""], &["x"]]);
        assert_eq!(
            render_csv(&t),
            "name,note\nAda,\"a, b\"\nGrace,\"say \"\"hi\"\"\"\nx\n"
        );
    }

    #[test]
    fn test_delimited_empty_table() {
        assert_eq!(render_csv(&Table::default()), "");
    }

    #[test]
    fn test_delimited_header_only() {
        assert_eq!(render_csv(&table(&[&["a", "b"]])), "a,b\n");
    }

    /// 書き込みに常に失敗するライター
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("sink closed"))
        }
    }

    #[test]
    fn test_write_failures_are_write_errors() {
        let t = table(&[&["a"], &["1"]]);

        let csv = DelimitedFormatter { delimiter: b',' }.render(&t, &mut FailingWriter);
        assert!(matches!(csv, Err(ConvertError::Write(_))));

        let sql = RelationalFormatter.render(&t, "t", &mut FailingWriter);
        assert!(matches!(sql, Err(ConvertError::Write(_))));

        let json = RecordsFormatter.render(&t, &mut FailingWriter);
        assert!(matches!(json, Err(ConvertError::Write(_))));
    }
}
