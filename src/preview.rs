//! Preview Rendering Module
//!
//! セッションの現在テーブルをユーザー向けプレビューとして描画する
//! モジュール。Markdown・JSON・CSVの各形式をサポートします。

use std::io::Write;
use unicode_width::UnicodeWidthStr;

use crate::api::PreviewFormat;
use crate::error::XlsxNormError;
use crate::types::{CellValue, Table};

/// テーブルを指定フォーマットでライターへ描画する
///
/// # 引数
///
/// * `table` - 描画対象のテーブル
/// * `format` - プレビュー形式
/// * `writer` - 出力先のライター（Writeトレイトを実装）
pub(crate) fn render<W: Write>(
    table: &Table,
    format: PreviewFormat,
    writer: &mut W,
) -> Result<(), XlsxNormError> {
    match format {
        PreviewFormat::Markdown => render_markdown(table, writer),
        PreviewFormat::Json => render_json(table, writer),
        PreviewFormat::Csv => render_csv(table, writer),
    }
}

/// セルのプレビュー表示文字列
fn display_text(cell: &CellValue) -> String {
    cell.as_raw_string()
}

/// Markdownテーブルとして描画
///
/// 先頭行をヘッダー行として区切り線を挿入します。列幅は表示幅
/// （全角文字は2、半角文字は1）に基づいて揃えられます。
fn render_markdown<W: Write>(table: &Table, writer: &mut W) -> Result<(), XlsxNormError> {
    if table.row_count() == 0 || table.column_count() == 0 {
        return Ok(());
    }

    // 1. 列幅の計算（表示幅ベース、最小3）
    let mut col_widths = vec![3usize; table.column_count()];
    for row in table.rows() {
        for (col_idx, cell) in row.iter().enumerate() {
            let width = display_text(cell).trim().width();
            if width > col_widths[col_idx] {
                col_widths[col_idx] = width;
            }
        }
    }

    // 2. 各行の出力
    for (row_idx, row) in table.rows().enumerate() {
        write!(writer, "|")?;
        for (col_idx, cell) in row.iter().enumerate() {
            let content = display_text(cell);
            let trimmed = content.trim();
            let content_width = trimmed.width();

            write!(writer, " {}", trimmed)?;
            for _ in content_width..col_widths[col_idx] {
                write!(writer, " ")?;
            }
            write!(writer, " |")?;
        }
        writeln!(writer)?;

        // 最初の行の後に区切り行を挿入
        if row_idx == 0 {
            write!(writer, "|")?;
            for width in &col_widths {
                write!(writer, " {} |", "-".repeat(*width))?;
            }
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// JSON形式として描画
///
/// 各行をExcel列名（A, B, C, ...)をキーとするオブジェクトとして
/// 表現します。
fn render_json<W: Write>(table: &Table, writer: &mut W) -> Result<(), XlsxNormError> {
    use serde_json::json;

    if table.row_count() == 0 || table.column_count() == 0 {
        writeln!(writer, "{{}}")?;
        return Ok(());
    }

    let column_names: Vec<String> = (0..table.column_count())
        .map(|col| col_to_letter(col as u32))
        .collect();

    let json_rows: Vec<serde_json::Value> = table
        .rows()
        .map(|row| {
            let mut row_obj = serde_json::Map::new();
            for (col_idx, cell) in row.iter().enumerate() {
                row_obj.insert(column_names[col_idx].clone(), json!(display_text(cell)));
            }
            json!(row_obj)
        })
        .collect();

    let json_output = json!({ "rows": json_rows });

    serde_json::to_writer_pretty(&mut *writer, &json_output)
        .map_err(|e| XlsxNormError::Config(format!("JSON serialization error: {}", e)))?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// CSV形式として描画
fn render_csv<W: Write>(table: &Table, writer: &mut W) -> Result<(), XlsxNormError> {
    for row in table.rows() {
        let mut first = true;
        for cell in row {
            if !first {
                write!(writer, ",")?;
            }
            first = false;
            write!(writer, "{}", escape_csv(&display_text(cell)))?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// 列インデックスをExcel列名（A, B, C, ...）に変換
fn col_to_letter(mut col: u32) -> String {
    let mut result = String::new();
    loop {
        result.push((b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    result.chars().rev().collect()
}

/// CSV文字列をエスケープ
///
/// ダブルクォート、改行、カンマを含む場合はダブルクォートで囲み、
/// 内部のダブルクォートは2つにエスケープします。
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn render_string(table: &Table, format: PreviewFormat) -> String {
        let mut buffer = Vec::new();
        render(table, format, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_render_markdown_basic() {
        let table = Table::new(vec![
            vec![text("Visit"), text("Name")],
            vec![text("2024-06-05 14:30"), text("Alice")],
        ]);

        let output = render_string(&table, PreviewFormat::Markdown);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("| Visit"));
        assert!(lines[1].starts_with("| ---"));
        assert!(lines[2].contains("| 2024-06-05 14:30 |"));
    }

    #[test]
    fn test_render_markdown_empty_table() {
        let table = Table::new(vec![]);
        let output = render_string(&table, PreviewFormat::Markdown);
        assert!(output.is_empty());
    }

    #[test]
    fn test_render_json_structure() {
        let table = Table::new(vec![
            vec![text("Visit"), CellValue::Number(2.0)],
            vec![CellValue::Empty, text("Alice")],
        ]);

        let output = render_string(&table, PreviewFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let rows = parsed["rows"].as_array().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["A"], "Visit");
        assert_eq!(rows[0]["B"], "2");
        assert_eq!(rows[1]["A"], "");
        assert_eq!(rows[1]["B"], "Alice");
    }

    #[test]
    fn test_render_csv_with_escaping() {
        let table = Table::new(vec![
            vec![text("plain"), text("has,comma")],
            vec![text("has \"quote\""), text("ok")],
        ]);

        let output = render_string(&table, PreviewFormat::Csv);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "plain,\"has,comma\"");
        assert_eq!(lines[1], "\"has \"\"quote\"\"\",ok");
    }

    #[test]
    fn test_col_to_letter() {
        assert_eq!(col_to_letter(0), "A");
        assert_eq!(col_to_letter(25), "Z");
        assert_eq!(col_to_letter(26), "AA");
        assert_eq!(col_to_letter(701), "ZZ");
    }
}
