//! Cleaning Transforms Module
//!
//! 日付正規化と同じテーブルモデルを共有する単純な変換群。
//! 余分な空白の除去と、指定列のゼロ化を提供します。

use crate::types::{CellValue, Table};

/// 全セルの前後空白を除去し、空セルを空テキストに置き換える
///
/// # 引数
///
/// * `table` - 入力テーブル
///
/// # 戻り値
///
/// テキストセルをトリムし、空セルを空テキストへ置き換えた新しい
/// テーブル。数値・日時セルは不変です。
pub fn clean(table: &Table) -> Table {
    let columns = table.column_count();
    let rows: Vec<Vec<CellValue>> = table
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    CellValue::Text(s) => CellValue::Text(s.trim().to_string()),
                    CellValue::Empty => CellValue::Text(String::new()),
                    other => other.clone(),
                })
                .collect()
        })
        .collect();

    Table::from_rectangular(rows, columns)
}

/// ヘッダー名で指定された列のデータセルをすべて数値0にする
///
/// 先頭行をヘッダー行として名前照合に使用します（ヘッダー自体は
/// 変更されません）。指定名がヘッダーに見つからない場合、その名前は
/// 黙ってスキップされます。
///
/// # 引数
///
/// * `table` - 入力テーブル
/// * `headers` - ゼロ化する列のヘッダー名リスト
///
/// # 戻り値
///
/// 該当列の2行目以降をすべて`Number(0.0)`にした新しいテーブル
pub fn zero_columns(table: &Table, headers: &[&str]) -> Table {
    let columns = table.column_count();
    let mut rows: Vec<Vec<CellValue>> = table.rows().map(<[CellValue]>::to_vec).collect();

    // ヘッダー行から対象列のインデックスを解決
    let targets: Vec<usize> = match rows.first() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .filter(|(_, cell)| {
                cell.as_text()
                    .map(|name| headers.contains(&name))
                    .unwrap_or(false)
            })
            .map(|(idx, _)| idx)
            .collect(),
        None => Vec::new(),
    };

    for row in rows.iter_mut().skip(1) {
        for &col in &targets {
            row[col] = CellValue::Number(0.0);
        }
    }

    Table::from_rectangular(rows, columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_clean_trims_text_cells() {
        let table = Table::new(vec![vec![text("  padded  "), text("ok")]]);
        let cleaned = clean(&table);

        assert_eq!(cleaned.cell(0, 0), Some(&text("padded")));
        assert_eq!(cleaned.cell(0, 1), Some(&text("ok")));
    }

    #[test]
    fn test_clean_replaces_empty_with_empty_text() {
        let table = Table::new(vec![vec![CellValue::Empty, CellValue::Number(5.0)]]);
        let cleaned = clean(&table);

        assert_eq!(cleaned.cell(0, 0), Some(&text("")));
        // 数値は不変
        assert_eq!(cleaned.cell(0, 1), Some(&CellValue::Number(5.0)));
    }

    #[test]
    fn test_clean_preserves_shape() {
        let table = Table::new(vec![
            vec![text(" a "), text("b")],
            vec![text("c"), CellValue::Empty],
        ]);
        let cleaned = clean(&table);

        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(cleaned.column_count(), 2);
    }

    #[test]
    fn test_zero_columns_by_header_name() {
        let table = Table::new(vec![
            vec![text("Name"), text("Charges"), text("Payable")],
            vec![text("Alice"), CellValue::Number(120.0), CellValue::Number(80.0)],
            vec![text("Bob"), CellValue::Number(45.5), text("n/a")],
        ]);

        let zeroed = zero_columns(&table, &["Charges", "Payable"]);

        // ヘッダー行は不変
        assert_eq!(zeroed.cell(0, 1), Some(&text("Charges")));
        // データ行はゼロ化
        assert_eq!(zeroed.cell(1, 1), Some(&CellValue::Number(0.0)));
        assert_eq!(zeroed.cell(2, 1), Some(&CellValue::Number(0.0)));
        assert_eq!(zeroed.cell(1, 2), Some(&CellValue::Number(0.0)));
        assert_eq!(zeroed.cell(2, 2), Some(&CellValue::Number(0.0)));
        // 無関係の列は不変
        assert_eq!(zeroed.cell(1, 0), Some(&text("Alice")));
    }

    #[test]
    fn test_zero_columns_missing_header_is_skipped() {
        let table = Table::new(vec![
            vec![text("Name"), text("Amount")],
            vec![text("Alice"), CellValue::Number(10.0)],
        ]);

        let zeroed = zero_columns(&table, &["Nonexistent", "Amount"]);

        assert_eq!(zeroed.cell(1, 1), Some(&CellValue::Number(0.0)));
        assert_eq!(zeroed.cell(1, 0), Some(&text("Alice")));
    }

    #[test]
    fn test_zero_columns_empty_table() {
        let table = Table::new(vec![]);
        let zeroed = zero_columns(&table, &["Amount"]);
        assert_eq!(zeroed.row_count(), 0);
    }
}
