//! Spreadsheet Writer Module
//!
//! rust_xlsxwriterを使用したテーブルのシリアライズ実装。
//! 指定列には明示的なテキスト書式を適用し、出力ファイルを開いた
//! ビューアが数値や日付として再解釈するのを防ぎます。

use rust_xlsxwriter::{Format, Workbook};
use std::collections::BTreeSet;

use crate::error::XlsxNormError;
use crate::types::{CellValue, Table};

/// テーブルをXLSXバイト列へシリアライズする
///
/// # 引数
///
/// * `table` - 書き出すテーブル
/// * `force_text_columns` - テキスト書式（`@`）を強制する列インデックスの集合
///
/// # 戻り値
///
/// * `Ok(Vec<u8>)` - 生成されたXLSXファイルのバイト列
/// * `Err(XlsxNormError::Write)` - シリアライズに失敗した場合
///
/// # セルの書き出し規則
///
/// - テキスト → 文字列セル（対象列ではテキスト書式付き）
/// - 数値 → 数値セル（対象列では文字列として書き出し）
/// - ネイティブ日時 → `yyyy-mm-dd hh:mm`書式の日時セル
/// - 空セル → 書き出しなし（対象列では空文字列）
pub(crate) fn write_table(
    table: &Table,
    force_text_columns: &BTreeSet<usize>,
) -> Result<Vec<u8>, XlsxNormError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let text_format = Format::new().set_num_format("@");
    let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm");

    for (row_idx, row) in table.rows().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let row = u32::try_from(row_idx)
                .map_err(|_| XlsxNormError::Config(format!("Row {} exceeds XLSX limits", row_idx)))?;
            let col = u16::try_from(col_idx)
                .map_err(|_| XlsxNormError::Config(format!("Column {} exceeds XLSX limits", col_idx)))?;
            let force_text = force_text_columns.contains(&col_idx);

            match cell {
                CellValue::Empty => {
                    if force_text {
                        worksheet.write_string_with_format(row, col, "", &text_format)?;
                    }
                }
                CellValue::Text(s) => {
                    if force_text {
                        worksheet.write_string_with_format(row, col, s, &text_format)?;
                    } else {
                        worksheet.write_string(row, col, s)?;
                    }
                }
                CellValue::Number(n) => {
                    if force_text {
                        worksheet.write_string_with_format(
                            row,
                            col,
                            &cell.as_raw_string(),
                            &text_format,
                        )?;
                    } else {
                        worksheet.write_number(row, col, *n)?;
                    }
                }
                CellValue::DateTime(dt) => {
                    if force_text {
                        worksheet.write_string_with_format(
                            row,
                            col,
                            &cell.as_raw_string(),
                            &text_format,
                        )?;
                    } else {
                        worksheet.write_datetime_with_format(row, col, dt, &datetime_format)?;
                    }
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
