//! Spreadsheet Reader Module
//!
//! calamineを使用したスプレッドシート読み込みの実装。
//! 選択されたシートをテーブルモデルへ変換します。

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDateTime;
use std::io::{Cursor, Read, Seek};

use crate::api::SheetSelector;
use crate::error::XlsxNormError;
use crate::types::{CellValue, Table};

/// 読み込み時の制限設定
///
/// 入力ファイルサイズの上限を定義します。上限を超える入力は
/// 解析前に拒否されます。
#[derive(Debug, Clone)]
pub(crate) struct ReadOptions {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_size: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_input_size: 2_147_483_648, // 2GB
        }
    }
}

/// リーダーから選択シートを読み込み、テーブルへ変換する
///
/// # 引数
///
/// * `reader` - Excelファイルを読み込むためのリーダー（Read + Seekトレイトを実装）
/// * `selector` - ロード対象シートの選択方式
/// * `options` - 読み込み制限設定
///
/// # 戻り値
///
/// * `Ok(Table)` - 読み込みに成功した場合
/// * `Err(XlsxNormError::Read)` - スプレッドシートとして解析できない場合
/// * `Err(XlsxNormError::Config)` - 指定シートが存在しない、または
///   サイズ上限を超えた場合
pub(crate) fn load_table<R: Read + Seek>(
    mut reader: R,
    selector: &SheetSelector,
    options: &ReadOptions,
) -> Result<Table, XlsxNormError> {
    // 1. 入力全体をメモリに読み込み、サイズ上限を適用
    let mut buffer = Vec::new();
    let bytes_read = reader.read_to_end(&mut buffer)?;

    if bytes_read as u64 > options.max_input_size {
        return Err(XlsxNormError::Config(format!(
            "Input file size exceeds maximum: {} bytes (max: {} bytes)",
            bytes_read, options.max_input_size
        )));
    }

    // 2. calamineでワークブックを開く（形式は自動判別）
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;

    // 3. シート選択を解決
    let sheet_names = workbook.sheet_names();
    let sheet_name = resolve_sheet(selector, &sheet_names)?;

    // 4. シートの使用範囲をテーブルへ変換
    let range = workbook.worksheet_range(&sheet_name)?;
    let rows: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    Ok(Table::new(rows))
}

/// シート選択方式をシート名に解決
fn resolve_sheet(
    selector: &SheetSelector,
    sheet_names: &[String],
) -> Result<String, XlsxNormError> {
    match selector {
        SheetSelector::First => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| XlsxNormError::Config("Workbook contains no sheets".to_string())),

        SheetSelector::Index(index) => sheet_names.get(*index).cloned().ok_or_else(|| {
            XlsxNormError::Config(format!(
                "Sheet index {} is out of range (total: {})",
                index,
                sheet_names.len()
            ))
        }),

        SheetSelector::Name(name) => {
            if sheet_names.iter().any(|n| n == name) {
                Ok(name.clone())
            } else {
                Err(XlsxNormError::Config(format!(
                    "Sheet '{}' not found (available: {})",
                    name,
                    sheet_names.join(", ")
                )))
            }
        }
    }
}

/// calamineのセルデータをセル値へ変換
///
/// ネイティブ日時はセルの格納型を保ったまま`DateTime`として取り込み、
/// 自由テキストとの型差を維持します。論理値・エラー値はテキストとして
/// 描画します。
fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::DateTime(naive),
            // 変換できないシリアル値は数値のまま保持
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(naive) => CellValue::DateTime(naive),
            Err(_) => CellValue::Text(s.clone()),
        },
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_sheet_first() {
        let names = vec!["Alpha".to_string(), "Beta".to_string()];
        assert_eq!(
            resolve_sheet(&SheetSelector::First, &names).unwrap(),
            "Alpha"
        );
    }

    #[test]
    fn test_resolve_sheet_first_empty_workbook() {
        let result = resolve_sheet(&SheetSelector::First, &[]);
        assert!(matches!(result, Err(XlsxNormError::Config(_))));
    }

    #[test]
    fn test_resolve_sheet_by_index() {
        let names = vec!["Alpha".to_string(), "Beta".to_string()];
        assert_eq!(
            resolve_sheet(&SheetSelector::Index(1), &names).unwrap(),
            "Beta"
        );

        let result = resolve_sheet(&SheetSelector::Index(5), &names);
        match result {
            Err(XlsxNormError::Config(msg)) => assert!(msg.contains("out of range")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_resolve_sheet_by_name() {
        let names = vec!["Alpha".to_string(), "Beta".to_string()];
        assert_eq!(
            resolve_sheet(&SheetSelector::Name("Beta".to_string()), &names).unwrap(),
            "Beta"
        );

        let result = resolve_sheet(&SheetSelector::Name("Gamma".to_string()), &names);
        match result {
            Err(XlsxNormError::Config(msg)) => assert!(msg.contains("Gamma")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_convert_cell_basic_values() {
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
        assert_eq!(
            convert_cell(&Data::String("hi".to_string())),
            CellValue::Text("hi".to_string())
        );
        assert_eq!(convert_cell(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(convert_cell(&Data::Float(1.5)), CellValue::Number(1.5));
        assert_eq!(
            convert_cell(&Data::Bool(true)),
            CellValue::Text("TRUE".to_string())
        );
    }

    #[test]
    fn test_convert_cell_iso_datetime() {
        let cell = convert_cell(&Data::DateTimeIso("2024-06-05T14:30:00".to_string()));
        match cell {
            CellValue::DateTime(dt) => {
                assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-06-05 14:30");
            }
            _ => panic!("Expected DateTime cell"),
        }
    }

    #[test]
    fn test_load_table_rejects_garbage_input() {
        let garbage = b"this is not a spreadsheet".to_vec();
        let result = load_table(
            Cursor::new(garbage),
            &SheetSelector::First,
            &ReadOptions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_table_rejects_oversized_input() {
        let options = ReadOptions { max_input_size: 8 };
        let bytes = vec![0u8; 64];
        let result = load_table(Cursor::new(bytes), &SheetSelector::First, &options);

        match result {
            Err(XlsxNormError::Config(msg)) => assert!(msg.contains("exceeds maximum")),
            _ => panic!("Expected Config error"),
        }
    }
}
