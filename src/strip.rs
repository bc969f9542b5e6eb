//! Time Stripper Module
//!
//! 指定列の各セルから時刻成分を取り除くモジュール。
//! ネイティブ日時値と自由テキストの両方を処理し、列全体を
//! テキスト型へ強制します。

use crate::error::XlsxNormError;
use crate::recognize::is_canonical_date_time;
use crate::types::{CellValue, Table};

/// 指定列の全セルから時刻成分を除去したテーブルを返す
///
/// コピーオンライト: 入力テーブルは変更せず、更新済みの複製を
/// 返します。呼び出し側は除去前のテーブルを保持し続けられます。
///
/// # 引数
///
/// * `table` - 入力テーブル
/// * `column` - 対象列のインデックス（0始まり）
///
/// # 戻り値
///
/// * `Ok(Table)` - 対象列を処理した新しいテーブル
/// * `Err(XlsxNormError::ColumnOutOfRange)` - 列インデックスが範囲外
///
/// # セル単位の規則（優先順）
///
/// 1. 空セル、またはトリムすると空になるテキスト → 空テキスト
/// 2. ネイティブ日時値 → `YYYY-MM-DD`のテキスト（時刻と格納型を失う）
/// 3. 正規形`YYYY-MM-DD HH:MM`のテキスト → 最初の空白より前の部分
///    （正規化済みの`日付 空白 時刻`形のみが対象で、汎用の日付
///    パーサーではありません。空白を含む任意のテキストは対象外）
/// 4. それ以外の値 → 内容は不変
///
/// # 事後条件
///
/// 対象列のすべての値はテキスト型に強制されます（変更されない数値も
/// 文字列化されます）。スプレッドシートビューアによる数値・日付の
/// 再解釈を防ぐための意図的な処理です。
///
/// # 冪等性
///
/// 除去済みの列に再適用しても結果は変わりません（時刻成分を持つ
/// 値が既に存在しないため）。
pub fn strip_time(table: &Table, column: usize) -> Result<Table, XlsxNormError> {
    if column >= table.column_count() {
        return Err(XlsxNormError::ColumnOutOfRange {
            index: column,
            columns: table.column_count(),
        });
    }

    let columns = table.column_count();
    let mut rows: Vec<Vec<CellValue>> = table.rows().map(<[CellValue]>::to_vec).collect();
    for row in &mut rows {
        let stripped = strip_cell(&row[column]);
        row[column] = stripped;
    }

    Ok(Table::from_rectangular(rows, columns))
}

/// 単一セルへの時刻除去規則の適用
fn strip_cell(cell: &CellValue) -> CellValue {
    match cell {
        // 1. 空セル・空白のみのテキスト → 空テキスト
        CellValue::Empty => CellValue::Text(String::new()),
        CellValue::Text(s) if s.trim().is_empty() => CellValue::Text(String::new()),

        // 2. ネイティブ日時値 → 日付のみのテキスト
        CellValue::DateTime(dt) => CellValue::Text(dt.format("%Y-%m-%d").to_string()),

        // 3. 正規形の日時テキスト → 最初の空白より前
        CellValue::Text(s) if is_canonical_date_time(s) => {
            let date_part = s.split(' ').next().unwrap_or(s);
            CellValue::Text(date_part.to_string())
        }

        // 4. それ以外 → 内容は不変、ただしテキスト型へ強制
        other => CellValue::Text(other.as_raw_string()),
    }
}
