//! Table Normalizer Module
//!
//! テーブル全体へ日付認識を適用するモジュール。
//! セル間の依存が無い純粋な写像のため、rayonで行単位に並列化します。

use rayon::prelude::*;

use crate::error::XlsxNormError;
use crate::recognize::{is_canonical_date_time, recognize};
use crate::types::{CellValue, Table};

/// テーブルの全セルに日付認識を適用し、正規化済みテーブルを返す
///
/// # 引数
///
/// * `table` - 入力テーブル
///
/// # 戻り値
///
/// 各セルを`recognize`に通した新しいテーブル。行数・列数は入力と
/// 完全に一致します（セル内容のみ変化）。
///
/// # 並列化
///
/// セル間に依存が無いため、行単位でrayonにより並列処理されます。
pub fn normalize(table: &Table) -> Table {
    let columns = table.column_count();
    let rows: Vec<Vec<CellValue>> = table
        .rows()
        .collect::<Vec<_>>()
        .par_iter()
        .map(|row| row.iter().map(recognize).collect())
        .collect();

    Table::from_rectangular(rows, columns)
}

/// 指定列が日時らしい値を含むかどうかを判定
///
/// # 引数
///
/// * `table` - 判定対象のテーブル
/// * `column` - 列インデックス（0始まり）
///
/// # 戻り値
///
/// * `Ok(true)` - 列内の少なくとも1セルがネイティブ日時値、または
///   正規化済み日時形`YYYY-MM-DD HH:MM`のテキストである場合
/// * `Ok(false)` - 該当セルが1つも無い場合
/// * `Err(XlsxNormError::ColumnOutOfRange)` - 列インデックスが範囲外
///
/// # 注意
///
/// テキスト側の判定は認識器の**入力**パターンではなく**出力**形に
/// 対して行うため、正規化が走った後でのみ意味を持ちます。また、
/// キャッシュは持たない純粋なクエリであり、時刻除去などの変更後は
/// 呼び出しの度に再計算されます（除去済みの列は日時らしさを失い、
/// 判定から外れます）。
pub fn is_datetime_like_column(table: &Table, column: usize) -> Result<bool, XlsxNormError> {
    if column >= table.column_count() {
        return Err(XlsxNormError::ColumnOutOfRange {
            index: column,
            columns: table.column_count(),
        });
    }

    Ok(table.column(column).any(|cell| match cell {
        CellValue::DateTime(_) => true,
        CellValue::Text(s) => is_canonical_date_time(s),
        CellValue::Number(_) | CellValue::Empty => false,
    }))
}
