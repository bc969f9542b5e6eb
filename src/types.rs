//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。
//! セル値はタグ付き列挙型として明示的にモデル化し、各コンポーネントで
//! 網羅的な`match`により処理します。

use chrono::NaiveDateTime;

/// セルの値を表す列挙型
///
/// 正規化パイプラインにとって意味を持つのは`Text`と`DateTime`のみです。
/// `Number`と`Empty`は各変換をそのまま通過します（時刻除去の
/// テキスト強制のみ例外）。
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 空セル
    Empty,

    /// 文字列
    Text(String),

    /// 数値（f64）
    Number(f64),

    /// ネイティブ日時値（セルの格納型が日時であるもの）
    ///
    /// 日時らしく見えるだけの自由テキストとは区別されます。
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// テキスト値への参照を取得（テキスト以外は`None`）
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// 値を文字列として取得（書式適用前）
    ///
    /// 日時値は正規形`YYYY-MM-DD HH:MM`で描画されます。
    pub fn as_raw_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// 行・列からなるテーブル
///
/// 行の順序付き列（各行はセル値の順序付き列）として保持します。
/// 先頭行（ヘッダー行）も他の行と同様にデータとして扱い、スキーマの
/// 強制は行いません。構築時に列数を最長行に揃え、不足分は`Empty`で
/// 埋めて矩形を保証します。
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// セル値の行列（矩形）
    rows: Vec<Vec<CellValue>>,

    /// 列数
    columns: usize,
}

impl Table {
    /// 行データからテーブルを生成
    ///
    /// # 引数
    ///
    /// * `rows` - セル値の行リスト。行ごとの長さは不揃いでもよい
    ///
    /// # 戻り値
    ///
    /// 最長行に合わせて`Empty`で右詰めした矩形テーブル
    pub fn new(mut rows: Vec<Vec<CellValue>>) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(columns, CellValue::Empty);
        }
        Self { rows, columns }
    }

    /// 行数を取得
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列数を取得
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// 指定位置のセル値を取得（範囲外は`None`）
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// 行のイテレータを取得
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// 指定列のセル値イテレータを取得
    ///
    /// 範囲外の列インデックスに対しては空のイテレータを返します。
    pub fn column(&self, col: usize) -> impl Iterator<Item = &CellValue> {
        self.rows.iter().filter_map(move |r| r.get(col))
    }

    pub(crate) fn from_rectangular(rows: Vec<Vec<CellValue>>, columns: usize) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns));
        Self { rows, columns }
    }
}
