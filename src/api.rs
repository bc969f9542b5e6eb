//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// シート選択方式
///
/// ロード対象のシートを選択する方法を指定します。
/// セッションは一度に1シートのみを扱います。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 先頭のシートをロード（デフォルト）
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(1)` は2番目のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Sheet1".to_string())`
    Name(String),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::First
    }
}

/// テーブルプレビューの出力フォーマット
///
/// セッションの現在テーブルをユーザー向けに描画する際の形式を
/// 指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PreviewFormat {
    /// Markdownテーブル形式（デフォルト）
    ///
    /// # 出力例
    ///
    /// ```markdown
    /// | Visit            | Name  |
    /// | ---------------- | ----- |
    /// | 2024-06-05 14:30 | Alice |
    /// ```
    Markdown,

    /// JSON形式
    ///
    /// 各行をExcel列名（A, B, C, ...)をキーとするオブジェクトとして
    /// 表現します。
    ///
    /// # 出力例
    ///
    /// ```json
    /// {
    ///   "rows": [
    ///     {"A": "Visit", "B": "Name"},
    ///     {"A": "2024-06-05 14:30", "B": "Alice"}
    ///   ]
    /// }
    /// ```
    Json,

    /// CSV形式
    ///
    /// カンマ・引用符・改行を含むセルはダブルクォートで
    /// エスケープされます。
    Csv,
}
