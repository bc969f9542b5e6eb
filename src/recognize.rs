//! Date Recognizer Module
//!
//! 単一セル値がテキスト形式の日付または日時かどうかを判定し、
//! 正規形（`YYYY-MM-DD` / `YYYY-MM-DD HH:MM`）へ変換するモジュール。

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::types::CellValue;

/// 日付認識に使用する正規表現パターン
struct DatePatterns {
    /// 日時パターン: 日・月・年（4桁）・時:分の5つの数値グループ。
    /// 日/月/年の区切りは1文字以上の非数字、時と分の区切りはコロン固定。
    date_time: Regex,

    /// 日付のみパターン: 日・月・年（4桁）の3つの数値グループ。
    /// 年の後に余分な内容があってはならない（アンカーで強制）。
    date_only: Regex,

    /// 正規化済み日時の出力形（`YYYY-MM-DD HH:MM`）
    ///
    /// 入力パターンよりも厳密で、正規化が走った後にしか一致しません。
    canonical_date_time: Regex,
}

impl DatePatterns {
    fn new() -> Self {
        // パターンはリテラル固定のため、コンパイル失敗はあり得ない
        Self {
            date_time: Regex::new(r"^\s*(\d{1,2})\D+(\d{1,2})\D+(\d{4})\D+(\d{1,2}):(\d{2})\s*$")
                .unwrap(),
            date_only: Regex::new(r"^\s*(\d{1,2})\D+(\d{1,2})\D+(\d{4})\s*$").unwrap(),
            canonical_date_time: Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}$").unwrap(),
        }
    }
}

fn patterns() -> &'static DatePatterns {
    static PATTERNS: OnceLock<DatePatterns> = OnceLock::new();
    PATTERNS.get_or_init(DatePatterns::new)
}

/// セル値を認識し、テキスト日付であれば正規形に変換して返す
///
/// # 引数
///
/// * `value` - 判定対象のセル値
///
/// # 戻り値
///
/// テキスト日付・日時として認識された場合は正規形のテキスト値、
/// それ以外は元の値のクローン
///
/// # 判定規則
///
/// 1. テキスト以外の値はそのまま返す
/// 2. 前後の空白を無視して、特異度の高い日時パターンを先に試行
/// 3. 次に日付のみパターンを試行。最初に成功したものが採用される
///    （2つのパターンは構造上排他）
/// 4. 数値グループがカレンダー上有効な日付・時刻を構成しない場合
///    （例: 4月31日、13月、25時）は不一致とみなし、**元の値を
///    そのまま返す** — 有効性検証はパターンではなくカレンダー構築に
///    委譲されます
///
/// この関数からエラーが漏れることはありません。
///
/// # 使用例
///
/// ```rust
/// use xlsxnorm::{recognize, CellValue};
///
/// let cell = CellValue::Text("05/07/2023".to_string());
/// assert_eq!(recognize(&cell), CellValue::Text("2023-07-05".to_string()));
///
/// // 2月31日は存在しないため、元の値が維持される
/// let bad = CellValue::Text("31-02-2024".to_string());
/// assert_eq!(recognize(&bad), bad);
/// ```
pub fn recognize(value: &CellValue) -> CellValue {
    let text = match value.as_text() {
        Some(text) => text,
        None => return value.clone(),
    };

    match recognize_text(text.trim()) {
        Some(canonical) => CellValue::Text(canonical),
        None => value.clone(),
    }
}

/// トリム済みテキストを正規形に変換（認識できなければ`None`）
fn recognize_text(trimmed: &str) -> Option<String> {
    let patterns = patterns();

    // 1. 日時パターン（特異度が高いため先に試行）
    if let Some(caps) = patterns.date_time.captures(trimmed) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        let hour: u32 = caps[4].parse().ok()?;
        let minute: u32 = caps[5].parse().ok()?;

        let datetime = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))?;
        return Some(datetime.format("%Y-%m-%d %H:%M").to_string());
    }

    // 2. 日付のみパターン
    if let Some(caps) = patterns.date_only.captures(trimmed) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;

        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        return Some(date.format("%Y-%m-%d").to_string());
    }

    None
}

/// テキストが正規化済み日時形（`YYYY-MM-DD HH:MM`）かどうかを判定
pub(crate) fn is_canonical_date_time(text: &str) -> bool {
    patterns().canonical_date_time.is_match(text)
}
