//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxnormクレート全体で使用するエラー型
///
/// スプレッドシートの読み込み、正規化、時刻除去、書き出しの各処理で
/// 発生するすべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Read`: Excelファイルの解析中に発生したエラー（calamine由来）
/// - `Write`: Excelファイルの書き出し中に発生したエラー（rust_xlsxwriter由来）
/// - `Config`: 設定の検証に失敗したエラー（無効なシート指定など）
/// - `ColumnOutOfRange`: 列インデックスがテーブルの範囲外
/// - `SessionEmpty`: テーブル未ロードのセッションに対する操作
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxnorm::XlsxNormError;
/// use std::fs::File;
///
/// fn open_input(path: &str) -> Result<File, XlsxNormError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(file)
/// }
/// ```
///
/// なお、セル単位のパターン不一致やカレンダー上あり得ない日付
/// （例: 2月31日）はエラーとして扱いません。該当セルを元の値のまま
/// 残すことで、1つの不正セルがテーブル全体の変換を妨げないようにします。
#[derive(Error, Debug)]
pub enum XlsxNormError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー
    ///
    /// calamineクレートがExcelファイルを解析する際に発生したエラーです。
    /// ファイル形式が不正、破損したファイル、サポートされていない形式などが
    /// 原因となります。読み込みに失敗してもセッションの状態は変化しません。
    #[error("Failed to read spreadsheet: {0}")]
    Read(#[from] calamine::Error),

    /// Excelファイルの書き出し中に発生したエラー
    ///
    /// rust_xlsxwriterクレートがワークブックをシリアライズする際に
    /// 発生したエラーです。書き出しに失敗してもセッションの状態は
    /// 変化しないため、エクスポートは再試行できます。
    #[error("Failed to write spreadsheet: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// 設定の検証に失敗したエラー
    ///
    /// `SessionBuilder::build()`時の検証、および存在しないシートの指定などで
    /// 発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// 列インデックスがテーブルの範囲外だったエラー
    ///
    /// 時刻除去や列判定で、テーブルの列数を超えるインデックスが
    /// 指定された場合に発生します。
    #[error("Column index {index} is out of range (table has {columns} columns)")]
    ColumnOutOfRange {
        /// 指定された列インデックス（0始まり）
        index: usize,
        /// テーブルの列数
        columns: usize,
    },

    /// テーブルがロードされていないセッションに対する操作エラー
    ///
    /// `load()`前のセッションに対して正規化・時刻除去・エクスポートを
    /// 要求した場合に発生します。
    #[error("No spreadsheet has been loaded into the session")]
    SessionEmpty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: XlsxNormError = io_err.into();

        match error {
            XlsxNormError::Io(e) => {
                assert_eq!(e.kind(), io::ErrorKind::NotFound);
                assert_eq!(e.to_string(), "File not found");
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_read_error_display() {
        let parse_err = calamine::Error::Msg("Corrupted file");
        let error: XlsxNormError = parse_err.into();

        let error_msg = error.to_string();
        assert!(error_msg.contains("Failed to read spreadsheet"));
        assert!(error_msg.contains("Corrupted file"));
    }

    #[test]
    fn test_config_error_display() {
        let error = XlsxNormError::Config("Sheet 'Data' not found".to_string());
        let error_msg = error.to_string();

        assert!(error_msg.contains("Configuration error"));
        assert!(error_msg.contains("Sheet 'Data' not found"));
    }

    #[test]
    fn test_column_out_of_range_display() {
        let error = XlsxNormError::ColumnOutOfRange {
            index: 7,
            columns: 3,
        };

        let error_msg = error.to_string();
        assert!(error_msg.contains("Column index 7"));
        assert!(error_msg.contains("3 columns"));
    }

    #[test]
    fn test_session_empty_display() {
        let error = XlsxNormError::SessionEmpty;
        assert!(error.to_string().contains("No spreadsheet"));
    }

    // エラー変換のテスト（?演算子の動作確認）
    #[test]
    fn test_error_conversion_with_question_mark() {
        fn io_operation() -> Result<(), XlsxNormError> {
            let _file = std::fs::File::open("nonexistent_file.xlsx")?;
            Ok(())
        }

        let result = io_operation();
        assert!(result.is_err());

        match result {
            Err(XlsxNormError::Io(_)) => {}
            _ => panic!("Expected Io error from ? operator"),
        }
    }

    #[test]
    fn test_error_conversion_from_calamine() {
        let parse_err = calamine::Error::Msg("File not found");
        let error: XlsxNormError = parse_err.into();

        match error {
            XlsxNormError::Read(_) => {}
            _ => panic!("Expected Read error"),
        }
    }
}
