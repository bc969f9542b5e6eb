//! Session Pipeline Module
//!
//! ロード → 正規化 → 時刻除去（任意回）→ エクスポートという
//! ユーザー操作の繰り返しを調停する、クレート唯一の状態保持
//! コンポーネント。セッションは明示的なオブジェクトとして呼び出し側が
//! ライフサイクルを管理します（プロセス全域の暗黙状態は持ちません）。

use std::collections::BTreeSet;
use std::io::{Read, Seek};

use crate::api::{PreviewFormat, SheetSelector};
use crate::clean;
use crate::error::XlsxNormError;
use crate::normalize;
use crate::preview;
use crate::reader::{self, ReadOptions};
use crate::strip;
use crate::types::Table;
use crate::writer;

/// セッションの設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct SessionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 読み込み制限設定
    pub read_options: ReadOptions,
}

/// Fluent Builder APIを提供する構造体
///
/// `Session`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみを
/// オーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxnorm::{SessionBuilder, SheetSelector};
///
/// # fn main() -> Result<(), xlsxnorm::XlsxNormError> {
/// let session = SessionBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Data".to_string()))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SessionBuilder {
    /// 内部設定（構築中）
    config: SessionConfig,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 先頭のシート
    /// - 入力サイズ上限: 2GB
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
        }
    }

    /// ロード対象のシートを選択する
    ///
    /// # 引数
    ///
    /// * `selector: SheetSelector`: シート選択方式
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 入力ファイルサイズの上限（バイト）を指定する
    ///
    /// 上限を超える入力は解析前に拒否されます。
    ///
    /// # 制約
    ///
    /// * `max_bytes > 0` でなければならない
    /// * 制約違反の場合、`build()`時に`XlsxNormError::Config`を返す
    pub fn with_max_input_size(mut self, max_bytes: u64) -> Self {
        self.config.read_options.max_input_size = max_bytes;
        self
    }

    /// 設定を検証し、空の`Session`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Session)`: 設定が有効な場合、未ロード状態のセッション
    /// * `Err(XlsxNormError::Config)`: 設定が無効な場合
    pub fn build(self) -> Result<Session, XlsxNormError> {
        if self.config.read_options.max_input_size == 0 {
            return Err(XlsxNormError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(Session::new(self.config))
    }
}

/// セッションの内部状態
///
/// `Empty → Loaded → Normalized`の状態機械です。正規化後は
/// 時刻除去を適用するたびに`Normalized`へ自己遷移します。
#[derive(Debug, Clone)]
enum SessionState {
    /// テーブル未ロード
    Empty,

    /// 生テーブルをロード済み（未正規化）
    Loaded(Table),

    /// 正規化済みテーブルを保持
    Normalized {
        /// 現在のテーブル（時刻除去の適用結果を含む）
        table: Table,
        /// 時刻除去を適用済みの列集合（エクスポート時にテキスト書式を強制）
        stripped: BTreeSet<usize>,
    },
}

/// 対話セッションの調停役
///
/// 一度ロードしたテーブルを正規化して保持し、ユーザー操作に応じて
/// 時刻除去・プレビュー・エクスポートを提供します。状態の書き換えは
/// `&mut self`経由に限定され、単一ライターが構造的に保証されます。
///
/// # 使用例
///
/// ```rust,no_run
/// use std::fs::File;
/// use xlsxnorm::SessionBuilder;
///
/// # fn main() -> Result<(), xlsxnorm::XlsxNormError> {
/// let mut session = SessionBuilder::new().build()?;
/// session.load(File::open("visits.xlsx")?)?;
/// session.normalize()?;
///
/// for col in session.datetime_columns() {
///     session.strip_time(col)?;
/// }
///
/// let bytes = session.export()?;
/// std::fs::write("visits_normalized.xlsx", bytes)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Session {
    /// セッション設定
    config: SessionConfig,

    /// 現在の状態
    state: SessionState,
}

impl Session {
    pub(crate) fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: SessionState::Empty,
        }
    }

    /// スプレッドシートをロードし、セッションをリセットする
    ///
    /// 以前のテーブルと時刻除去の履歴は破棄されます。読み込みに
    /// 失敗した場合、セッションの状態は一切変化しません。
    ///
    /// # 引数
    ///
    /// * `reader` - Excelファイルを読み込むためのリーダー（Read + Seekトレイトを実装）
    pub fn load<R: Read + Seek>(&mut self, reader: R) -> Result<(), XlsxNormError> {
        let table = reader::load_table(
            reader,
            &self.config.sheet_selector,
            &self.config.read_options,
        )?;
        self.state = SessionState::Loaded(table);
        Ok(())
    }

    /// ロード済みテーブルを正規化する
    ///
    /// 全セルに日付認識を適用し、結果をセッションの持続状態として
    /// 保存します。既に正規化済みの場合は**何もしません** —
    /// 再計算するとその後の時刻除去の結果が破棄されてしまうためです。
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 正規化が完了した（または既に完了していた）場合
    /// * `Err(XlsxNormError::SessionEmpty)` - テーブル未ロードの場合
    pub fn normalize(&mut self) -> Result<(), XlsxNormError> {
        match &self.state {
            SessionState::Empty => Err(XlsxNormError::SessionEmpty),
            SessionState::Loaded(table) => {
                let normalized = normalize::normalize(table);
                self.state = SessionState::Normalized {
                    table: normalized,
                    stripped: BTreeSet::new(),
                };
                Ok(())
            }
            // 再入は何もしない（適用済みの時刻除去を保護）
            SessionState::Normalized { .. } => Ok(()),
        }
    }

    /// 指定列から時刻成分を除去する
    ///
    /// 現在のテーブルに`strip_time`を適用し、結果で置き換えます。
    /// 同じ列への再適用は冪等です。除去済みの列はエクスポート時に
    /// テキスト書式が強制されます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 除去が完了した場合
    /// * `Err(XlsxNormError::SessionEmpty)` - テーブル未ロードの場合
    /// * `Err(XlsxNormError::Config)` - 未正規化の場合
    /// * `Err(XlsxNormError::ColumnOutOfRange)` - 列インデックスが範囲外
    pub fn strip_time(&mut self, column: usize) -> Result<(), XlsxNormError> {
        match &mut self.state {
            SessionState::Empty => Err(XlsxNormError::SessionEmpty),
            SessionState::Loaded(_) => Err(XlsxNormError::Config(
                "Table has not been normalized yet".to_string(),
            )),
            SessionState::Normalized { table, stripped } => {
                let updated = strip::strip_time(table, column)?;
                *table = updated;
                stripped.insert(column);
                Ok(())
            }
        }
    }

    /// 全セルの前後空白を除去する
    ///
    /// ロード済み・正規化済みのどちらの状態でも適用できます。
    pub fn clean(&mut self) -> Result<(), XlsxNormError> {
        match &mut self.state {
            SessionState::Empty => Err(XlsxNormError::SessionEmpty),
            SessionState::Loaded(table) => {
                *table = clean::clean(table);
                Ok(())
            }
            SessionState::Normalized { table, .. } => {
                *table = clean::clean(table);
                Ok(())
            }
        }
    }

    /// ヘッダー名で指定された列のデータセルをゼロ化する
    ///
    /// 指定名がヘッダー行に見つからない場合は黙ってスキップされます。
    pub fn zero_columns(&mut self, headers: &[&str]) -> Result<(), XlsxNormError> {
        match &mut self.state {
            SessionState::Empty => Err(XlsxNormError::SessionEmpty),
            SessionState::Loaded(table) => {
                *table = clean::zero_columns(table, headers);
                Ok(())
            }
            SessionState::Normalized { table, .. } => {
                *table = clean::zero_columns(table, headers);
                Ok(())
            }
        }
    }

    /// 現在のテーブルへの参照を取得（未ロード時は`None`）
    ///
    /// 表示用の読み取り専用ビューです。何度呼んでも状態は変化しません。
    pub fn table(&self) -> Option<&Table> {
        match &self.state {
            SessionState::Empty => None,
            SessionState::Loaded(table) => Some(table),
            SessionState::Normalized { table, .. } => Some(table),
        }
    }

    /// 日時らしい値を含む列のインデックス一覧を取得
    ///
    /// ユーザー向けの列ピッカーを構成するためのクエリです。
    /// キャッシュせず毎回再計算するため、時刻除去後は除去済みの列が
    /// 一覧から消えます（その列は「処理済み」として扱われます）。
    /// 未ロード時は空のリストを返します。
    pub fn datetime_columns(&self) -> Vec<usize> {
        let table = match self.table() {
            Some(table) => table,
            None => return Vec::new(),
        };

        (0..table.column_count())
            .filter(|&col| {
                normalize::is_datetime_like_column(table, col).unwrap_or(false)
            })
            .collect()
    }

    /// 現在のテーブルをプレビュー文字列として描画する
    ///
    /// # 引数
    ///
    /// * `format` - プレビュー形式（Markdown, JSON, CSV）
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 描画されたプレビュー
    /// * `Err(XlsxNormError::SessionEmpty)` - テーブル未ロードの場合
    pub fn render_preview(&self, format: PreviewFormat) -> Result<String, XlsxNormError> {
        let table = self.table().ok_or(XlsxNormError::SessionEmpty)?;

        let mut buffer = Vec::new();
        preview::render(table, format, &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| {
            XlsxNormError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    /// 現在のテーブルをXLSXバイト列へシリアライズする
    ///
    /// 時刻除去を適用済みの列には明示的なテキスト書式が強制されます。
    /// 何回の除去操作を経ていても、常に現在の状態が書き出されます。
    /// 失敗してもセッションの状態は変化せず、再試行できます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - 生成されたXLSXファイルのバイト列
    /// * `Err(XlsxNormError::SessionEmpty)` - テーブル未ロードの場合
    /// * `Err(XlsxNormError::Write)` - シリアライズに失敗した場合
    pub fn export(&self) -> Result<Vec<u8>, XlsxNormError> {
        match &self.state {
            SessionState::Empty => Err(XlsxNormError::SessionEmpty),
            SessionState::Loaded(table) => writer::write_table(table, &BTreeSet::new()),
            SessionState::Normalized { table, stripped } => writer::write_table(table, stripped),
        }
    }
}
