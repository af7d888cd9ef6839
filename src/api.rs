//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// 欠損セルの出力方法
///
/// 空セルやエラーセル（`#DIV/0!`など）をJSONに変換する際の表現を指定します。
/// 欠損セルであっても、レコードからキーが省略されることはありません。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MissingValue {
    /// プレースホルダー文字列として出力（デフォルト: `"None"`）
    ///
    /// # 出力例
    ///
    /// ```json
    /// {"Name": "A", "Age": "None"}
    /// ```
    Placeholder(String),

    /// JSONの`null`として出力
    Null,
}

impl MissingValue {
    /// デフォルトのプレースホルダー文字列
    pub const DEFAULT_PLACEHOLDER: &'static str = "None";
}

impl Default for MissingValue {
    fn default() -> Self {
        MissingValue::Placeholder(Self::DEFAULT_PLACEHOLDER.to_string())
    }
}

/// 日付・時刻の出力形式
///
/// 日付セルは常に文字列としてJSONに出力されます。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DateFormat {
    /// `YYYY-MM-DD HH:MM:SS`形式（デフォルト）
    ///
    /// 秒未満の値がある場合のみ`.ffffff`（マイクロ秒）を付加します。
    /// 時刻のみのセルは`HH:MM:SS`になります。
    ///
    /// 例: `2024-10-02 00:00:00`
    #[default]
    Python,

    /// ISO 8601形式（`YYYY-MM-DDTHH:MM:SS`）
    ///
    /// 例: `2024-10-02T00:00:00`
    Iso8601,

    /// カスタム形式（chrono互換フォーマット文字列）
    ///
    /// # フォーマット指定子（主要なもの）
    ///
    /// - `%Y`: 4桁の年（例: 2025）
    /// - `%m`: 2桁の月（01-12）
    /// - `%d`: 2桁の日（01-31）
    /// - `%H`: 24時間形式の時（00-23）
    /// - `%M`: 分（00-59）
    /// - `%S`: 秒（00-59）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxjson::{ConverterBuilder, DateFormat};
    ///
    /// # fn main() -> Result<(), xlsxjson::XlsxJsonError> {
    /// let converter = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom("%d.%m.%Y".to_string()))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    Custom(String),
}
