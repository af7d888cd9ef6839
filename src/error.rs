//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxjsonクレート全体で使用するエラー型
///
/// ワークブックの読み込み、JSONへの変換、出力ファイルの検証中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み・書き込み失敗など）
/// - `Parse`: ワークブックの解析中に発生したエラー（calamine由来）
/// - `Json`: JSONのシリアライズ・デシリアライズ中に発生したエラー
/// - `Config`: 設定の検証に失敗したエラー
/// - `SecurityViolation`: 入力サイズ制限に違反したエラー
/// - `MissingKey` / `EmptySheet` / `InvalidDocument`: 検証ツールのエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxjson::XlsxJsonError;
/// use std::fs::File;
///
/// fn open_workbook(path: &str) -> Result<(), XlsxJsonError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxJsonError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイル、サポートされていない形式などが
    /// 原因となります。
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// JSONの処理中に発生したエラー
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に無効な設定が検出された場合に発生します。
    ///
    /// ```rust,no_run
    /// use xlsxjson::{ConverterBuilder, DateFormat, XlsxJsonError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_date_format(DateFormat::Custom(String::new()))
    ///     .build();
    ///
    /// if let Err(XlsxJsonError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// 検証対象のドキュメントに必要なキーが存在しない
    #[error("Missing key '{key}' in document")]
    MissingKey {
        /// 見つからなかったキー（シート名）
        key: String,
    },

    /// 先頭レコードを参照しようとしたシートが空
    #[error("Sheet '{sheet}' has no records")]
    EmptySheet {
        /// 空だったシート名
        sheet: String,
    },

    /// ドキュメントの構造が想定と異なる
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}
