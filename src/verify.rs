//! Verify Module
//!
//! 変換済みJSONファイルの構造を確認する診断用モジュール。
//! シート名、先頭レコードのキー、シートごとのレコード数を報告します。

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::XlsxJsonError;

/// デフォルトの検証対象ファイル
pub const DEFAULT_VERIFY_PATH: &str = "data/json/20241002_gulbok_data_til_publ.json";

/// キーを報告するシート
pub const DATA_SHEET: &str = "Data";

/// レコード数を報告するもう一方のシート
pub const EXPLANATION_SHEET: &str = "Forklaring";

/// 検証結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// シート名（ドキュメント内の順序）
    pub sheet_names: Vec<String>,

    /// `Data`シートの先頭レコードのキー
    pub first_record_keys: Vec<String>,

    /// `Data`シートのレコード数
    pub data_records: usize,

    /// `Forklaring`シートのレコード数
    pub explanation_records: usize,
}

impl VerifyReport {
    /// JSONドキュメントから検証結果を構築
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxJsonError::InvalidDocument` - ルートがオブジェクトでない、またはシートが配列でない
    /// * `XlsxJsonError::MissingKey` - `Data`または`Forklaring`シートが存在しない
    /// * `XlsxJsonError::EmptySheet` - `Data`シートにレコードがない
    pub fn from_document(document: &Value) -> Result<Self, XlsxJsonError> {
        let sheets = document.as_object().ok_or_else(|| {
            XlsxJsonError::InvalidDocument("expected an object keyed by sheet name".to_string())
        })?;

        let sheet_names = sheets.keys().cloned().collect();

        let data = sheet_records(sheets, DATA_SHEET)?;
        let first_record = data.first().ok_or_else(|| XlsxJsonError::EmptySheet {
            sheet: DATA_SHEET.to_string(),
        })?;
        let first_record_keys = first_record
            .as_object()
            .ok_or_else(|| {
                XlsxJsonError::InvalidDocument(format!(
                    "first record of '{}' is not an object",
                    DATA_SHEET
                ))
            })?
            .keys()
            .cloned()
            .collect();

        let explanation = sheet_records(sheets, EXPLANATION_SHEET)?;

        Ok(Self {
            sheet_names,
            first_record_keys,
            data_records: data.len(),
            explanation_records: explanation.len(),
        })
    }
}

/// シート名に対応するレコード配列を取得
fn sheet_records<'a>(
    sheets: &'a Map<String, Value>,
    name: &str,
) -> Result<&'a Vec<Value>, XlsxJsonError> {
    sheets
        .get(name)
        .ok_or_else(|| XlsxJsonError::MissingKey {
            key: name.to_string(),
        })?
        .as_array()
        .ok_or_else(|| XlsxJsonError::InvalidDocument(format!("sheet '{}' is not an array", name)))
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self
            .sheet_names
            .iter()
            .map(|name| quote_name(name))
            .collect();
        writeln!(f, "Sheets: [{}]", quoted.join(", "))?;

        writeln!(f, "\n{} sheet - First record keys:", DATA_SHEET)?;
        for key in &self.first_record_keys {
            writeln!(f, "  - {}", key)?;
        }

        writeln!(
            f,
            "\nTotal records in {} sheet: {}",
            DATA_SHEET, self.data_records
        )?;
        writeln!(
            f,
            "Total records in {} sheet: {}",
            EXPLANATION_SHEET, self.explanation_records
        )
    }
}

/// シート名を引用符で囲む
///
/// 単一引用符を含み二重引用符を含まない名前は二重引用符で、それ以外は単一引用符で囲みます。
fn quote_name(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\");
    if name.contains('\'') && !name.contains('"') {
        format!("\"{}\"", escaped)
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}

/// JSONファイルを読み込み、検証結果を構築
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxjson::verify::{verify_file, DEFAULT_VERIFY_PATH};
///
/// # fn main() -> Result<(), xlsxjson::XlsxJsonError> {
/// let report = verify_file(DEFAULT_VERIFY_PATH)?;
/// print!("{}", report);
/// # Ok(())
/// # }
/// ```
pub fn verify_file<P: AsRef<Path>>(path: P) -> Result<VerifyReport, XlsxJsonError> {
    let file = File::open(path.as_ref())?;
    let document: Value = serde_json::from_reader(BufReader::new(file))?;
    VerifyReport::from_document(&document)
}
