//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use crate::api::{DateFormat, MissingValue};
use crate::error::XlsxJsonError;
use crate::formatter::CellFormatter;
use crate::output::{Document, Record, SheetRecords};
use crate::parser::WorkbookParser;
use crate::table::{dedupe_column_names, SheetTable};
use crate::types::CellValue;
use chrono::format::{Item, StrftimeItems};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// 入力ファイルサイズ上限のデフォルト値: 2GB
pub(crate) const DEFAULT_MAX_INPUT_SIZE: u64 = 2_147_483_648;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// 欠損セルの出力方法
    pub missing_value: MissingValue,

    /// 日付形式
    pub date_format: DateFormat,

    /// `"NA"`などの文字列を欠損値として扱うか
    pub detect_na_strings: bool,

    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_size: u64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            missing_value: MissingValue::default(),
            date_format: DateFormat::default(),
            detect_na_strings: true,
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxjson::{ConverterBuilder, MissingValue};
///
/// # fn main() -> Result<(), xlsxjson::XlsxJsonError> {
/// let converter = ConverterBuilder::new()
///     .with_missing_value(MissingValue::Null)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 欠損セル: `"None"`
    /// - 日付形式: `YYYY-MM-DD HH:MM:SS`
    /// - 欠損値文字列（`"NA"`, `"null"`など）の検出: 有効
    /// - 入力ファイルサイズ上限: 2GB
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 欠損セルの出力方法を指定する
    ///
    /// ```rust,no_run
    /// use xlsxjson::{ConverterBuilder, MissingValue};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_missing_value(MissingValue::Placeholder("-".to_string()));
    /// ```
    pub fn with_missing_value(mut self, missing: MissingValue) -> Self {
        self.config.missing_value = missing;
        self
    }

    /// 日付の出力形式を指定する
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.config.date_format = format;
        self
    }

    /// `"NA"`、`"N/A"`、`"null"`などの文字列セルを欠損値として扱うかを指定する
    ///
    /// * `true`: 欠損値として扱う（デフォルト）
    /// * `false`: 文字列のまま出力する
    pub fn detect_na_strings(mut self, detect: bool) -> Self {
        self.config.detect_na_strings = detect;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.max_input_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxJsonError::Config(String)`: 設定の検証に失敗した場合
    ///   * カスタム日付形式が空、または不正な書式文字列
    ///   * 入力ファイルサイズ上限が0
    pub fn build(self) -> Result<Converter, XlsxJsonError> {
        // 1. カスタム日付形式の検証
        if let DateFormat::Custom(ref format_str) = self.config.date_format {
            let invalid = format_str.is_empty()
                || StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error));
            if invalid {
                return Err(XlsxJsonError::Config(format!(
                    "Invalid date format string: '{}'",
                    format_str
                )));
            }
        }

        // 2. サイズ上限の検証
        if self.config.max_input_size == 0 {
            return Err(XlsxJsonError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// ワークブックをJSONドキュメントに変換するためのメインエントリーポイントです。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxjson::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), xlsxjson::XlsxJsonError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("data/excel/budsjett.xlsx")?;
/// let output = File::create("data/json/budsjett.json")?;
/// converter.convert_to_writer(input, output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// セルフォーマッター
    formatter: CellFormatter,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            formatter: CellFormatter::new(&config),
            config,
        }
    }

    /// ワークブックをJSONドキュメントに変換
    ///
    /// # 処理フロー
    ///
    /// 1. ワークブックを開き、シート名を列挙
    /// 2. 各シートについて
    ///    - テーブルの構築（ヘッダー行、空白行のスキップ、列型の推論）
    ///    - 列名の決定と重複解消
    ///    - 各行をレコードに変換
    /// 3. シートが1つならレコード配列、複数ならシート名のマッピング
    pub fn convert<R: Read>(&self, input: R) -> Result<Document, XlsxJsonError> {
        let mut parser = WorkbookParser::open(input, self.config.max_input_size)?;
        let sheet_names = parser.sheet_names();

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for sheet_name in &sheet_names {
            let cells = parser.read_sheet(sheet_name)?;
            let sheet = self.convert_sheet(sheet_name, cells)?;
            log::debug!(
                "sheet '{}': {} rows, {} columns",
                sheet.name,
                sheet.row_count(),
                sheet.column_count()
            );
            sheets.push(sheet);
        }

        if sheets.len() == 1 {
            let sheet = sheets.remove(0);
            Ok(Document::Records(sheet))
        } else {
            Ok(Document::Sheets(sheets))
        }
    }

    /// ファイルパスからワークブックを変換
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<Document, XlsxJsonError> {
        let file = File::open(path.as_ref())?;
        self.convert(BufReader::new(file))
    }

    /// ワークブックを変換し、整形済みJSONとして書き出す
    pub fn convert_to_writer<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<(), XlsxJsonError> {
        let document = self.convert(input)?;
        document.write_pretty(output)
    }

    /// ワークブックを整形済みJSON文字列に変換
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, XlsxJsonError> {
        self.convert(input)?.to_pretty_string()
    }

    /// 1シート分のセル値をレコードに変換
    fn convert_sheet(
        &self,
        sheet_name: &str,
        cells: Vec<Vec<CellValue>>,
    ) -> Result<SheetRecords, XlsxJsonError> {
        let table = SheetTable::build(cells, self.config.detect_na_strings);

        let columns = dedupe_column_names(
            table
                .header
                .iter()
                .enumerate()
                .map(|(col, value)| self.formatter.format_header(value, col))
                .collect(),
        );

        let mut records = Vec::with_capacity(table.row_count());
        for row in &table.rows {
            let mut record = Record::new();
            for ((name, value), kind) in columns.iter().zip(row).zip(&table.kinds) {
                record.insert(name.clone(), self.formatter.format_value(value, *kind)?);
            }
            records.push(record);
        }

        Ok(SheetRecords {
            name: sheet_name.to_string(),
            columns,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_converter_builder_new() {
        let builder = ConverterBuilder::new();
        assert_eq!(builder.config.missing_value, MissingValue::default());
        assert_eq!(builder.config.date_format, DateFormat::Python);
        assert!(builder.config.detect_na_strings);
        assert_eq!(builder.config.max_input_size, DEFAULT_MAX_INPUT_SIZE);
    }

    #[test]
    fn test_builder_method_chaining() {
        let builder = ConverterBuilder::new()
            .with_missing_value(MissingValue::Null)
            .with_date_format(DateFormat::Iso8601)
            .detect_na_strings(false)
            .with_max_input_size(1024);

        assert_eq!(builder.config.missing_value, MissingValue::Null);
        assert_eq!(builder.config.date_format, DateFormat::Iso8601);
        assert!(!builder.config.detect_na_strings);
        assert_eq!(builder.config.max_input_size, 1024);
    }

    #[test]
    fn test_build_success() {
        assert!(ConverterBuilder::new().build().is_ok());
    }

    #[test]
    fn test_build_with_valid_custom_date_format() {
        let result = ConverterBuilder::new()
            .with_date_format(DateFormat::Custom("%Y-%m-%d".to_string()))
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_with_invalid_custom_date_format() {
        for format_str in ["", "%Y-%Q"] {
            let result = ConverterBuilder::new()
                .with_date_format(DateFormat::Custom(format_str.to_string()))
                .build();
            match result {
                Err(XlsxJsonError::Config(msg)) => {
                    assert!(msg.contains("Invalid date format"));
                }
                _ => panic!("Expected Config error for {:?}", format_str),
            }
        }
    }

    #[test]
    fn test_build_with_zero_max_input_size() {
        let result = ConverterBuilder::new().with_max_input_size(0).build();
        assert!(matches!(result, Err(XlsxJsonError::Config(_))));
    }

    #[test]
    fn test_convert_sheet_records() {
        let converter = ConverterBuilder::new().build().unwrap();
        let cells = vec![
            vec![
                CellValue::String("Name".to_string()),
                CellValue::String("Age".to_string()),
                CellValue::String("Name".to_string()),
            ],
            vec![
                CellValue::String("A".to_string()),
                CellValue::Int(30),
                CellValue::String("x".to_string()),
            ],
            vec![
                CellValue::String("B".to_string()),
                CellValue::Empty,
                CellValue::String("y".to_string()),
            ],
        ];

        let sheet = converter.convert_sheet("Ark1", cells).unwrap();
        assert_eq!(sheet.columns, vec!["Name", "Age", "Name.1"]);
        assert_eq!(
            serde_json::to_value(&sheet.records).unwrap(),
            json!([
                {"Name": "A", "Age": 30.0, "Name.1": "x"},
                {"Name": "B", "Age": "None", "Name.1": "y"}
            ])
        );
    }

    #[test]
    fn test_converter_convert_with_invalid_input() {
        let converter = ConverterBuilder::new().build().unwrap();
        let result = converter.convert_to_string(std::io::Cursor::new(Vec::<u8>::new()));
        assert!(result.is_err());
    }
}
