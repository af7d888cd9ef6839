//! xlsxjson - Pure-Rust Excel workbook to JSON converter
//!
//! このクレートは、Excelワークブック（XLSX / XLS）を読み込み、JSONファイルに変換する
//! 機能と、変換結果を確認する検証機能を提供します。
//!
//! - シートが1つのワークブックはレコードの配列に変換されます
//! - 複数シートのワークブックはシート名からレコード配列へのマッピングに変換されます
//! - 欠損セルはキーを省略せず、プレースホルダー文字列`"None"`として出力されます
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxjson::ConverterBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("sample.xlsx")?;
//!     let output = File::create("sample.json")?;
//!     converter.convert_to_writer(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Directory Conversion
//!
//! ```rust,no_run
//! use xlsxjson::{BatchConverter, ConverterBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!     let batch = BatchConverter::new(converter, "data/excel", "data/json");
//!
//!     // 進捗は標準出力に書き出される
//!     batch.run(&mut std::io::stdout())?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use xlsxjson::{ConverterBuilder, DateFormat, MissingValue};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_missing_value(MissingValue::Null)          // 欠損セルをnullに
//!         .with_date_format(DateFormat::Iso8601)           // 2024-10-02T00:00:00
//!         .build()?;
//!
//!     let document = converter.convert_file("sample.xlsx")?;
//!     println!("{}", document.to_pretty_string()?);
//!
//!     Ok(())
//! }
//! ```

mod api;
mod batch;
mod builder;
mod error;
mod formatter;
mod output;
mod parser;
mod table;
mod types;
pub mod verify;

// 公開API
pub use api::{DateFormat, MissingValue};
pub use batch::{
    output_path_for, BatchConverter, BatchOutcome, FileSummary, SheetSummary, DEFAULT_INPUT_DIR,
    DEFAULT_OUTPUT_DIR, SPREADSHEET_EXTENSIONS,
};
pub use builder::{Converter, ConverterBuilder};
pub use error::XlsxJsonError;
pub use output::{Document, Record, SheetRecords};
pub use verify::{verify_file, VerifyReport};
