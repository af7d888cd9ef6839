//! Parser Module
//!
//! calamineを使用したワークブック解析の実装。
//! シートを行ごとのセル値に変換します。

mod workbook;

pub(crate) use workbook::WorkbookParser;
