//! Output Module
//!
//! 変換結果のドキュメント型と、JSONとしての書き出し処理を提供するモジュール。

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::io::Write;

use crate::error::XlsxJsonError;

/// 1行分のレコード（列名 -> 値、列順を保持）
pub type Record = Map<String, Value>;

/// 1シート分の変換結果
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRecords {
    /// シート名
    pub name: String,

    /// 列名（ヘッダー行の順序）
    pub columns: Vec<String>,

    /// レコード
    pub records: Vec<Record>,
}

impl SheetRecords {
    /// データ行数
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// 列数
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// 出力ドキュメント
///
/// シートが1つの場合はレコードの配列、複数の場合はシート名からレコード配列への
/// マッピングとしてシリアライズされます。
///
/// # 出力例
///
/// ```json
/// {
///   "Data": [{"Name": "A", "Age": 30}],
///   "Forklaring": [{"Kolonne": "Age", "Forklaring": "Alder"}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// 単一シートのワークブック
    Records(SheetRecords),

    /// 複数シートのワークブック（ワークブック内の順序）
    Sheets(Vec<SheetRecords>),
}

impl Document {
    /// ドキュメントに含まれるシート
    pub fn sheets(&self) -> &[SheetRecords] {
        match self {
            Document::Records(sheet) => std::slice::from_ref(sheet),
            Document::Sheets(sheets) => sheets,
        }
    }

    /// 2スペースインデントのJSONとして書き出す
    ///
    /// 非ASCII文字はエスケープされません。末尾に改行は付加しません。
    pub fn write_pretty<W: Write>(&self, writer: W) -> Result<(), XlsxJsonError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// 2スペースインデントのJSON文字列に変換
    pub fn to_pretty_string(&self) -> Result<String, XlsxJsonError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::Records(sheet) => sheet.records.serialize(serializer),
            Document::Sheets(sheets) => {
                let mut map = serializer.serialize_map(Some(sheets.len()))?;
                for sheet in sheets {
                    map.serialize_entry(&sheet.name, &sheet.records)?;
                }
                map.end()
            }
        }
    }
}
