//! Table Module
//!
//! 行ごとのセル値から、ヘッダー行とデータ行を持つテーブル構造への変換を提供するモジュール。
//! 空白行のスキップ、末尾の空列の除去、列型の推論を行います。

use std::collections::HashMap;

use crate::types::{CellValue, ColumnKind};

/// 欠損値として扱う文字列
const NA_STRINGS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// シートのテーブル表現
///
/// ヘッダー行は最初の空白でない行です。列数はヘッダー行を含む全行から決定され、
/// データ行は同じ列数にパディングされます。
#[derive(Debug, Clone)]
pub(crate) struct SheetTable {
    /// ヘッダー行のセル値（列名の元）
    pub header: Vec<CellValue>,

    /// データ行（各行の長さは列数と一致）
    pub rows: Vec<Vec<CellValue>>,

    /// 列ごとの推論された型
    pub kinds: Vec<ColumnKind>,
}

impl SheetTable {
    /// 行ごとのセル値からテーブルを構築
    ///
    /// # 引数
    ///
    /// * `cells` - A列から始まる行ごとのセル値
    /// * `detect_na_strings` - `"NA"`や`"null"`などの文字列を欠損値として扱うか
    pub fn build(cells: Vec<Vec<CellValue>>, detect_na_strings: bool) -> Self {
        // 1. 空白行を除去
        let mut lines: Vec<Vec<CellValue>> = cells
            .into_iter()
            .filter(|row| !row.iter().all(CellValue::is_blank))
            .collect();

        // 2. 列数の決定（末尾の空白セルは数えない）
        let width = lines
            .iter()
            .map(|row| {
                row.iter()
                    .rposition(|cell| !cell.is_blank())
                    .map_or(0, |pos| pos + 1)
            })
            .max()
            .unwrap_or(0);

        for row in lines.iter_mut() {
            row.resize(width, CellValue::Empty);
        }

        // 3. ヘッダー行とデータ行に分割
        if lines.is_empty() {
            return Self {
                header: Vec::new(),
                rows: Vec::new(),
                kinds: Vec::new(),
            };
        }
        let header = lines.remove(0);

        let rows: Vec<Vec<CellValue>> = lines
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| normalize_missing(cell, detect_na_strings))
                    .collect()
            })
            .collect();

        // 4. 列型の推論
        let kinds = (0..width)
            .map(|col| ColumnKind::infer(rows.iter().map(|row| &row[col])))
            .collect();

        Self {
            header,
            rows,
            kinds,
        }
    }

    /// データ行数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列数
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// 空文字列と欠損値文字列を空セルに置き換える
fn normalize_missing(cell: CellValue, detect_na_strings: bool) -> CellValue {
    match cell {
        CellValue::String(ref s) if s.is_empty() => CellValue::Empty,
        CellValue::String(ref s) if detect_na_strings && NA_STRINGS.contains(&s.as_str()) => {
            CellValue::Empty
        }
        other => other,
    }
}

/// 列名の重複を`.N`サフィックスで解消する
///
/// 例: `["A", "A", "B", "A"]` -> `["A", "A.1", "B", "A.2"]`
///
/// サフィックス付きの名前が既に使われている場合は、その名前にさらにサフィックスを付けます。
/// 例: `["A", "A.1", "A"]` -> `["A", "A.1", "A.1.1"]`
pub(crate) fn dedupe_column_names(names: Vec<String>) -> Vec<String> {
    // 名前ごとの次に使うサフィックス番号（0は未使用）
    let mut counts: HashMap<String, usize> = HashMap::with_capacity(names.len());

    names
        .into_iter()
        .map(|name| {
            let mut column = name;
            let mut cur_count = counts.get(&column).copied().unwrap_or(0);
            while cur_count > 0 {
                counts.insert(column.clone(), cur_count + 1);
                column = format!("{}.{}", column, cur_count);
                cur_count = counts.get(&column).copied().unwrap_or(0);
            }
            counts.insert(column.clone(), cur_count + 1);
            column
        })
        .collect()
}
