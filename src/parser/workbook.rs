//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックレベルの操作を提供します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::io::{Cursor, Read};

use crate::error::XlsxJsonError;
use crate::types::{CellCoord, CellValue};

/// ワークブックパーサー
///
/// XLSX / XLS の判定はファイル内容から自動的に行われます。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - ワークブックを読み込むためのリーダー
    /// * `max_input_size` - 入力サイズの上限（バイト）
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(XlsxJsonError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(XlsxJsonError::Parse)` - ワークブックとして解析できなかった場合
    pub fn open<R: Read>(mut reader: R, max_input_size: u64) -> Result<Self, XlsxJsonError> {
        // 上限+1バイトまで読み込み、超過を検出する
        let mut buffer = Vec::new();
        let bytes_read = reader
            .by_ref()
            .take(max_input_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > max_input_size {
            return Err(XlsxJsonError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                max_input_size
            )));
        }

        let workbook = open_workbook_auto_from_rs(Cursor::new(buffer))?;

        Ok(Self { workbook })
    }

    /// すべてのシート名をワークブック内の順序で取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シートを読み込み、行ごとのセル値に変換
    ///
    /// 戻り値の各行はA列から始まります。使用範囲がA列より右から始まる場合、
    /// 先頭の列は空セルで埋められます。
    pub fn read_sheet(&mut self, sheet_name: &str) -> Result<Vec<Vec<CellValue>>, XlsxJsonError> {
        let range = self.workbook.worksheet_range(sheet_name)?;
        Ok(range_to_rows(sheet_name, &range))
    }
}

/// calamineのRangeを行ごとのセル値に変換
fn range_to_rows(sheet_name: &str, range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let (start_row, start_col) = match range.start() {
        Some(start) => start,
        None => return Vec::new(),
    };

    range
        .rows()
        .enumerate()
        .map(|(row_idx, row)| {
            let mut values = vec![CellValue::Empty; start_col as usize];
            values.extend(row.iter().enumerate().map(|(col_idx, cell)| {
                let coord = CellCoord::new(start_row + row_idx as u32, start_col + col_idx as u32);
                convert_cell(sheet_name, coord, cell)
            }));
            values
        })
        .collect()
}

/// calamineのセルデータを`CellValue`に変換
///
/// 整数値を持つ浮動小数点数は整数に正規化されます。
fn convert_cell(sheet_name: &str, coord: CellCoord, cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => normalize_float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTimeIso(s) => parse_iso_datetime(s).unwrap_or_else(|| {
            log::debug!(
                "sheet '{}' cell {}: unparsed date '{}' kept as text",
                sheet_name,
                coord.to_a1_notation(),
                s
            );
            CellValue::String(s.clone())
        }),
        Data::DurationIso(s) => parse_iso_duration(s)
            .map(CellValue::Duration)
            .unwrap_or_else(|| CellValue::String(s.clone())),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                return dt
                    .as_duration()
                    .map(CellValue::Duration)
                    .unwrap_or(CellValue::Empty);
            }
            match dt.as_datetime() {
                // シリアル値が1未満なら時刻のみ
                Some(datetime) if (0.0..1.0).contains(&dt.as_f64()) => {
                    CellValue::Time(datetime.time())
                }
                Some(datetime) => CellValue::DateTime(datetime),
                None => {
                    log::warn!(
                        "sheet '{}' cell {}: date serial {} is out of range",
                        sheet_name,
                        coord.to_a1_notation(),
                        dt.as_f64()
                    );
                    CellValue::Empty
                }
            }
        }
        Data::Error(e) => {
            log::debug!(
                "sheet '{}' cell {}: error value {} treated as missing",
                sheet_name,
                coord.to_a1_notation(),
                e
            );
            CellValue::Error(e.to_string())
        }
        Data::Empty => CellValue::Empty,
    }
}

/// ISO 8601形式の日時（`t="d"`セル）を解析
///
/// 日付のみの場合は0時、時刻のみの場合は`CellValue::Time`になります。
fn parse_iso_datetime(s: &str) -> Option<CellValue> {
    let s = s.trim().trim_end_matches('Z');

    if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(CellValue::DateTime(datetime));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(CellValue::DateTime);
    }
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .ok()
        .map(CellValue::Time)
}

/// ISO 8601形式の経過時間（`PnDTnHnMnS`）を解析
///
/// 年・月の指定は長さが一意に決まらないため解析しません。
fn parse_iso_duration(s: &str) -> Option<TimeDelta> {
    let s = s.trim();
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let s = s.strip_prefix('P')?;
    let (date_part, time_part) = s.split_once('T').unwrap_or((s, ""));
    if date_part.is_empty() && time_part.is_empty() {
        return None;
    }

    let mut total = TimeDelta::zero();
    if !date_part.is_empty() {
        let days: i64 = date_part.strip_suffix('D')?.parse().ok()?;
        total = total.checked_add(&TimeDelta::try_days(days)?)?;
    }

    let mut number = String::new();
    for c in time_part.chars() {
        let part = match c {
            '0'..='9' | '.' => {
                number.push(c);
                continue;
            }
            'H' => TimeDelta::try_hours(number.parse().ok()?)?,
            'M' => TimeDelta::try_minutes(number.parse().ok()?)?,
            'S' => {
                let seconds: f64 = number.parse().ok()?;
                TimeDelta::microseconds((seconds * 1_000_000.0).round() as i64)
            }
            _ => return None,
        };
        total = total.checked_add(&part)?;
        number.clear();
    }
    if !number.is_empty() {
        return None;
    }

    Some(if negative { -total } else { total })
}

/// 整数値を持つ浮動小数点数を整数に正規化
fn normalize_float(f: f64) -> CellValue {
    // i64の範囲内に収まる整数値のみ変換する
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.223_372_036_854_775_807e18 {
        CellValue::Int(f as i64)
    } else {
        CellValue::Float(f)
    }
}
