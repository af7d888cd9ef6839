//! Formatter Module
//!
//! セル値からJSON値への変換処理を提供するモジュール。
//! 日付・時刻・経過時間は文字列に、欠損セルはプレースホルダーに変換されます。

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde_json::{Number, Value};

use crate::api::{DateFormat, MissingValue};
use crate::builder::ConversionConfig;
use crate::error::XlsxJsonError;
use crate::types::{CellValue, ColumnKind};

/// セルフォーマッター
///
/// セル値のJSON変換処理のファサードとして機能します。
#[derive(Debug)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,

    /// 欠損セルの出力方法
    missing_value: MissingValue,
}

impl CellFormatter {
    /// 変換設定からCellFormatterインスタンスを生成
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            date_formatter: DateFormatter::new(config.date_format.clone()),
            missing_value: config.missing_value.clone(),
        }
    }

    /// データセルをJSON値に変換
    ///
    /// # 引数
    ///
    /// * `value` - セル値
    /// * `kind` - セルが属する列の型
    ///
    /// # 戻り値
    ///
    /// * `Ok(Value)` - 変換後のJSON値
    /// * `Err(XlsxJsonError)` - 非有限の浮動小数点数など、JSONで表現できない場合
    pub fn format_value(&self, value: &CellValue, kind: ColumnKind) -> Result<Value, XlsxJsonError> {
        let json = match value {
            CellValue::Empty | CellValue::Error(_) => self.missing(),

            CellValue::Int(i) => match kind {
                // 欠損や小数を含む数値列では、整数も浮動小数点数として出力する
                ColumnKind::Float => float_value(*i as f64)?,
                _ => Value::Number(Number::from(*i)),
            },

            CellValue::Float(f) => float_value(*f)?,

            CellValue::String(s) => Value::String(s.clone()),

            CellValue::Bool(b) => Value::Bool(*b),

            CellValue::DateTime(dt) => Value::String(self.date_formatter.format_datetime(dt)),

            CellValue::Time(t) => Value::String(self.date_formatter.format_time(t)),

            CellValue::Duration(d) => Value::String(format_duration(d)),
        };

        Ok(json)
    }

    /// ヘッダーセルを列名に変換
    ///
    /// 空セル・エラーセルは`Unnamed: <列インデックス>`になります。
    pub fn format_header(&self, value: &CellValue, col: usize) -> String {
        match value {
            CellValue::Empty | CellValue::Error(_) => format!("Unnamed: {}", col),
            CellValue::String(s) if s.is_empty() => format!("Unnamed: {}", col),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => self.date_formatter.format_datetime(dt),
            CellValue::Time(t) => self.date_formatter.format_time(t),
            CellValue::Duration(d) => format_duration(d),
        }
    }

    /// 欠損セルのJSON値
    fn missing(&self) -> Value {
        match &self.missing_value {
            MissingValue::Placeholder(s) => Value::String(s.clone()),
            MissingValue::Null => Value::Null,
        }
    }
}

/// f64をJSON数値に変換
fn float_value(f: f64) -> Result<Value, XlsxJsonError> {
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| XlsxJsonError::InvalidDocument(format!("Non-finite number: {}", f)))
}

/// 日付フォーマッター
///
/// 日付時刻・時刻を文字列に変換します。
#[derive(Debug)]
pub(crate) struct DateFormatter {
    format: DateFormat,
}

impl DateFormatter {
    pub fn new(format: DateFormat) -> Self {
        Self { format }
    }

    /// 日付時刻をフォーマット
    ///
    /// `DateFormat::Python`では`YYYY-MM-DD HH:MM:SS`形式で、
    /// マイクロ秒が0でない場合のみ`.ffffff`を付加します。
    pub fn format_datetime(&self, dt: &NaiveDateTime) -> String {
        match &self.format {
            DateFormat::Python => {
                let base = dt.format("%Y-%m-%d %H:%M:%S").to_string();
                with_micros(base, dt.nanosecond())
            }
            DateFormat::Iso8601 => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            DateFormat::Custom(format_str) => dt.format(format_str).to_string(),
        }
    }

    /// 時刻をフォーマット
    ///
    /// カスタム形式の場合は、基準日（1899-12-31）と組み合わせた日付時刻として扱います。
    pub fn format_time(&self, t: &NaiveTime) -> String {
        match &self.format {
            DateFormat::Python | DateFormat::Iso8601 => {
                let base = t.format("%H:%M:%S").to_string();
                with_micros(base, t.nanosecond())
            }
            DateFormat::Custom(format_str) => match NaiveDate::from_ymd_opt(1899, 12, 31) {
                Some(date) => date.and_time(*t).format(format_str).to_string(),
                None => t.format("%H:%M:%S").to_string(),
            },
        }
    }
}

/// マイクロ秒が0でなければ`.ffffff`を付加
fn with_micros(mut base: String, nanos: u32) -> String {
    // うるう秒表現（nanos >= 1_000_000_000）はマイクロ秒に含めない
    let micros = (nanos % 1_000_000_000) / 1_000;
    if micros != 0 {
        base.push_str(&format!(".{:06}", micros));
    }
    base
}

/// 経過時間をフォーマット
///
/// `H:MM:SS`形式で、1日以上の場合は`D day(s), `を前置します。
///
/// 例: `2:30:00`, `1 day, 2:00:00`, `3 days, 0:00:00`
pub(crate) fn format_duration(d: &TimeDelta) -> String {
    let total_micros = d
        .num_microseconds()
        .unwrap_or_else(|| d.num_milliseconds().saturating_mul(1_000));

    const MICROS_PER_DAY: i64 = 86_400 * 1_000_000;
    let days = total_micros.div_euclid(MICROS_PER_DAY);
    let rem = total_micros.rem_euclid(MICROS_PER_DAY);

    let micros = rem % 1_000_000;
    let seconds = rem / 1_000_000;
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);

    let mut result = String::new();
    if days != 0 {
        let unit = if days.abs() == 1 { "day" } else { "days" };
        result.push_str(&format!("{} {}, ", days, unit));
    }
    result.push_str(&format!("{}:{:02}:{:02}", h, m, s));
    if micros != 0 {
        result.push_str(&format!(".{:06}", micros));
    }
    result
}
