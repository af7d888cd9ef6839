//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};

/// セルの値を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 整数（整数値の浮動小数点数もここに正規化される）
    Int(i64),

    /// 浮動小数点数
    Float(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日付時刻
    DateTime(NaiveDateTime),

    /// 時刻のみ（シリアル値が1未満の日付セル）
    Time(NaiveTime),

    /// 経過時間
    Duration(TimeDelta),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

impl CellValue {
    /// 空白セルかどうかを判定
    ///
    /// 空文字列も空白として扱います。空白だけの行はレコードになりません。
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// 欠損値かどうかを判定（空セルとエラーセル）
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Empty | CellValue::Error(_))
    }

    /// 数値かどうかを判定
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Int(_) | CellValue::Float(_))
    }
}

/// セル座標（0始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// A1形式の文字列に変換（例: (0, 0) -> "A1"）
    #[allow(clippy::wrong_self_convention)]
    pub fn to_a1_notation(&self) -> String {
        let col_str = Self::col_index_to_letter(self.col);
        format!("{}{}", col_str, self.row + 1)
    }

    /// 列インデックスを文字列に変換（0 -> "A", 25 -> "Z", 26 -> "AA"）
    fn col_index_to_letter(mut col: u32) -> String {
        let mut result = String::new();
        loop {
            let remainder = col % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            if col < 26 {
                break;
            }
            col = col / 26 - 1;
        }
        result
    }
}

/// 列の型（列内の全データセルから推論される）
///
/// 数値の出力表現を決定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    /// すべて整数で、欠損なし
    Integer,

    /// すべて数値だが、非整数値または欠損を含む
    Float,

    /// それ以外（文字列、日付、論理値、混在、空列）
    Other,
}

impl ColumnKind {
    /// 列のセル値から型を推論
    pub fn infer<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        let mut seen_value = false;
        let mut has_missing = false;
        let mut all_int = true;

        for value in values {
            if value.is_missing() {
                has_missing = true;
                continue;
            }
            if !value.is_numeric() {
                return ColumnKind::Other;
            }
            seen_value = true;
            if matches!(value, CellValue::Float(_)) {
                all_int = false;
            }
        }

        match (seen_value, all_int && !has_missing) {
            (false, _) => ColumnKind::Other,
            (true, true) => ColumnKind::Integer,
            (true, false) => ColumnKind::Float,
        }
    }
}
