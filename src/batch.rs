//! Batch Module
//!
//! 入力ディレクトリ内のすべてのワークブックを変換し、出力ディレクトリにJSONファイルとして
//! 書き出すモジュール。進捗は呼び出し側が指定したライターに出力されます。

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use glob::{glob, Pattern};

use crate::builder::Converter;
use crate::error::XlsxJsonError;
use crate::output::Document;

/// 変換対象とする拡張子（この順序で処理される）
pub const SPREADSHEET_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// デフォルトの入力ディレクトリ
pub const DEFAULT_INPUT_DIR: &str = "data/excel";

/// デフォルトの出力ディレクトリ
pub const DEFAULT_OUTPUT_DIR: &str = "data/json";

/// 1シート分の変換結果の要約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

/// 1ファイル分の変換結果の要約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// 入力ワークブックのパス
    pub input: PathBuf,

    /// 書き出したJSONファイルのパス
    pub output: PathBuf,

    /// シートごとの行数・列数（ワークブック内の順序）
    pub sheets: Vec<SheetSummary>,
}

/// バッチ変換の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// 入力ディレクトリにワークブックが見つからなかった（ファイルは書き出されない）
    NoInput,

    /// 変換したファイルの要約（処理順）
    Converted(Vec<FileSummary>),
}

/// ディレクトリ単位の変換処理
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxjson::{BatchConverter, ConverterBuilder};
///
/// # fn main() -> Result<(), xlsxjson::XlsxJsonError> {
/// let converter = ConverterBuilder::new().build()?;
/// let batch = BatchConverter::new(converter, "data/excel", "data/json");
/// batch.run(&mut std::io::stdout())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BatchConverter {
    converter: Converter,
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl BatchConverter {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        converter: Converter,
        input_dir: P,
        output_dir: Q,
    ) -> Self {
        Self {
            converter,
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// 入力ディレクトリ内のワークブックを列挙
    ///
    /// `.xlsx`ファイルをすべて列挙した後に`.xls`ファイルを列挙します。
    /// 各拡張子内ではパス名順にソートされます。入力ディレクトリが存在しない場合は空を返します。
    pub fn find_workbooks(&self) -> Result<Vec<PathBuf>, XlsxJsonError> {
        let escaped_dir = Pattern::escape(&self.input_dir.to_string_lossy());
        let mut workbooks = Vec::new();

        for extension in SPREADSHEET_EXTENSIONS {
            let pattern = format!("{}/*.{}", escaped_dir, extension);
            let entries = glob(&pattern).map_err(|e| {
                XlsxJsonError::Config(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;

            let mut found = Vec::new();
            for entry in entries {
                let path = entry.map_err(|e| XlsxJsonError::Io(e.into()))?;
                if path.is_file() {
                    found.push(path);
                }
            }
            found.sort();
            workbooks.extend(found);
        }

        Ok(workbooks)
    }

    /// 入力ディレクトリ内のすべてのワークブックを変換
    ///
    /// 出力ディレクトリは存在しなければ作成されます。いずれかのワークブックで
    /// エラーが発生した場合は、その時点で処理を中断してエラーを返します。
    ///
    /// # 引数
    ///
    /// * `progress` - 進捗メッセージの出力先（通常は標準出力）
    pub fn run<W: Write>(&self, progress: &mut W) -> Result<BatchOutcome, XlsxJsonError> {
        fs::create_dir_all(&self.output_dir)?;

        let workbooks = self.find_workbooks()?;
        if workbooks.is_empty() {
            writeln!(
                progress,
                "No Excel files found in {}/",
                self.input_dir.display()
            )?;
            return Ok(BatchOutcome::NoInput);
        }

        writeln!(
            progress,
            "Found {} Excel file(s) to convert\n",
            workbooks.len()
        )?;

        let mut summaries = Vec::with_capacity(workbooks.len());
        for workbook in &workbooks {
            summaries.push(self.convert_one(workbook, progress)?);
            writeln!(progress)?;
        }

        writeln!(progress, "[SUCCESS] Conversion complete!")?;
        Ok(BatchOutcome::Converted(summaries))
    }

    /// 1つのワークブックを変換し、`<stem>.json`として書き出す
    pub fn convert_one<W: Write>(
        &self,
        input: &Path,
        progress: &mut W,
    ) -> Result<FileSummary, XlsxJsonError> {
        writeln!(progress, "Processing: {}", input.display())?;
        log::debug!("converting workbook {}", input.display());

        let document = self.converter.convert_file(input)?;
        let output = output_path_for(input, &self.output_dir);

        let sheets: Vec<SheetSummary> = document
            .sheets()
            .iter()
            .map(|sheet| SheetSummary {
                name: sheet.name.clone(),
                rows: sheet.row_count(),
                columns: sheet.column_count(),
            })
            .collect();

        match &document {
            Document::Records(_) => {
                write_document(&document, &output)?;
                writeln!(progress, "  [OK] Created: {}", output.display())?;
                for sheet in &sheets {
                    writeln!(
                        progress,
                        "       Rows: {}, Columns: {}",
                        sheet.rows, sheet.columns
                    )?;
                }
            }
            Document::Sheets(_) => {
                for sheet in &sheets {
                    writeln!(
                        progress,
                        "  [OK] Processed sheet: {} (Rows: {}, Columns: {})",
                        sheet.name, sheet.rows, sheet.columns
                    )?;
                }
                write_document(&document, &output)?;
                writeln!(progress, "  [OK] Created: {}", output.display())?;
            }
        }

        Ok(FileSummary {
            input: input.to_path_buf(),
            output,
            sheets,
        })
    }
}

/// 入力パスに対応する出力JSONファイルのパス（`<output_dir>/<stem>.json`）
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut file_name = stem.to_os_string();
    file_name.push(".json");
    output_dir.join(file_name)
}

/// ドキュメントをファイルに書き出す（既存ファイルは上書き）
fn write_document(document: &Document, path: &Path) -> Result<(), XlsxJsonError> {
    let mut writer = BufWriter::new(File::create(path)?);
    document.write_pretty(&mut writer)?;
    writer.flush()?;
    log::info!("wrote {}", path.display());
    Ok(())
}
