//! Batch Conversion Tests for xlsxjson
//!
//! Directory conversion against temporary input and output directories.

use rust_xlsxwriter::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use xlsxjson::verify::verify_file;
use xlsxjson::{BatchConverter, BatchOutcome, ConverterBuilder, SheetSummary, XlsxJsonError};

// Helper module for generating test fixtures
mod fixtures {
    use super::*;

    /// One sheet with columns `Name` and `Age`
    pub fn write_sample(path: &Path) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Name")?;
        worksheet.write_string(0, 1, "Age")?;
        worksheet.write_string(1, 0, "A")?;
        worksheet.write_number(1, 1, 30.0)?;
        worksheet.write_string(2, 0, "B")?;
        worksheet.write_number(2, 1, 41.0)?;
        worksheet.write_string(3, 0, "C")?;
        worksheet.write_number(3, 1, 25.0)?;
        workbook.save(path)
    }

    /// Sheets `Data` (`rows` rows) and `Forklaring` (5 rows)
    pub fn write_budget(path: &Path, rows: u32) -> Result<(), XlsxError> {
        let mut workbook = Workbook::new();

        let data = workbook.add_worksheet();
        data.set_name("Data")?;
        data.write_string(0, 0, "Departement")?;
        data.write_string(0, 1, "Kapittel")?;
        data.write_string(0, 2, "Beløp")?;
        for i in 0..rows {
            data.write_string(i + 1, 0, "Finansdepartementet")?;
            data.write_number(i + 1, 1, (1600 + i % 10) as f64)?;
            data.write_number(i + 1, 2, i as f64 + 0.5)?;
        }

        let explanation = workbook.add_worksheet();
        explanation.set_name("Forklaring")?;
        explanation.write_string(0, 0, "Kolonne")?;
        explanation.write_string(0, 1, "Beskrivelse")?;
        for i in 0..5u32 {
            explanation.write_string(i + 1, 0, &format!("Kolonne {}", i))?;
            explanation.write_string(i + 1, 1, "Forklaring på norsk")?;
        }

        workbook.save(path)
    }
}

struct Workspace {
    _root: TempDir,
    input: std::path::PathBuf,
    output: std::path::PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("data").join("excel");
        let output = root.path().join("data").join("json");
        fs::create_dir_all(&input).unwrap();
        Self {
            _root: root,
            input,
            output,
        }
    }

    fn batch(&self) -> BatchConverter {
        let converter = ConverterBuilder::new().build().unwrap();
        BatchConverter::new(converter, &self.input, &self.output)
    }

    fn run(&self) -> (BatchOutcome, String) {
        let mut progress = Vec::new();
        let outcome = self.batch().run(&mut progress).unwrap();
        (outcome, String::from_utf8(progress).unwrap())
    }
}

#[test]
fn test_empty_input_directory() {
    let ws = Workspace::new();

    let (outcome, progress) = ws.run();
    assert_eq!(outcome, BatchOutcome::NoInput);
    assert_eq!(
        progress,
        format!("No Excel files found in {}/\n", ws.input.display())
    );

    // The output directory is created, but nothing is written into it
    assert!(ws.output.is_dir());
    assert_eq!(fs::read_dir(&ws.output).unwrap().count(), 0);
}

#[test]
fn test_single_sheet_file() {
    let ws = Workspace::new();
    let input = ws.input.join("sample.xlsx");
    fixtures::write_sample(&input).unwrap();

    let (outcome, progress) = ws.run();
    let output = ws.output.join("sample.json");

    let expected = format!(
        "Found 1 Excel file(s) to convert\n\n\
         Processing: {}\n\
         \x20 [OK] Created: {}\n\
         \x20      Rows: 3, Columns: 2\n\
         \n\
         [SUCCESS] Conversion complete!\n",
        input.display(),
        output.display()
    );
    assert_eq!(progress, expected);

    match outcome {
        BatchOutcome::Converted(files) => {
            assert_eq!(files.len(), 1);
            assert_eq!(files[0].output, output);
            assert_eq!(
                files[0].sheets,
                vec![SheetSummary {
                    name: "Sheet1".to_string(),
                    rows: 3,
                    columns: 2,
                }]
            );
        }
        other => panic!("Expected Converted, got {:?}", other),
    }

    let text = fs::read_to_string(&output).unwrap();
    assert!(!text.ends_with('\n'));
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        value,
        json!([
            {"Name": "A", "Age": 30},
            {"Name": "B", "Age": 41},
            {"Name": "C", "Age": 25}
        ])
    );
}

#[test]
fn test_multi_sheet_file() {
    let ws = Workspace::new();
    let input = ws.input.join("budsjett.xlsx");
    fixtures::write_budget(&input, 100).unwrap();

    let (_, progress) = ws.run();
    let output = ws.output.join("budsjett.json");

    let expected = format!(
        "Found 1 Excel file(s) to convert\n\n\
         Processing: {}\n\
         \x20 [OK] Processed sheet: Data (Rows: 100, Columns: 3)\n\
         \x20 [OK] Processed sheet: Forklaring (Rows: 5, Columns: 2)\n\
         \x20 [OK] Created: {}\n\
         \n\
         [SUCCESS] Conversion complete!\n",
        input.display(),
        output.display()
    );
    assert_eq!(progress, expected);

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("\"Beskrivelse\": \"Forklaring på norsk\""));

    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["Data"].as_array().unwrap().len(), 100);
    assert_eq!(value["Forklaring"].as_array().unwrap().len(), 5);
}

#[test]
fn test_processing_order_and_stem_naming() {
    let ws = Workspace::new();
    // Content is detected from the bytes, so an .xls name with xlsx content still converts
    fixtures::write_sample(&ws.input.join("legacy.xls")).unwrap();
    fixtures::write_sample(&ws.input.join("b.xlsx")).unwrap();
    fixtures::write_sample(&ws.input.join("a.xlsx")).unwrap();
    fs::write(ws.input.join("README.txt"), "ignored").unwrap();

    let (outcome, _) = ws.run();
    let outputs: Vec<String> = match outcome {
        BatchOutcome::Converted(files) => files
            .iter()
            .map(|f| f.output.file_name().unwrap().to_string_lossy().into_owned())
            .collect(),
        other => panic!("Expected Converted, got {:?}", other),
    };
    assert_eq!(outputs, vec!["a.json", "b.json", "legacy.json"]);
    assert_eq!(fs::read_dir(&ws.output).unwrap().count(), 3);
}

#[test]
fn test_rerun_is_byte_identical() {
    let ws = Workspace::new();
    fixtures::write_budget(&ws.input.join("budsjett.xlsx"), 20).unwrap();
    let output = ws.output.join("budsjett.json");

    ws.run();
    let first = fs::read(&output).unwrap();
    ws.run();
    let second = fs::read(&output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_existing_output_is_overwritten() {
    let ws = Workspace::new();
    fixtures::write_sample(&ws.input.join("sample.xlsx")).unwrap();
    fs::create_dir_all(&ws.output).unwrap();
    let output = ws.output.join("sample.json");
    fs::write(&output, "stale content that is much longer than the real output ".repeat(50))
        .unwrap();

    ws.run();
    let value: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);
}

#[test]
fn test_corrupt_workbook_aborts_run() {
    let ws = Workspace::new();
    fixtures::write_sample(&ws.input.join("a.xlsx")).unwrap();
    fs::write(ws.input.join("b.xlsx"), b"not a workbook").unwrap();

    let mut progress = Vec::new();
    let result = ws.batch().run(&mut progress);
    assert!(matches!(result, Err(XlsxJsonError::Parse(_))));

    // Files converted before the failure are kept
    assert!(ws.output.join("a.json").exists());
    assert!(!ws.output.join("b.json").exists());

    let text = String::from_utf8(progress).unwrap();
    assert!(!text.contains("[SUCCESS]"));
}

#[test]
fn test_verify_converted_output() {
    let ws = Workspace::new();
    fixtures::write_budget(&ws.input.join("20241002_gulbok_data_til_publ.xlsx"), 42).unwrap();
    ws.run();

    let report = verify_file(ws.output.join("20241002_gulbok_data_til_publ.json")).unwrap();
    assert_eq!(report.sheet_names, vec!["Data", "Forklaring"]);
    assert_eq!(
        report.first_record_keys,
        vec!["Departement", "Kapittel", "Beløp"]
    );
    assert_eq!(report.data_records, 42);
    assert_eq!(report.explanation_records, 5);

    let text = report.to_string();
    assert!(text.starts_with("Sheets: ['Data', 'Forklaring']\n"));
    assert!(text.contains("Data sheet - First record keys:\n  - Departement\n"));
    assert!(text.ends_with(
        "Total records in Data sheet: 42\nTotal records in Forklaring sheet: 5\n"
    ));
}

#[test]
fn test_verify_single_sheet_output_fails() {
    let ws = Workspace::new();
    fixtures::write_sample(&ws.input.join("sample.xlsx")).unwrap();
    ws.run();

    let result = verify_file(ws.output.join("sample.json"));
    assert!(matches!(result, Err(XlsxJsonError::InvalidDocument(_))));
}
