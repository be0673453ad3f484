//! Batch processing of spreadsheet rows
//!
//! Reads the first column of an input sheet, analyzes each non-blank row in
//! order, and writes the records in [`COLUMN_ORDER`] as an `.xlsx` workbook or
//! a `.csv` file, chosen by the output extension.

use crate::analyzer::ShoppingItemAnalyzer;
use crate::error::BatchError;
use basket_domain::{CompletionProvider, ShoppingItemRecord, COLUMN_ORDER};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Counts from one batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Non-blank rows read from the input
    pub rows_read: usize,

    /// Rows the model extracted successfully
    pub extracted: usize,

    /// Rows that ended in the fallback record
    pub fallbacks: usize,

    /// Where the results were written
    pub output: PathBuf,
}

/// Analyze every row of `input` and write the results to `output`
///
/// The first row of the input is a header and is skipped. Rows are analyzed
/// one at a time. Nothing is written when the input has no non-blank rows or
/// the output extension is neither `xlsx` nor `csv`.
pub async fn process_file<L>(
    analyzer: &ShoppingItemAnalyzer<L>,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<BatchSummary, BatchError>
where
    L: CompletionProvider,
{
    let input = input.as_ref();
    let output = output.as_ref();
    output_format(output)?;

    info!(input = %input.display(), "Reading batch input");
    let rows = read_input_rows(input)?;
    if rows.is_empty() {
        warn!(input = %input.display(), "No valid rows found");
        return Err(BatchError::NoRows);
    }

    let mut records = Vec::with_capacity(rows.len());
    let mut fallbacks = 0;

    for (idx, text) in rows.iter().enumerate() {
        info!(row = idx + 1, text = %text, "Processing row");
        let analysis = analyzer.analyze(text).await;
        if analysis.is_fallback() {
            fallbacks += 1;
        }
        records.push(analysis.into_record());
    }

    write_records(output, &records)?;
    info!(output = %output.display(), rows = records.len(), "Saved batch results");

    Ok(BatchSummary {
        rows_read: rows.len(),
        extracted: records.len() - fallbacks,
        fallbacks,
        output: output.to_path_buf(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Csv,
    Xlsx,
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

fn output_format(path: &Path) -> Result<OutputFormat, BatchError> {
    match extension_of(path).as_str() {
        "csv" => Ok(OutputFormat::Csv),
        "xlsx" => Ok(OutputFormat::Xlsx),
        other => Err(BatchError::UnsupportedFormat(other.to_string())),
    }
}

/// Read the non-blank first-column cells below the header row
pub fn read_input_rows(path: &Path) -> Result<Vec<String>, BatchError> {
    let cells = match extension_of(path).as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_spreadsheet_column(path)?,
        "csv" => read_csv_column(path)?,
        other => return Err(BatchError::UnsupportedFormat(other.to_string())),
    };

    Ok(cells
        .into_iter()
        .filter(|cell| !cell.trim().is_empty())
        .collect())
}

fn read_spreadsheet_column(path: &Path) -> Result<Vec<String>, BatchError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| BatchError::Spreadsheet("Workbook has no worksheets".to_string()))??;

    Ok(range
        .rows()
        .skip(1)
        .map(|row| match row.first() {
            None | Some(Data::Empty) => String::new(),
            Some(cell) => cell.to_string(),
        })
        .collect())
}

fn read_csv_column(path: &Path) -> Result<Vec<String>, BatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut cells = Vec::new();
    for record in reader.records() {
        let record = record?;
        cells.push(record.get(0).unwrap_or_default().to_string());
    }
    Ok(cells)
}

/// Write records with a header row in [`COLUMN_ORDER`]
///
/// `.xlsx` paths get a single-sheet workbook, `.csv` paths a CSV file; any
/// other extension is [`BatchError::UnsupportedFormat`].
pub fn write_records(path: &Path, records: &[ShoppingItemRecord]) -> Result<(), BatchError> {
    let format = output_format(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        OutputFormat::Csv => write_csv(path, records),
        OutputFormat::Xlsx => write_xlsx(path, records),
    }
}

fn write_xlsx(path: &Path, records: &[ShoppingItemRecord]) -> Result<(), BatchError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in COLUMN_ORDER.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = u32::try_from(idx + 1)
            .map_err(|_| BatchError::Spreadsheet("Too many rows for a worksheet".to_string()))?;
        // Empty fields stay blank cells
        for (col, value) in record.to_row().into_iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string(row, col as u16, value)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_csv(path: &Path, records: &[ShoppingItemRecord]) -> Result<(), BatchError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(COLUMN_ORDER)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use basket_domain::Priority;

    #[test]
    fn test_unsupported_extension() {
        let result = read_input_rows(Path::new("items.txt"));
        assert!(matches!(result, Err(BatchError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_unsupported_output_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.ods");

        let result = write_records(&path, &[ShoppingItemRecord::fallback("eggs")]);
        assert!(matches!(result, Err(BatchError::UnsupportedFormat(ext)) if ext == "ods"));
        assert!(!path.exists());
    }

    #[test]
    fn test_xlsx_input_skips_header_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Items").unwrap();
        sheet.write_string(1, 0, "1l milk of amul brand").unwrap();
        sheet.write_string(3, 0, "   ").unwrap();
        sheet.write_string(4, 0, "Cereal, 4 boxes").unwrap();
        sheet.write_string(4, 1, "ignored").unwrap();
        workbook.save(&path).unwrap();

        let rows = read_input_rows(&path).unwrap();
        assert_eq!(rows, vec!["1l milk of amul brand", "Cereal, 4 boxes"]);
    }

    #[test]
    fn test_write_records_xlsx_is_a_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("output.xlsx");

        let record = ShoppingItemRecord {
            quantity: "1".to_string(),
            unit: "l".to_string(),
            item_name: "milk".to_string(),
            brand: "amul".to_string(),
            priority: Priority::Low,
            details: String::new(),
            description: "1l milk of amul brand".to_string(),
        };
        write_records(&path, &[record]).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range_at(0).unwrap().unwrap();
        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Data::Empty => String::new(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect();

        assert_eq!(rows[0], COLUMN_ORDER.to_vec());
        assert_eq!(
            rows[1],
            vec!["1", "l", "milk", "amul", "LOW", "", "1l milk of amul brand"]
        );
    }

    #[test]
    fn test_csv_input_skips_header_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        std::fs::write(
            &path,
            "Items\n1l milk of amul brand\n\n   \n\"Cereal, 4 boxes\",extra\n",
        )
        .unwrap();

        let rows = read_input_rows(&path).unwrap();
        assert_eq!(rows, vec!["1l milk of amul brand", "Cereal, 4 boxes"]);
    }

    #[test]
    fn test_write_records_header_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("output.csv");

        let record = ShoppingItemRecord {
            quantity: "4".to_string(),
            unit: "box".to_string(),
            item_name: "cereal".to_string(),
            brand: "Morning Star".to_string(),
            priority: Priority::Medium,
            details: "sugar check".to_string(),
            description: "Cereal, 4 boxes".to_string(),
        };
        write_records(&path, &[record]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "quantity,unit,itemName,brand,priority,details,description"
        );
        assert_eq!(
            lines.next().unwrap(),
            "4,box,cereal,Morning Star,MEDIUM,sugar check,\"Cereal, 4 boxes\""
        );
    }
}
