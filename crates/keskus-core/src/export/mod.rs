pub mod layout;

use crate::catalog::SymbolCatalog;
use crate::error::KeskusError;
use crate::summary::SummaryResult;
use chrono::NaiveDate;
use layout::{device_columns, summary_columns, Cell, ExportOptions};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

pub const SUMMARY_SHEET: &str = "Summary Report";
pub const DEVICES_SHEET: &str = "All Devices";

/// Render a summary into an `.xlsx` workbook held in memory.
///
/// The first sheet has one row per aggregated group followed by a total row;
/// the second lists every device.
pub fn export_workbook(
    summary: &SummaryResult,
    catalog: &SymbolCatalog,
    options: &ExportOptions,
) -> Result<Vec<u8>, KeskusError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SUMMARY_SHEET)?;
    write_summary_sheet(sheet, summary, catalog, options, &bold)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name(DEVICES_SHEET)?;
    write_devices_sheet(sheet, summary, catalog, options, &bold)?;

    let bytes = workbook.save_to_buffer()?;
    tracing::info!(
        groups = summary.aggregated_items.len(),
        devices = summary.all_devices.len(),
        size = bytes.len(),
        "exported workbook"
    );
    Ok(bytes)
}

/// `device-summary-YYYY-MM-DD.xlsx`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("device-summary-{}.xlsx", date.format("%Y-%m-%d"))
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    summary: &SummaryResult,
    catalog: &SymbolCatalog,
    options: &ExportOptions,
    bold: &Format,
) -> Result<(), KeskusError> {
    let columns = summary_columns(options);

    sheet.write_string_with_format(0, 0, "DEVICE SUMMARY", bold)?;
    for (col, column) in columns.iter().enumerate() {
        let col = col as u16;
        sheet.set_column_width(col, column.width())?;
        sheet.write_string_with_format(1, col, column.header(), bold)?;
    }

    let mut row = 2;
    for item in &summary.aggregated_items {
        for (col, column) in columns.iter().enumerate() {
            write_cell(sheet, row, col as u16, column.cell(item, catalog))?;
        }
        row += 1;
    }

    // Quantity is the last column; the label sits just left of it.
    let quantity_col = (columns.len() - 1) as u16;
    sheet.write_string_with_format(row, quantity_col - 1, "TOTAL:", bold)?;
    sheet.write_number_with_format(row, quantity_col, summary.total_count as f64, bold)?;

    Ok(())
}

fn write_devices_sheet(
    sheet: &mut Worksheet,
    summary: &SummaryResult,
    catalog: &SymbolCatalog,
    options: &ExportOptions,
    bold: &Format,
) -> Result<(), KeskusError> {
    let columns = device_columns(options);

    sheet.write_string_with_format(0, 0, "ALL EXTRACTED DEVICES", bold)?;
    for (col, column) in columns.iter().enumerate() {
        let col = col as u16;
        sheet.set_column_width(col, column.width())?;
        sheet.write_string_with_format(1, col, column.header(), bold)?;
    }

    for (i, device) in summary.all_devices.iter().enumerate() {
        let row = i as u32 + 2;
        for (col, column) in columns.iter().enumerate() {
            write_cell(sheet, row, col as u16, column.cell(device, catalog))?;
        }
    }

    Ok(())
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: Cell) -> Result<(), KeskusError> {
    match cell {
        Cell::Text(text) if text.is_empty() => {}
        Cell::Text(text) => {
            sheet.write_string(row, col, text)?;
        }
        Cell::Number(n) => {
            sheet.write_number(row, col, n)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExtractionRow, PageExtractionDataset};
    use crate::summary::summarize;
    use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
    use std::io::Cursor;

    fn row(icons: &[&str], suoja: &str, kaapeli: &str) -> ExtractionRow {
        ExtractionRow {
            icons: icons.iter().map(|s| s.to_string()).collect(),
            nro: "1".into(),
            kuvateksti: "Valaistus".into(),
            suoja: suoja.into(),
            kaapeli: kaapeli.into(),
        }
    }

    fn summary() -> SummaryResult {
        let ds: PageExtractionDataset = [(
            0,
            vec![
                row(&["JOHDONSUOJA_1"], "C16", "MMJ"),
                row(&["JOHDONSUOJA_1"], "C16", "MCMK"),
                row(&["VIKAVIRTASUOJA"], "C16/30mA", "MMJ"),
            ],
        )]
        .into_iter()
        .collect();
        summarize(&ds)
    }

    fn read_sheet(bytes: Vec<u8>, name: &str) -> Range<Data> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        workbook.worksheet_range(name).unwrap()
    }

    fn text(range: &Range<Data>, row: u32, col: u32) -> String {
        match range.get_value((row, col)) {
            Some(Data::String(s)) => s.clone(),
            other => panic!("expected string at ({row}, {col}), got {other:?}"),
        }
    }

    fn number(range: &Range<Data>, row: u32, col: u32) -> f64 {
        match range.get_value((row, col)) {
            Some(Data::Float(f)) => *f,
            Some(Data::Int(i)) => *i as f64,
            other => panic!("expected number at ({row}, {col}), got {other:?}"),
        }
    }

    #[test]
    fn test_file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(export_file_name(date), "device-summary-2026-03-09.xlsx");
    }

    #[test]
    fn test_summary_sheet_roundtrip() {
        let catalog = SymbolCatalog::builtin().unwrap();
        let bytes = export_workbook(&summary(), &catalog, &ExportOptions::default()).unwrap();
        let sheet = read_sheet(bytes, SUMMARY_SHEET);

        assert_eq!(text(&sheet, 0, 0), "DEVICE SUMMARY");
        assert_eq!(text(&sheet, 1, 2), "Cable Types");

        assert_eq!(text(&sheet, 2, 0), "JOHDONSUOJA 1-NAP");
        assert_eq!(text(&sheet, 2, 1), "C16");
        assert_eq!(text(&sheet, 2, 2), "MMJ, MCMK ⚠️ MISMATCH");
        assert_eq!(number(&sheet, 2, 3), 2.0);

        assert_eq!(text(&sheet, 3, 0), "VIKAVIRTASUOJA");
        assert_eq!(text(&sheet, 3, 2), "MMJ");
        assert_eq!(number(&sheet, 3, 3), 1.0);

        assert_eq!(text(&sheet, 4, 2), "TOTAL:");
        assert_eq!(number(&sheet, 4, 3), 3.0);
    }

    #[test]
    fn test_split_protection_without_cable_column() {
        let catalog = SymbolCatalog::builtin().unwrap();
        let options = ExportOptions {
            include_cable_column: false,
            split_protection: true,
        };
        let bytes = export_workbook(&summary(), &catalog, &options).unwrap();
        let sheet = read_sheet(bytes, SUMMARY_SHEET);

        assert_eq!(text(&sheet, 1, 1), "Suoja Input");
        assert_eq!(text(&sheet, 1, 2), "Suoja Output");
        assert_eq!(text(&sheet, 1, 3), "Quantity");
        assert_eq!(text(&sheet, 3, 1), "C16");
        assert_eq!(text(&sheet, 3, 2), "30mA");
        assert_eq!(text(&sheet, 4, 2), "TOTAL:");
        assert_eq!(number(&sheet, 4, 3), 3.0);
    }

    #[test]
    fn test_devices_sheet_lists_every_device() {
        let catalog = SymbolCatalog::builtin().unwrap();
        let bytes = export_workbook(&summary(), &catalog, &ExportOptions::default()).unwrap();
        let sheet = read_sheet(bytes, DEVICES_SHEET);

        assert_eq!(text(&sheet, 0, 0), "ALL EXTRACTED DEVICES");
        assert_eq!(text(&sheet, 1, 2), "NRo");
        assert_eq!(text(&sheet, 1, 5), "Kaapeli");
        for row in 2..5 {
            assert_eq!(number(&sheet, row, 0), 1.0);
            assert_eq!(text(&sheet, row, 3), "Valaistus");
        }
        assert_eq!(text(&sheet, 3, 5), "MCMK");
        assert_eq!(text(&sheet, 4, 4), "C16/30mA");
    }
}
