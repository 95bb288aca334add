//! Tabular export: the no-layout escape hatch.
//!
//! Dumps the same rows the renderer draws into a spreadsheet container, one
//! row per input row, one column per field, header row first. This path
//! exists because the PDF backend can fail on font resources; a plain cell
//! dump never fails on layout.

use rust_xlsxwriter::{Format, Workbook};

use crate::error::RenderError;
use crate::layout::display_width;

/// Serialize rows to a single-sheet XLSX workbook.
///
/// Column widths are sized to the widest cell so the sheet is readable
/// without manual adjustment; nothing else about the layout is computed.
pub fn export_xlsx(headers: &[&str], rows: &[Vec<String>]) -> Result<Vec<u8>, RenderError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    let mut col_widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            worksheet.write_string((row_idx + 1) as u32, col_idx as u16, cell)?;
            if col_idx < col_widths.len() {
                col_widths[col_idx] = col_widths[col_idx].max(display_width(cell));
            }
        }
    }

    for (col, width) in col_widths.iter().enumerate() {
        // Clamp: a 40-line speech cell should not produce a 400-unit column.
        worksheet.set_column_width(col as u16, (*width).min(80) as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Serialize rows to UTF-8 CSV bytes with a header row.
pub fn export_csv(headers: &[&str], rows: &[Vec<String>]) -> Result<Vec<u8>, RenderError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    Ok(writer.into_inner()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADERS: [&str; 4] = ["時間", "担当", "準備・動き", "進行内容"];

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec![
                "14:00".to_string(),
                "司会".to_string(),
                "照明OFF".to_string(),
                "オープニング動画開始。".to_string(),
            ],
            vec![
                String::new(),
                "司会".to_string(),
                String::new(),
                "1) 紹介者：中島 / ゲスト：勇和工業 赤間".to_string(),
            ],
        ]
    }

    #[test]
    fn csv_has_header_and_all_rows() {
        let bytes = export_csv(&HEADERS, &rows()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("進行内容"));
        assert!(lines[1].contains("14:00"));
        assert!(lines[2].contains("勇和工業"));
    }

    #[test]
    fn csv_of_empty_rows_is_just_the_header() {
        let bytes = export_csv(&HEADERS, &[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn xlsx_produces_a_zip_container() {
        let bytes = export_xlsx(&HEADERS, &rows()).unwrap();
        // XLSX is a zip archive; PK magic is enough to show a complete
        // workbook came back rather than a truncated buffer.
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn xlsx_accepts_empty_rows() {
        assert!(export_xlsx(&HEADERS, &[]).is_ok());
    }
}
