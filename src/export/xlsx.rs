//! XLSX encoder for claim exports

use rust_xlsxwriter::{Format, Workbook};

use crate::error::ClaimsResult;

use super::{ExportRow, HEADERS};

/// Name of the single worksheet
pub const SHEET_NAME: &str = "Claims";

/// Workbook with one sheet: a bold header row, then one row per claim.
/// Amounts are numeric cells.
pub fn export_xlsx(rows: &[ExportRow]) -> ClaimsResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, header) in HEADERS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            sheet.write_string(r, 0, row.date.as_str())?;
            sheet.write_string(r, 1, row.employee.as_str())?;
            sheet.write_string(r, 2, row.email.as_str())?;
            sheet.write_string(r, 3, row.description.as_str())?;
            sheet.write_number(r, 4, row.amount.as_f64())?;
            sheet.write_string(r, 5, row.status)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Claim, Money, UserId};
    use std::io::{Cursor, Read};

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut text = String::new();
        part.read_to_string(&mut text).unwrap();
        text
    }

    fn rows() -> Vec<ExportRow> {
        let claim = Claim::new(
            UserId::from("u1"),
            Some("Raj Kumar".into()),
            None,
            "2024-11-20",
            "Client Meeting Lunch",
            Money::from_units(2500),
        );
        vec![ExportRow::from_claim(&claim)]
    }

    #[test]
    fn test_single_sheet_named_claims() {
        let bytes = export_xlsx(&rows()).unwrap();
        let workbook = read_part(&bytes, "xl/workbook.xml");
        assert!(workbook.contains("name=\"Claims\""));
        assert_eq!(workbook.matches("<sheet ").count(), 1);
    }

    #[test]
    fn test_cells_written() {
        let bytes = export_xlsx(&rows()).unwrap();
        let strings = read_part(&bytes, "xl/sharedStrings.xml");
        for expected in ["Date", "Status", "Raj Kumar", "N/A", "Client Meeting Lunch", "Pending"] {
            assert!(strings.contains(expected), "missing {}", expected);
        }

        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains("<v>2500</v>"));
    }

    #[test]
    fn test_empty_export_still_has_header() {
        let bytes = export_xlsx(&[]).unwrap();
        let strings = read_part(&bytes, "xl/sharedStrings.xml");
        assert!(strings.contains("Description"));
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains("<row r=\"1\""));
        assert!(!sheet.contains("<row r=\"2\""));
    }
}
