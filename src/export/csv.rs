//! CSV encoder for claim exports

use crate::error::{ClaimsError, ClaimsResult};

use super::{ExportRow, HEADERS};

/// Header plus one record per row
pub fn export_csv(rows: &[ExportRow]) -> ClaimsResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(HEADERS)?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }

    writer
        .into_inner()
        .map_err(|e| ClaimsError::Export(e.to_string()))
}
