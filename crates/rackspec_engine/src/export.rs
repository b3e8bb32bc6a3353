use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;

use rackspec_core::{SpecField, SpecRecord};

/// MIME type browsers expect for xlsx attachments.
pub const WORKBOOK_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("workbook build failed: {0}")]
    Workbook(#[from] XlsxError),
}

/// One record as a vertical sheet: thirteen rows of header/value pairs.
/// Consumers of per-model downloads read this orientation, so it stays
/// distinct from the bulk layout.
pub fn single_record_workbook(record: &SpecRecord) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let pairs = column_headers().into_iter().zip(row_values(record));
    for (row, (header, value)) in pairs.enumerate() {
        sheet.write_string(row as u32, 0, header)?;
        sheet.write_string(row as u32, 1, value)?;
    }
    Ok(workbook.save_to_buffer()?)
}

/// Every record as a conventional table: one header row, one row per record,
/// thirteen columns.
pub fn record_set_workbook(records: &[SpecRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in column_headers().into_iter().enumerate() {
        sheet.write_string(0, col as u16, header)?;
    }
    for (row, record) in records.iter().enumerate() {
        for (col, value) in row_values(record).into_iter().enumerate() {
            sheet.write_string(row as u32 + 1, col as u16, value)?;
        }
    }
    Ok(workbook.save_to_buffer()?)
}

fn column_headers() -> Vec<&'static str> {
    let mut headers = vec!["Model", "URL", "Date Scraped"];
    headers.extend(SpecField::ALL.iter().map(|field| field.export_header()));
    headers
}

/// Values in header order. Absent fields render as empty cells.
fn row_values(record: &SpecRecord) -> Vec<&str> {
    let mut values = vec![
        record.model_name.as_str(),
        record.url.as_str(),
        record.date_scraped.as_str(),
    ];
    values.extend(
        SpecField::ALL
            .iter()
            .map(|field| record.fields.get(*field).unwrap_or("")),
    );
    values
}

#[cfg(test)]
mod tests {
    use super::column_headers;

    #[test]
    fn headers_lead_with_identity_columns() {
        let headers = column_headers();
        assert_eq!(headers.len(), 13);
        assert_eq!(&headers[..3], ["Model", "URL", "Date Scraped"]);
        assert_eq!(headers[3], "CPU Socket");
        assert_eq!(headers[11], "Drive Bays");
        assert_eq!(headers[12], "M.2 Slots");
    }
}
