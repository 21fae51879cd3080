use std::path::Path;

use tracing::debug;

use crate::error::{AuditError, Result};

/// Decodes each field on its own so a non-UTF-8 byte only garbles that cell.
fn cells(record: &csv::ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}

/// Header plus data rows of a grade sheet, as text cells in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl GradeSheet {
    /// Returns `None` when the input holds no records at all.
    pub fn from_reader<R: std::io::Read>(input: R) -> csv::Result<Option<Self>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);

        let mut records = reader.byte_records();
        let headers = match records.next() {
            Some(record) => cells(&record?),
            None => return Ok(None),
        };

        let mut rows = Vec::new();
        for record in records {
            rows.push(cells(&record?));
        }

        Ok(Some(Self { headers, rows }))
    }
}

pub fn read_sheet(path: &Path) -> Result<GradeSheet> {
    let sheet_err = |source| AuditError::Sheet {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path)
        .map_err(csv::Error::from)
        .map_err(sheet_err)?;
    let sheet = GradeSheet::from_reader(file)
        .map_err(sheet_err)?
        .ok_or_else(|| AuditError::MissingHeader(path.to_path_buf()))?;

    debug!(path = %path.display(), rows = sheet.rows.len(), "Grade sheet loaded");
    Ok(sheet)
}
