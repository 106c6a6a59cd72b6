use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use super::domain::{Beneficiary, BeneficiaryRegistration};
use super::repository::BeneficiaryRepository;
use super::service::BeneficiaryService;
use crate::programs::audit::AuditLog;

#[derive(Debug)]
pub enum BeneficiaryImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BeneficiaryImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BeneficiaryImportError::Io(err) => {
                write!(f, "failed to read beneficiary export: {}", err)
            }
            BeneficiaryImportError::Csv(err) => write!(f, "invalid beneficiary CSV data: {}", err),
        }
    }
}

impl std::error::Error for BeneficiaryImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BeneficiaryImportError::Io(err) => Some(err),
            BeneficiaryImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BeneficiaryImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BeneficiaryImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Row that could not be parsed or that the service refused, with its 1-based
/// data row number.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRow {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Default, Serialize)]
pub struct ImportSummary {
    pub registered: Vec<Beneficiary>,
    pub rejected: Vec<RejectedRow>,
}

/// Parsed export. Rows with malformed cells are kept aside instead of failing
/// the whole file.
#[derive(Debug, Default)]
pub struct CsvExport {
    pub rows: Vec<(usize, BeneficiaryRegistration)>,
    pub malformed: Vec<RejectedRow>,
}

/// Bulk registration from a CSV export whose header matches the registration fields.
pub struct BeneficiaryCsvImporter;

impl BeneficiaryCsvImporter {
    pub fn read_path<P: AsRef<Path>>(path: P) -> Result<CsvExport, BeneficiaryImportError> {
        let file = std::fs::File::open(path)?;
        Self::read(file)
    }

    /// Fails only when the source cannot be read; a bad cell rejects its row.
    pub fn read<R: Read>(reader: R) -> Result<CsvExport, BeneficiaryImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut export = CsvExport::default();
        for (index, row) in csv_reader.deserialize::<BeneficiaryRegistration>().enumerate() {
            let row_number = index + 1;
            match row {
                Ok(registration) => export.rows.push((row_number, registration)),
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => {
                    warn!(row = row_number, error = %err, "malformed beneficiary row");
                    export.malformed.push(RejectedRow {
                        row: row_number,
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok(export)
    }

    /// Registers every row through the service so each one is validated and scored.
    pub fn register_all<R, L>(
        service: &BeneficiaryService<R, L>,
        export: CsvExport,
    ) -> ImportSummary
    where
        R: BeneficiaryRepository + 'static,
        L: AuditLog + 'static,
    {
        let mut summary = ImportSummary {
            registered: Vec::new(),
            rejected: export.malformed,
        };
        for (row, registration) in export.rows {
            match service.register(registration) {
                Ok(beneficiary) => summary.registered.push(beneficiary),
                Err(err) => {
                    warn!(row, error = %err, "skipping beneficiary row");
                    summary.rejected.push(RejectedRow {
                        row,
                        reason: err.to_string(),
                    });
                }
            }
        }
        summary.rejected.sort_by_key(|rejected| rejected.row);
        summary
    }
}
