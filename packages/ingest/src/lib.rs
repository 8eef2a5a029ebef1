#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library for harvesting monthly statements from a directory of
//! payslip PDFs.
//!
//! Each PDF is processed independently: the earnings table is extracted
//! and reconciled, the share purchases are aggregated, and the result
//! is keyed by the `YYYY-MM` month derived from the issuer's filename.
//! A document that fails aborts the harvest with its file name
//! attached; nothing is partially recorded.

pub mod interactive;
pub mod month;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use payslip_stats_catalog::Catalog;
use payslip_stats_export::ExportError;
use payslip_stats_payslip_models::{
    AlignedTable, MonthlyStatement, RowRecord, ShareSummary, codes,
};
use payslip_stats_pdf::PdfError;
use payslip_stats_reconcile::ReconcileError;
use payslip_stats_reconcile::numeric::parse_decimal;
use regex::Regex;

/// Matches the issuer's default payslip filename, capturing the Danish
/// month name and the year.
static FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Lønseddel - loenseddel([a-z]+)(\d{4}).*\.PDF").expect("valid regex")
});

/// Errors from the harvest pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The input directory does not exist.
    #[error("input directory {} does not exist", .0.display())]
    MissingInputDir(PathBuf),

    /// Listing the input directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A payslip could not be processed. Carries the file name so the
    /// offending document (or missing catalog entry) can be tracked
    /// down.
    #[error("{document}: {source}")]
    Document {
        /// File name of the payslip that failed.
        document: String,
        /// What went wrong.
        source: DocumentError,
    },

    /// Writing an output file failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// The interactive month prompt failed.
    #[error("could not read month: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Reasons a single payslip fails to process.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Table extraction from the PDF failed.
    #[error(transparent)]
    Pdf(#[from] PdfError),

    /// The extracted table could not be reconciled.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

/// Options for a harvest run.
#[derive(Debug, Clone, Copy, Default)]
pub struct HarvestOptions {
    /// Leave the per-article rows out of each statement and keep only
    /// the share totals.
    pub simple: bool,

    /// Ask on the terminal for the month of files whose name does not
    /// match the issuer's pattern. When off, such files are skipped
    /// with a warning.
    pub prompt_for_month: bool,
}

/// Returns the files in `dir` to harvest, sorted by name. Non-PDF files
/// are skipped with a log line.
///
/// # Errors
///
/// Returns [`IngestError`] if the directory does not exist or cannot be
/// listed.
pub fn payslip_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    if !dir.is_dir() {
        return Err(IngestError::MissingInputDir(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let name = file_name(&path);
        if name.to_lowercase().ends_with("pdf") {
            files.push(path);
        } else {
            log::info!("Skipping {name}, not a PDF");
        }
    }
    files.sort();
    Ok(files)
}

/// Parses one payslip PDF into its aligned earnings table.
///
/// # Errors
///
/// Returns [`DocumentError`] if extraction or reconciliation fails.
pub fn parse_payslip(path: &Path, catalog: &Catalog) -> Result<AlignedTable, DocumentError> {
    let raw = payslip_stats_pdf::extract_statement(path)?;
    Ok(payslip_stats_reconcile::reconcile(&raw, catalog)?)
}

/// Harvests one payslip into its `(month, statement)` pair.
///
/// Returns `None` when the month cannot be derived from the filename
/// and prompting is disabled.
///
/// # Errors
///
/// Returns [`IngestError::Document`] when the payslip fails to process,
/// or [`IngestError::Prompt`] when the interactive fallback fails.
pub fn harvest_file(
    path: &Path,
    catalog: &Catalog,
    options: HarvestOptions,
) -> Result<Option<(String, MonthlyStatement)>, IngestError> {
    let name = file_name(path);
    log::info!("Parsing {name}");

    let table = parse_payslip(path, catalog).map_err(|source| IngestError::Document {
        document: name.clone(),
        source,
    })?;

    let month = match month_from_filename(&name) {
        Some(month) => month,
        None if options.prompt_for_month => interactive::prompt_month(&name)?,
        None => {
            log::warn!("Skipping {name}: cannot derive a month from a renamed payslip file");
            return Ok(None);
        }
    };

    log::info!("Parsed {name} as {month}");
    Ok(Some((month.clone(), build_statement(month, &table, options.simple))))
}

/// Harvests every payslip PDF in `dir` into a month-keyed statement
/// map.
///
/// # Errors
///
/// Returns [`IngestError`] if the directory cannot be listed or any
/// document fails to process.
pub fn harvest_directory(
    dir: &Path,
    catalog: &Catalog,
    options: HarvestOptions,
) -> Result<BTreeMap<String, MonthlyStatement>, IngestError> {
    let mut statements = BTreeMap::new();
    for path in payslip_files(dir)? {
        if let Some((month, statement)) = harvest_file(&path, catalog, options)? {
            statements.insert(month, statement);
        }
    }
    log::info!("Harvested {} statement(s) from {}", statements.len(), dir.display());
    Ok(statements)
}

/// Derives the `YYYY-MM` statement key from the issuer's filename.
#[must_use]
pub fn month_from_filename(name: &str) -> Option<String> {
    let captures = FILENAME_RE.captures(name)?;
    let month = month::month_number(&captures[1])?;
    Some(format!("{}-{month:02}", &captures[2]))
}

/// Builds the monthly statement for one aligned table.
#[must_use]
pub fn build_statement(month: String, table: &AlignedTable, simple: bool) -> MonthlyStatement {
    let shares = share_summary(table);

    let mut rows = BTreeMap::new();
    if !simple {
        for row in &table.rows {
            rows.insert(
                row.code.clone(),
                RowRecord {
                    description: row.description.clone(),
                    quantity: cell_value(&row.quantity),
                    rate: cell_value(&row.rate),
                    amount: cell_value(&row.amount),
                },
            );
        }
    }

    MonthlyStatement { month, rows, shares }
}

/// Aggregates the share purchases of one table.
///
/// The employer-matched purchase is counted in shares (the quantity
/// column of the `5092` rows); the additional purchase is the negated
/// amount of the `9221` rows, which the payslip books as a deduction.
#[must_use]
pub fn share_summary(table: &AlignedTable) -> ShareSummary {
    let employer_matched: f64 = table
        .rows_for(codes::EMPLOYER_MATCHED_SHARES)
        .map(|row| parse_decimal(&row.quantity))
        .sum();
    let additional: f64 = -table
        .rows_for(codes::ADDITIONAL_SHARES)
        .map(|row| parse_decimal(&row.amount))
        .sum::<f64>();

    ShareSummary {
        employer_matched,
        additional,
        total: employer_matched + additional,
    }
}

/// Blank cells carry no value; everything else goes through the Danish
/// locale parser.
fn cell_value(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        None
    } else {
        Some(parse_decimal(cell))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use payslip_stats_payslip_models::AlignedRow;

    use super::*;

    fn row(code: &str, quantity: &str, amount: &str) -> AlignedRow {
        AlignedRow {
            code: code.to_owned(),
            quantity: quantity.to_owned(),
            amount: amount.to_owned(),
            ..AlignedRow::default()
        }
    }

    #[test]
    fn month_is_derived_from_the_issuer_filename() {
        assert_eq!(
            month_from_filename("Lønseddel - loenseddelapril2020 (1).PDF"),
            Some("2020-04".to_owned())
        );
        assert_eq!(
            month_from_filename("Lønseddel - loenseddeldecember2019.PDF"),
            Some("2019-12".to_owned())
        );
    }

    #[test]
    fn renamed_files_yield_no_month() {
        assert_eq!(month_from_filename("april2020.PDF"), None);
        assert_eq!(month_from_filename("Lønseddel - loenseddelapril20.PDF"), None);
    }

    #[test]
    fn share_summary_aggregates_both_purchase_kinds() {
        let table = AlignedTable {
            rows: vec![
                row("1000", "160,33", "33.401,15"),
                row("5092", "7,00", "3.678,50"),
                row("9221", "", "-1.200,00"),
            ],
        };

        let shares = share_summary(&table);

        assert!((shares.employer_matched - 7.0).abs() < f64::EPSILON);
        assert!((shares.additional - 1200.0).abs() < f64::EPSILON);
        assert!((shares.total - 1207.0).abs() < f64::EPSILON);
    }

    #[test]
    fn repeated_share_rows_are_summed() {
        let table = AlignedTable {
            rows: vec![row("5092", "7,00", ""), row("5092", "2,00", "")],
        };
        assert!((share_summary(&table).employer_matched - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn statement_rows_parse_blank_cells_to_none() {
        let table = AlignedTable {
            rows: vec![row("9221", "", "-1.200,00")],
        };

        let statement = build_statement("2020-04".to_owned(), &table, false);

        let record = &statement.rows["9221"];
        assert_eq!(record.quantity, None);
        assert_eq!(record.amount, Some(-1200.0));
    }

    #[test]
    fn simple_statements_have_no_rows() {
        let table = AlignedTable {
            rows: vec![row("5092", "7,00", "3.678,50")],
        };

        let statement = build_statement("2020-04".to_owned(), &table, true);

        assert!(statement.rows.is_empty());
        assert!((statement.shares.employer_matched - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_input_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            payslip_files(&missing),
            Err(IngestError::MissingInputDir(path)) if path == missing
        ));
    }

    #[test]
    fn non_pdf_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::write(dir.path().join("a.PDF"), "x").unwrap();
        std::fs::write(dir.path().join("b.pdf"), "x").unwrap();

        let files = payslip_files(dir.path()).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.PDF", "b.pdf"]);
    }

    #[test]
    fn harvesting_a_directory_without_payslips_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let statements =
            harvest_directory(dir.path(), Catalog::builtin(), HarvestOptions::default()).unwrap();

        assert!(statements.is_empty());
    }
}
