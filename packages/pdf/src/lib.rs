#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Earnings-table extraction from payslip PDFs.
//!
//! The salary PDFs lay the earnings table out as five visually aligned
//! columns. Text extraction ([`pdf_extract`]) flattens the page back to
//! plain lines; [`table`] then locates the table by its header captions,
//! derives the column offsets from the caption positions, and slices
//! the body lines back into the five per-column blocks the reconciler
//! expects.

pub mod table;

use std::path::Path;

use payslip_stats_payslip_models::RawColumns;

/// Errors specific to payslip PDF extraction.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF text extraction failed.
    #[error("PDF extraction error: {0}")]
    Extraction(String),

    /// The page carries no recognizable earnings table.
    #[error("no earnings table found in {file}")]
    MissingTable {
        /// The file that was searched.
        file: String,
    },
}

/// Extracts the five raw column blocks of the earnings table from a
/// payslip PDF.
///
/// Only the first table on the page is used; the payslip's trailing
/// summary table is ignored.
///
/// # Errors
///
/// Returns [`PdfError`] if the file cannot be read, text extraction
/// fails, or no earnings table is found.
pub fn extract_statement(path: &Path) -> Result<RawColumns, PdfError> {
    let bytes = std::fs::read(path)?;

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| PdfError::Extraction(format!("failed to extract text from PDF: {e}")))?;

    log::debug!(
        "Extracted {} characters of text from {}",
        text.len(),
        path.display()
    );

    table::slice_columns(&text).ok_or_else(|| PdfError::MissingTable {
        file: path.display().to_string(),
    })
}
