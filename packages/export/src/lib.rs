#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Output serialization for harvested payslip statements.
//!
//! One writer per format behind a single [`OutputFormat`] dispatch:
//! a month-by-month CSV summary of the share purchases, and full
//! statement dumps as JSON, TOML, XML, or MessagePack.

mod csv_summary;
mod json;
mod msgpack;
mod toml_out;
mod xml;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use payslip_stats_payslip_models::MonthlyStatement;
use strum_macros::{AsRefStr, Display, EnumString};

/// Errors that can occur while writing an output file.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization failed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// XML serialization failed.
    #[error("XML error: {0}")]
    Xml(String),

    /// MessagePack serialization failed.
    #[error("MessagePack error: {0}")]
    MessagePack(#[from] rmp_serde::encode::Error),
}

/// Supported output formats.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Month-by-month share summary, one line per statement.
    Csv,
    /// Full statement map, pretty-printed.
    Json,
    /// Full statement map as a TOML document.
    Toml,
    /// Full statement map as an XML document.
    Xml,
    /// Full statement map as a MessagePack binary dump.
    Msgpack,
}

impl OutputFormat {
    /// All supported formats.
    pub const ALL: &[Self] = &[Self::Csv, Self::Json, Self::Toml, Self::Xml, Self::Msgpack];

    /// Canonical file extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Xml => "xml",
            Self::Msgpack => "msgpack",
        }
    }
}

/// Decimal rendering for the CSV summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// Decimal comma (`1234,56`).
    #[default]
    Danish,
    /// Decimal point (`1234.56`).
    English,
}

impl NumberFormat {
    /// Renders a number in this locale.
    #[must_use]
    pub fn render(self, value: f64) -> String {
        let plain = value.to_string();
        match self {
            Self::English => plain,
            Self::Danish => plain.replace('.', ","),
        }
    }
}

/// Writes the statements to `path` in the given format, appending the
/// format's canonical extension when the path has none.
///
/// Returns the path actually written.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or the file write fails.
pub fn write_statements(
    format: OutputFormat,
    statements: &BTreeMap<String, MonthlyStatement>,
    path: &Path,
    numbers: NumberFormat,
) -> Result<PathBuf, ExportError> {
    let path = output_path(path, format);

    match format {
        OutputFormat::Csv => csv_summary::write(&path, statements, numbers)?,
        OutputFormat::Json => json::write(&path, statements)?,
        OutputFormat::Toml => toml_out::write(&path, statements)?,
        OutputFormat::Xml => xml::write(&path, statements)?,
        OutputFormat::Msgpack => msgpack::write(&path, statements)?,
    }

    log::info!(
        "Wrote {} statement(s) to {} as {format}",
        statements.len(),
        path.display()
    );
    Ok(path)
}

/// Appends the format's extension when the output path has none.
fn output_path(path: &Path, format: OutputFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    }
}
