#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared data model for the payslip toolchain.
//!
//! This crate defines the types that flow between the extraction,
//! reconciliation, aggregation, and export stages: the raw per-column
//! text blocks as the extraction engine produces them, the reconciled
//! aligned table, and the monthly statement handed to the output
//! writers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub mod codes;

/// The five columns of the payslip earnings table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Column {
    /// Article code ("Art"), the row-identifying key.
    Code,
    /// Free-text specification of the row ("Specifikation").
    Description,
    /// Quantity ("Antal"), e.g. hours or share count.
    Quantity,
    /// Unit rate ("Sats").
    Rate,
    /// Booked amount ("Beløb").
    Amount,
}

/// The raw per-column text blocks of one earnings table, exactly as the
/// extraction engine emitted them.
///
/// Each block holds newline-separated cell values. The lines are
/// supposed to align row-by-row across the five blocks but frequently
/// do not: empty cells drop their line and wrapped cells add extra
/// ones, independently per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawColumns {
    /// Article code block.
    pub code: String,
    /// Description block.
    pub description: String,
    /// Quantity block.
    pub quantity: String,
    /// Rate block.
    pub rate: String,
    /// Amount block.
    pub amount: String,
}

/// One reconciled row of the earnings table: the article code paired
/// with exactly one (possibly blank) value from each other column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRow {
    /// Article code identifying the row.
    pub code: String,
    /// Description, with wrapped lines merged back into one entry.
    pub description: String,
    /// Quantity cell; blank when the row carries none.
    pub quantity: String,
    /// Rate cell; blank when the row carries none.
    pub rate: String,
    /// Amount cell; blank when the row carries none.
    pub amount: String,
}

/// The reconciled earnings table, index-aligned with the code column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedTable {
    /// Rows in document order.
    pub rows: Vec<AlignedRow>,
}

impl AlignedTable {
    /// Number of rows in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over the rows carrying the given article code.
    pub fn rows_for<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a AlignedRow> {
        self.rows.iter().filter(move |row| row.code == code)
    }
}

/// One article row of a monthly statement, with cell values parsed from
/// the Danish number format. Blank cells become `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    /// Row description.
    pub description: String,
    /// Parsed quantity, if the row carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Parsed rate, if the row carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    /// Parsed amount, if the row carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Aggregated share purchases of one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShareSummary {
    /// Shares bought through the employer match (up to 2.5% of salary).
    pub employer_matched: f64,
    /// Shares bought with the employee's own additional contribution.
    pub additional: f64,
    /// Sum of the two.
    pub total: f64,
}

/// Everything harvested from one payslip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStatement {
    /// Statement month as `YYYY-MM`.
    pub month: String,
    /// Article rows keyed by code. Empty in share-totals-only runs.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rows: BTreeMap<String, RowRecord>,
    /// Aggregated share purchases.
    pub shares: ShareSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, quantity: &str) -> AlignedRow {
        AlignedRow {
            code: code.to_owned(),
            quantity: quantity.to_owned(),
            ..AlignedRow::default()
        }
    }

    #[test]
    fn rows_for_filters_by_code() {
        let table = AlignedTable {
            rows: vec![row("1000", "160,33"), row("5092", "7,00"), row("5092", "1,00")],
        };
        let quantities: Vec<&str> = table
            .rows_for("5092")
            .map(|r| r.quantity.as_str())
            .collect();
        assert_eq!(quantities, ["7,00", "1,00"]);
    }

    #[test]
    fn column_display_is_snake_case() {
        assert_eq!(Column::Description.to_string(), "description");
        assert_eq!(Column::Amount.to_string(), "amount");
    }
}
