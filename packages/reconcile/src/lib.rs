#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Row reconciliation for extracted payslip tables.
//!
//! The extraction engine emits five parallel column blocks whose lines
//! frequently fail to align: empty cells drop their line and wrapped
//! cells add extra ones, independently per column. This crate rebuilds
//! the aligned table by walking the code column as ground truth and
//! consulting the article catalog for which columns each code actually
//! carries — inserting blank placeholders and merging wrapped
//! description lines until every column has exactly one entry per row.
//!
//! Two business exceptions (the zero benefit tax and the
//! transfer/awaiting-payout pair) can force a blank amount that the
//! catalog cannot predict. Such insertions are
//! recorded as *uncertain* and the final consistency check may undo the
//! most recent one when it is what broke the column lengths. A table is
//! reconciled atomically: the caller gets the aligned table or an
//! error, never a partial result.

pub mod numeric;
pub mod split;

mod exceptions;
mod row;

use payslip_stats_catalog::Catalog;
use payslip_stats_payslip_models::{AlignedRow, AlignedTable, Column, RawColumns};

pub use row::Decision;
pub use split::{Columns, split_columns};

/// Errors raised while reconciling one table. All of them abort the
/// document.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// A code in the table has no catalog entry. New codes must be
    /// added to the catalog; they are never guessed at runtime.
    #[error("code {code} not found in the article catalog")]
    UnknownCode {
        /// The unrecognized article code.
        code: String,
    },

    /// An exception-bearing row's description does not have the shape
    /// its code requires, which means the row alignment itself is off.
    #[error("row {index} ({code}): expected a benefit-tax description, found {description:?}")]
    MalformedRow {
        /// The article code whose exception was being evaluated.
        code: String,
        /// Row index in the code column.
        index: usize,
        /// The description actually found at that row.
        description: String,
    },

    /// A column ended up with a different number of entries than the
    /// code column.
    #[error("{column} column has {actual} entries where the code column has {expected}")]
    Alignment {
        /// The misaligned column.
        column: Column,
        /// Entry count of the code column.
        expected: usize,
        /// Entry count of the misaligned column.
        actual: usize,
    },
}

/// Reconciles the five raw column blocks into an aligned table.
///
/// Walks the code column left to right, applying the catalog-driven
/// corrections and business exceptions per row, then verifies that all
/// five columns came out the same length. A single uncertain blank
/// amount may be deleted again when the amount column alone is off by
/// it.
///
/// # Errors
///
/// Returns [`ReconcileError`] when a code is missing from the catalog,
/// an exception-bearing row is malformed, or the columns cannot be
/// brought to equal length.
pub fn reconcile(raw: &RawColumns, catalog: &Catalog) -> Result<AlignedTable, ReconcileError> {
    let mut columns = split::split_columns(raw);
    log::info!("Reconciling table with {} rows", columns.code.len());

    // At most one uncertain insertion is tracked; only the most recent
    // matters for the corrective deletion below.
    let mut uncertain: Option<usize> = None;

    for index in 0..columns.code.len() {
        let code = columns.code[index].clone();
        let entry = catalog
            .get(&code)
            .ok_or_else(|| ReconcileError::UnknownCode { code: code.clone() })?;
        if let Some(marker) = row::reconcile_row(&code, entry, index, &mut columns)? {
            uncertain = Some(marker);
        }
    }

    check_alignment(&mut columns, uncertain)?;
    Ok(into_table(columns))
}

/// Verifies that every column matches the code column's length, undoing
/// the uncertain amount insertion when that alone restores the count.
fn check_alignment(columns: &mut Columns, uncertain: Option<usize>) -> Result<(), ReconcileError> {
    let expected = columns.code.len();

    for (column, actual) in [
        (Column::Description, columns.description.len()),
        (Column::Quantity, columns.quantity.len()),
        (Column::Rate, columns.rate.len()),
    ] {
        if actual != expected {
            return Err(ReconcileError::Alignment {
                column,
                expected,
                actual,
            });
        }
    }

    if columns.amount.len() != expected {
        let Some(index) = uncertain.filter(|&index| index < columns.amount.len()) else {
            return Err(ReconcileError::Alignment {
                column: Column::Amount,
                expected,
                actual: columns.amount.len(),
            });
        };
        log::info!(
            "Amount column has {} entries, expected {expected}; removing the uncertain blank at row {index}",
            columns.amount.len()
        );
        columns.amount.remove(index);
        if columns.amount.len() != expected {
            return Err(ReconcileError::Alignment {
                column: Column::Amount,
                expected,
                actual: columns.amount.len(),
            });
        }
        log::info!("Removing the uncertain blank restored alignment");
    }

    Ok(())
}

/// Zips the equal-length columns into the aligned table.
fn into_table(columns: Columns) -> AlignedTable {
    let Columns {
        code,
        description,
        quantity,
        rate,
        amount,
    } = columns;

    let rows = code
        .into_iter()
        .zip(description)
        .zip(quantity)
        .zip(rate)
        .zip(amount)
        .map(
            |((((code, description), quantity), rate), amount)| AlignedRow {
                code,
                description,
                quantity,
                rate,
                amount,
            },
        )
        .collect();

    AlignedTable { rows }
}
