//! Per-row reconciliation decisions.
//!
//! Each row's corrections are expressed as [`Decision`] values and
//! applied through one uniform routine, instead of mutating the columns
//! ad hoc at every branch.

use payslip_stats_catalog::CatalogEntry;
use payslip_stats_payslip_models::codes;

use crate::ReconcileError;
use crate::exceptions;
use crate::split::Columns;

/// A single structural correction applied to the column sequences at a
/// row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Join this many consecutive description lines into the row's one
    /// description entry.
    MergeDescription {
        /// Number of raw lines belonging to the row.
        lines: usize,
    },
    /// The row carries no quantity; insert a blank quantity entry.
    InsertQuantity,
    /// The row carries no rate; insert a blank rate entry.
    InsertRate,
    /// The row carries no amount; insert a blank amount entry.
    InsertAmount {
        /// Whether the insertion was made under an ambiguous business
        /// rule and may be undone by the final length check.
        uncertain: bool,
    },
}

impl Decision {
    /// Applies this decision to the columns at `index`.
    pub(crate) fn apply(self, columns: &mut Columns, index: usize) {
        match self {
            Self::MergeDescription { lines } => columns.merge_description(index, lines),
            Self::InsertQuantity => insert_blank(&mut columns.quantity, index),
            Self::InsertRate => insert_blank(&mut columns.rate, index),
            Self::InsertAmount { .. } => insert_blank(&mut columns.amount, index),
        }
    }
}

/// Inserts a blank entry at `index`. Positions past the end land at the
/// end; the final length check reports the underlying misalignment.
fn insert_blank(column: &mut Vec<String>, index: usize) {
    let at = index.min(column.len());
    column.insert(at, String::new());
}

/// Reconciles one row: applies the catalog-driven structural decisions,
/// then evaluates the amount exceptions against the updated columns
/// (so they see the merged description).
///
/// Returns the row index as an uncertain-insertion marker when a blank
/// amount was inserted under an ambiguous business rule.
pub(crate) fn reconcile_row(
    code: &str,
    entry: &CatalogEntry,
    index: usize,
    columns: &mut Columns,
) -> Result<Option<usize>, ReconcileError> {
    if entry.description_lines > 1 {
        log::debug!(
            "Joining {} description lines for {code}",
            entry.description_lines
        );
        Decision::MergeDescription {
            lines: entry.description_lines,
        }
        .apply(columns, index);
    }

    if !entry.has_quantity {
        log::debug!("Inserting blank quantity for {code}");
        Decision::InsertQuantity.apply(columns, index);
    }

    if !entry.has_rate || repeated_rate_code(code, index, &columns.code) {
        log::debug!("Inserting blank rate for {code}");
        Decision::InsertRate.apply(columns, index);
    }

    let verdict = exceptions::evaluate(code, index, columns)?;
    if !entry.has_amount || verdict.insert_blank {
        log::debug!("Inserting blank amount for {code}");
        Decision::InsertAmount {
            uncertain: verdict.uncertain,
        }
        .apply(columns, index);
        if verdict.uncertain {
            return Ok(Some(index));
        }
    }

    Ok(None)
}

/// Whether `code` carries its rate only on the first occurrence and
/// this occurrence, at or before `index`, is a repeat.
fn repeated_rate_code(code: &str, index: usize, code_column: &[String]) -> bool {
    codes::RATE_ON_FIRST_OCCURRENCE_ONLY.contains(&code)
        && code_column[..=index]
            .iter()
            .filter(|c| c.as_str() == code)
            .count()
            > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_blank_clamps_to_column_end() {
        let mut column = vec!["a".to_owned()];
        insert_blank(&mut column, 5);
        assert_eq!(column, ["a", ""]);
    }

    #[test]
    fn first_occurrence_is_not_a_repeat() {
        let code_column = vec!["8720".to_owned(), "8720".to_owned()];
        assert!(!repeated_rate_code("8720", 0, &code_column));
        assert!(repeated_rate_code("8720", 1, &code_column));
    }

    #[test]
    fn only_listed_codes_repeat() {
        let code_column = vec!["1000".to_owned(), "1000".to_owned()];
        assert!(!repeated_rate_code("1000", 1, &code_column));
    }
}
