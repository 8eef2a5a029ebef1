//! Column splitting for raw extracted table blocks.
//!
//! Splitting is a pure transformation: the code, quantity, rate and
//! amount blocks keep every line verbatim (blank lines are placeholders
//! already present in the source), while the description block drops
//! blank and dash filler lines that the extraction engine emits for
//! empty cells.

use payslip_stats_payslip_models::RawColumns;

/// Filler the extraction engine emits for empty description cells.
const DESCRIPTION_PLACEHOLDER: &str = "-";

/// The five per-column line sequences of one earnings table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    /// Article codes, one per row. Ground truth for row boundaries.
    pub code: Vec<String>,
    /// Description lines, filler removed.
    pub description: Vec<String>,
    /// Quantity lines, verbatim.
    pub quantity: Vec<String>,
    /// Rate lines, verbatim.
    pub rate: Vec<String>,
    /// Amount lines, verbatim.
    pub amount: Vec<String>,
}

impl Columns {
    /// Joins `lines` consecutive description entries starting at
    /// `index` into a single space-separated entry.
    ///
    /// A run reaching past the end of the column is clamped; the
    /// shortfall surfaces in the final length check.
    pub(crate) fn merge_description(&mut self, index: usize, lines: usize) {
        let end = (index + lines).min(self.description.len());
        if index >= end {
            return;
        }
        let merged = self.description[index..end].join(" ");
        self.description.splice(index..end, std::iter::once(merged));
    }
}

/// Splits the five raw column blocks into line sequences.
#[must_use]
pub fn split_columns(raw: &RawColumns) -> Columns {
    Columns {
        code: verbatim_lines(&raw.code),
        description: raw
            .description
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty() && *line != DESCRIPTION_PLACEHOLDER)
            .map(ToOwned::to_owned)
            .collect(),
        quantity: verbatim_lines(&raw.quantity),
        rate: verbatim_lines(&raw.rate),
        amount: verbatim_lines(&raw.amount),
    }
}

/// Splits a block on line breaks, keeping every substring (including
/// empty ones) in order.
fn verbatim_lines(block: &str) -> Vec<String> {
    block.split('\n').map(ToOwned::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(description: &str, amount: &str) -> RawColumns {
        RawColumns {
            code: "1000\n7015".to_owned(),
            description: description.to_owned(),
            quantity: "160,33".to_owned(),
            rate: String::new(),
            amount: amount.to_owned(),
        }
    }

    #[test]
    fn description_drops_blank_and_dash_lines() {
        let columns = split_columns(&raw("Skalaløn\n-\n  \nA-skat", "1\n2"));
        assert_eq!(columns.description, ["Skalaløn", "A-skat"]);
    }

    #[test]
    fn description_lines_are_trimmed() {
        let columns = split_columns(&raw("  Skalaløn  \nA-skat", "1\n2"));
        assert_eq!(columns.description, ["Skalaløn", "A-skat"]);
    }

    #[test]
    fn other_columns_keep_blank_lines() {
        let columns = split_columns(&raw("Skalaløn", "33.401,15\n\n-8.100,00"));
        assert_eq!(columns.amount, ["33.401,15", "", "-8.100,00"]);
        // An empty block still holds one (empty) placeholder entry.
        assert_eq!(columns.rate, [""]);
    }

    #[test]
    fn splitting_is_idempotent() {
        let input = raw("Skalaløn\n-\nA-skat", "1\n\n2");
        assert_eq!(split_columns(&input), split_columns(&input));
    }

    #[test]
    fn merge_joins_consecutive_entries() {
        let mut columns = split_columns(&RawColumns {
            code: "2260".to_owned(),
            description: "Orlov u/løn og feriedage\n06/04-2020\n06/04-2020".to_owned(),
            quantity: "5,00".to_owned(),
            rate: String::new(),
            amount: String::new(),
        });
        columns.merge_description(0, 3);
        assert_eq!(
            columns.description,
            ["Orlov u/løn og feriedage 06/04-2020 06/04-2020"]
        );
    }

    #[test]
    fn merge_clamps_overlong_runs() {
        let mut columns = Columns {
            description: vec!["a".to_owned(), "b".to_owned()],
            ..Columns::default()
        };
        columns.merge_description(1, 5);
        assert_eq!(columns.description, ["a", "b"]);
    }
}
