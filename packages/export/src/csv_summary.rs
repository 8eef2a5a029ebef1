//! Month-by-month share summary as CSV.
//!
//! One line per statement with the aggregated share purchases. The
//! per-article rows are deliberately not flattened into CSV; the full
//! dumps (JSON/TOML/XML/MessagePack) carry those.

use std::collections::BTreeMap;
use std::path::Path;

use payslip_stats_payslip_models::MonthlyStatement;

use crate::{ExportError, NumberFormat};

const HEADERS: [&str; 4] = ["month", "employer_matched", "additional", "total"];

pub(crate) fn write(
    path: &Path,
    statements: &BTreeMap<String, MonthlyStatement>,
    numbers: NumberFormat,
) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADERS)?;

    for (month, statement) in statements {
        writer.write_record([
            month.clone(),
            numbers.render(statement.shares.employer_matched),
            numbers.render(statement.shares.additional),
            numbers.render(statement.shares.total),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::sample_statements;

    #[test]
    fn writes_one_line_per_month_plus_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        write(&path, &sample_statements(), NumberFormat::English).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "month,employer_matched,additional,total");
        assert_eq!(lines[1], "2020-04,7,1200,1207");
    }

    #[test]
    fn danish_format_uses_decimal_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        let mut statements = sample_statements();
        statements.get_mut("2020-04").unwrap().shares.total = 1207.5;

        write(&path, &statements, NumberFormat::Danish).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"1207,5\""), "got: {contents}");
    }
}
