//! Full statement dump as a TOML document.

use std::collections::BTreeMap;
use std::path::Path;

use payslip_stats_payslip_models::MonthlyStatement;

use crate::ExportError;

pub(crate) fn write(
    path: &Path,
    statements: &BTreeMap<String, MonthlyStatement>,
) -> Result<(), ExportError> {
    let rendered = toml::to_string_pretty(statements)?;
    std::fs::write(path, rendered)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::sample_statements;

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statements.toml");
        let statements = sample_statements();

        write(&path, &statements).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, MonthlyStatement> = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, statements);
    }
}
