//! Full statement dump as a MessagePack binary.
//!
//! Maps are encoded with field names (`to_vec_named`) so the dump stays
//! readable by other MessagePack tooling, not just this crate.

use std::collections::BTreeMap;
use std::path::Path;

use payslip_stats_payslip_models::MonthlyStatement;

use crate::ExportError;

pub(crate) fn write(
    path: &Path,
    statements: &BTreeMap<String, MonthlyStatement>,
) -> Result<(), ExportError> {
    let encoded = rmp_serde::to_vec_named(statements)?;
    std::fs::write(path, encoded)?;
    Ok(())
}
