//! Full statement dump as pretty-printed JSON.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use payslip_stats_payslip_models::MonthlyStatement;

use crate::ExportError;

pub(crate) fn write(
    path: &Path,
    statements: &BTreeMap<String, MonthlyStatement>,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), statements)?;
    Ok(())
}
