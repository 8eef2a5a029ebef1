//! Full statement dump as an XML document.

use std::collections::BTreeMap;
use std::path::Path;

use payslip_stats_payslip_models::MonthlyStatement;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::ExportError;

fn xml_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Xml(e.to_string())
}

pub(crate) fn write(
    path: &Path,
    statements: &BTreeMap<String, MonthlyStatement>,
) -> Result<(), ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("statements")))
        .map_err(xml_err)?;

    for (month, statement) in statements {
        let mut opening = BytesStart::new("statement");
        opening.push_attribute(("month", month.as_str()));
        writer
            .write_event(Event::Start(opening))
            .map_err(xml_err)?;

        element(
            &mut writer,
            "employer_matched",
            &statement.shares.employer_matched.to_string(),
        )?;
        element(
            &mut writer,
            "additional",
            &statement.shares.additional.to_string(),
        )?;
        element(&mut writer, "total", &statement.shares.total.to_string())?;

        for (code, row) in &statement.rows {
            let mut opening = BytesStart::new("row");
            opening.push_attribute(("code", code.as_str()));
            writer
                .write_event(Event::Start(opening))
                .map_err(xml_err)?;

            element(&mut writer, "description", &row.description)?;
            if let Some(quantity) = row.quantity {
                element(&mut writer, "quantity", &quantity.to_string())?;
            }
            if let Some(rate) = row.rate {
                element(&mut writer, "rate", &rate.to_string())?;
            }
            if let Some(amount) = row.amount {
                element(&mut writer, "amount", &amount.to_string())?;
            }

            writer
                .write_event(Event::End(BytesEnd::new("row")))
                .map_err(xml_err)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("statement")))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("statements")))
        .map_err(xml_err)?;

    std::fs::write(path, writer.into_inner())?;
    Ok(())
}

/// Writes one `<name>text</name>` element.
fn element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), ExportError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)?;
    Ok(())
}
