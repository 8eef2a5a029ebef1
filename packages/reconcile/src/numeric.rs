//! Danish numeric locale parsing.

/// Parses a Danish-formatted number (`.` as thousands separator, `,`
/// as decimal separator) into a float.
///
/// Malformed input yields `0.0` rather than an error; the reconciler
/// relies on this when probing ambiguous cells, and the aggregation
/// treats unparseable cells as contributing nothing.
#[must_use]
pub fn parse_decimal(raw: &str) -> f64 {
    raw.trim()
        .replace('.', "")
        .replace(',', ".")
        .parse()
        .unwrap_or(0.0)
}
