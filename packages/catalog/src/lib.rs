#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Article-code catalog — the reference data driving row reconciliation.
//!
//! Every article code that can appear on a payslip has a catalog entry
//! describing its structural shape: how many description lines one row
//! of the code spans, and which of the quantity/rate/amount columns a
//! row of the code normally prints a value in. The built-in catalog is
//! baked into the binary from [`catalog.toml`](../catalog.toml) at
//! compile time; adding a new code is a one-entry edit there.
//!
//! The catalog is read-only reference data: it is parsed once, up
//! front, and consulted per row during reconciliation. Codes missing
//! from it are a fatal condition for the document that uses them, never
//! something to guess around.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;

/// The catalog TOML embedded at compile time.
const CATALOG_TOML: &str = include_str!("../catalog.toml");

/// Errors raised while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog TOML is malformed.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// An entry violates a catalog invariant.
    #[error("code {code}: description_lines must be at least 1")]
    InvalidEntry {
        /// The offending article code.
        code: String,
    },
}

/// Structural shape of the rows carrying one article code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    /// Human-readable name of the article, as printed on the payslip.
    pub label: String,

    /// Number of consecutive raw description lines that belong to a
    /// single row of this code. Greater than 1 for articles whose
    /// description cell wraps (e.g. a leave entry spanning a label plus
    /// two dates). Always at least 1.
    #[serde(default = "default_description_lines")]
    pub description_lines: usize,

    /// Whether a row of this code normally prints a quantity.
    #[serde(default)]
    pub has_quantity: bool,

    /// Whether a row of this code normally prints a rate.
    #[serde(default)]
    pub has_rate: bool,

    /// Whether a row of this code normally prints an amount.
    #[serde(default)]
    pub has_amount: bool,
}

const fn default_description_lines() -> usize {
    1
}

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    codes: BTreeMap<String, CatalogEntry>,
}

/// A complete article-code catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    codes: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    /// Parses a catalog from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the TOML is malformed or an entry
    /// declares zero description lines.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        for (code, entry) in &file.codes {
            if entry.description_lines == 0 {
                return Err(CatalogError::InvalidEntry { code: code.clone() });
            }
        }
        Ok(Self { codes: file.codes })
    }

    /// Returns the built-in catalog parsed from the embedded TOML.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (a compile-time
    /// guarantee, since the file ships inside the binary).
    #[must_use]
    pub fn builtin() -> &'static Self {
        static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
            Catalog::from_toml_str(CATALOG_TOML)
                .unwrap_or_else(|e| panic!("Failed to parse catalog.toml: {e}"))
        });
        &BUILTIN
    }

    /// Looks up the entry for an article code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CatalogEntry> {
        self.codes.get(code)
    }

    /// Whether the catalog knows the given code.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    /// Number of cataloged codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates over all cataloged codes in order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn builtin_covers_business_rule_codes() {
        let catalog = Catalog::builtin();
        for code in ["5092", "9221", "8906", "9993", "9990", "8720", "8721"] {
            assert!(catalog.contains(code), "missing entry for {code}");
        }
    }

    #[test]
    fn builtin_entries_are_well_formed() {
        for code in Catalog::builtin().codes() {
            let entry = Catalog::builtin().get(code).unwrap();
            assert!(!entry.label.is_empty(), "{code}: empty label");
            assert!(
                entry.description_lines >= 1,
                "{code}: zero description lines"
            );
        }
    }

    #[test]
    fn description_lines_defaults_to_one() {
        let catalog = Catalog::from_toml_str(
            r#"
            [codes.1234]
            label = "Test"
            has_amount = true
            "#,
        )
        .unwrap();
        assert_eq!(catalog.get("1234").unwrap().description_lines, 1);
    }

    #[test]
    fn rejects_zero_description_lines() {
        let result = Catalog::from_toml_str(
            r#"
            [codes.1234]
            label = "Test"
            description_lines = 0
            "#,
        );
        assert!(matches!(
            result,
            Err(CatalogError::InvalidEntry { code }) if code == "1234"
        ));
    }

    #[test]
    fn unknown_code_lookup_is_none() {
        assert!(Catalog::builtin().get("0000").is_none());
    }
}
