//! Interactive fallback prompts.
//!
//! Renamed payslip files lose the month and year encoded in the
//! issuer's filename; the harvester asks for them instead of guessing.

use std::sync::LazyLock;

use dialoguer::Input;
use regex::Regex;

/// Accepts `YYYY-MM` with a valid month.
static MONTH_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid regex"));

/// Asks for the `YYYY-MM` month of a payslip whose filename does not
/// match the issuer's pattern.
///
/// # Errors
///
/// Returns [`dialoguer::Error`] when the terminal interaction fails.
pub fn prompt_month(file_name: &str) -> Result<String, dialoguer::Error> {
    println!("Please do not rename the payslip files.");
    println!("Found the following file: {file_name}");

    Input::new()
        .with_prompt("What is the month of this file? (YYYY-MM) ex: 2019-01")
        .validate_with(|value: &String| {
            if MONTH_KEY_RE.is_match(value) {
                Ok(())
            } else {
                Err("expected YYYY-MM, e.g. 2019-01")
            }
        })
        .interact_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_key_pattern_accepts_valid_months() {
        assert!(MONTH_KEY_RE.is_match("2019-01"));
        assert!(MONTH_KEY_RE.is_match("2020-12"));
    }

    #[test]
    fn month_key_pattern_rejects_invalid_input() {
        assert!(!MONTH_KEY_RE.is_match("2019-13"));
        assert!(!MONTH_KEY_RE.is_match("2019-0"));
        assert!(!MONTH_KEY_RE.is_match("19-01"));
        assert!(!MONTH_KEY_RE.is_match("april 2019"));
    }
}
