//! Business exceptions for the amount column.
//!
//! A couple of article codes legitimately print a blank amount under
//! conditions the catalog flags cannot express. Each exception is a
//! handler registered for one code, given read access to the column
//! sequences built so far. Ambiguous verdicts are marked uncertain so
//! the final length check can undo the insertion if it turns out to be
//! wrong.

use std::sync::LazyLock;

use payslip_stats_payslip_models::codes;
use regex::Regex;

use crate::ReconcileError;
use crate::split::Columns;

/// Matches the benefit-tax description, capturing the taxed value.
static BENEFIT_TAX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Skat af (.*)").expect("valid regex"));

/// Strips a deduction suffix that the extraction engine occasionally
/// folds into the same cell as the taxed value.
static DEDUCTION_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.*) Fradrag:.*").expect("valid regex"));

/// Verdict of the exception evaluation for one row's amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ExceptionVerdict {
    /// Insert a blank amount even if the catalog says the row has one.
    pub insert_blank: bool,
    /// The insertion is ambiguous and must be recorded as the uncertain
    /// marker.
    pub uncertain: bool,
}

impl ExceptionVerdict {
    const SKIP: Self = Self {
        insert_blank: false,
        uncertain: false,
    };

    const INSERT_UNCERTAIN: Self = Self {
        insert_blank: true,
        uncertain: true,
    };
}

/// An amount-column exception registered for a single article code.
trait AmountException: Sync {
    /// The article code this handler fires for.
    fn code(&self) -> &'static str;

    /// Evaluates the exception at `index`.
    fn evaluate(&self, index: usize, columns: &Columns)
    -> Result<ExceptionVerdict, ReconcileError>;
}

/// `8906`: the benefit tax can be zero when no taxable benefit was paid
/// out that month, in which case the amount cell is legitimately blank.
/// Whether it actually is blank cannot be told apart from an extraction
/// gap, hence the uncertain verdict.
struct ZeroBenefitTax;

impl AmountException for ZeroBenefitTax {
    fn code(&self) -> &'static str {
        codes::BENEFIT_TAX
    }

    fn evaluate(
        &self,
        index: usize,
        columns: &Columns,
    ) -> Result<ExceptionVerdict, ReconcileError> {
        let description = columns.description.get(index).map_or("", String::as_str);
        let Some(captures) = BENEFIT_TAX_RE.captures(description) else {
            // A benefit-tax row whose description does not read
            // "Skat af ..." means the row alignment itself is off.
            return Err(ReconcileError::MalformedRow {
                code: self.code().to_owned(),
                index,
                description: description.to_owned(),
            });
        };

        let mut taxed = captures[1].to_owned();
        if taxed.contains("Fradrag") {
            taxed = DEDUCTION_SUFFIX_RE.replace(&taxed, "$1").into_owned();
        }

        if crate::numeric::parse_decimal(&taxed) == 0.0 {
            log::info!("Benefit tax is zero at row {index}; blank amount, uncertain");
            return Ok(ExceptionVerdict::INSERT_UNCERTAIN);
        }
        Ok(ExceptionVerdict::SKIP)
    }
}

/// `9993`: the transferred-to-account row can be blank while an amount
/// is still awaiting payout on a companion `9990` row.
struct AwaitingPayout;

impl AmountException for AwaitingPayout {
    fn code(&self) -> &'static str {
        codes::TRANSFERRED_TO_ACCOUNT
    }

    fn evaluate(
        &self,
        _index: usize,
        columns: &Columns,
    ) -> Result<ExceptionVerdict, ReconcileError> {
        if columns.code.iter().any(|c| c == codes::AWAITING_PAYOUT) {
            log::info!("Awaiting-payout companion present; transfer amount may be blank");
            return Ok(ExceptionVerdict::INSERT_UNCERTAIN);
        }
        Ok(ExceptionVerdict::SKIP)
    }
}

/// The closed set of registered exception handlers.
static HANDLERS: &[&dyn AmountException] = &[&ZeroBenefitTax, &AwaitingPayout];

/// Evaluates the exception registered for `code`, if any.
///
/// Codes without a handler defer entirely to the catalog flags.
pub(crate) fn evaluate(
    code: &str,
    index: usize,
    columns: &Columns,
) -> Result<ExceptionVerdict, ReconcileError> {
    for handler in HANDLERS {
        if handler.code() == code {
            return handler.evaluate(index, columns);
        }
    }
    Ok(ExceptionVerdict::SKIP)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns_with(codes_column: &[&str], descriptions: &[&str]) -> Columns {
        Columns {
            code: codes_column.iter().map(|&c| c.to_owned()).collect(),
            description: descriptions.iter().map(|&d| d.to_owned()).collect(),
            ..Columns::default()
        }
    }

    #[test]
    fn nonzero_benefit_tax_defers_to_catalog() {
        let columns = columns_with(&["8906"], &["Skat af 1.500,00"]);
        let verdict = evaluate("8906", 0, &columns).unwrap();
        assert_eq!(verdict, ExceptionVerdict::SKIP);
    }

    #[test]
    fn zero_benefit_tax_is_uncertain_insert() {
        let columns = columns_with(&["8906"], &["Skat af 0,00"]);
        let verdict = evaluate("8906", 0, &columns).unwrap();
        assert_eq!(verdict, ExceptionVerdict::INSERT_UNCERTAIN);
    }

    #[test]
    fn deduction_suffix_is_stripped_before_parsing() {
        let columns = columns_with(&["8906"], &["Skat af 0,00 Fradrag: 900,00"]);
        let verdict = evaluate("8906", 0, &columns).unwrap();
        assert_eq!(verdict, ExceptionVerdict::INSERT_UNCERTAIN);

        let columns = columns_with(&["8906"], &["Skat af 1.500,00 Fradrag: 900,00"]);
        let verdict = evaluate("8906", 0, &columns).unwrap();
        assert_eq!(verdict, ExceptionVerdict::SKIP);
    }

    #[test]
    fn malformed_benefit_tax_description_fails() {
        let columns = columns_with(&["8906"], &["Frokostordning"]);
        let result = evaluate("8906", 0, &columns);
        assert!(matches!(
            result,
            Err(ReconcileError::MalformedRow { code, index: 0, .. }) if code == "8906"
        ));
    }

    #[test]
    fn transfer_without_companion_defers_to_catalog() {
        let columns = columns_with(&["9993"], &["Overført til konto"]);
        let verdict = evaluate("9993", 0, &columns).unwrap();
        assert_eq!(verdict, ExceptionVerdict::SKIP);
    }

    #[test]
    fn transfer_with_companion_is_uncertain_insert() {
        let columns = columns_with(&["9990", "9993"], &["Til senere udbetaling", "Overført til konto"]);
        let verdict = evaluate("9993", 1, &columns).unwrap();
        assert_eq!(verdict, ExceptionVerdict::INSERT_UNCERTAIN);
    }

    #[test]
    fn unregistered_codes_have_no_exception() {
        let columns = columns_with(&["1000"], &["Skalaløn"]);
        let verdict = evaluate("1000", 0, &columns).unwrap();
        assert_eq!(verdict, ExceptionVerdict::SKIP);
    }
}
