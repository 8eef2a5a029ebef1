//! Article codes with hard-wired meaning in the pipeline.
//!
//! The code space is open-ended (the payroll system can mint new codes
//! at any time) and the catalog describes the structural shape of every
//! known code. The handful of codes below additionally drive business
//! rules: share aggregation, the amount-column exceptions, and the
//! rate-repeat rule.

/// Employer-matched share purchase; the quantity column carries the
/// number of shares bought.
pub const EMPLOYER_MATCHED_SHARES: &str = "5092";

/// Additional self-paid share purchase; booked as a deduction, so the
/// amount is negative.
pub const ADDITIONAL_SHARES: &str = "9221";

/// Tax of an employer-granted benefit; the description reads
/// `Skat af <value>`.
pub const BENEFIT_TAX: &str = "8906";

/// Net pay transferred to the employee's account.
pub const TRANSFERRED_TO_ACCOUNT: &str = "9993";

/// Amount withheld for a later payout; companion row to
/// [`TRANSFERRED_TO_ACCOUNT`].
pub const AWAITING_PAYOUT: &str = "9990";

/// Codes whose rate is printed only on their first occurrence in a
/// document; repeats leave the rate cell blank.
pub const RATE_ON_FIRST_OCCURRENCE_ONLY: &[&str] = &["8720", "8721"];
