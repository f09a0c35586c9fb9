//! Rule-based decision narrative
//!
//! These rules look only at the entered profile. They do not consult the
//! model's coefficients, so they can disagree with the predicted tier.

use super::risk::RiskTier;

/// Repayment-delay code at or above which a delay warning is raised
pub const DELAY_WARNING_STATUS: i32 = 2;

/// Credit limit at or above which an exposure warning is raised
pub const HIGH_EXPOSURE_LIMIT: f64 = 300_000.0;

/// Age below which an uncertainty warning is raised
pub const YOUNG_AGE: u32 = 25;

pub const REASON_REPAYMENT_DELAY: &str = "Recent repayment delays indicate higher default risk";
pub const REASON_HIGH_EXPOSURE: &str = "High credit exposure requires closer monitoring";
pub const REASON_YOUNG_AGE: &str =
    "Younger age combined with repayment behaviour increases uncertainty";
pub const REASON_STABLE_PROFILE: &str = "Consistent repayment behaviour and stable credit profile";

pub const CAPPED_LIMIT_NOTICE: &str = "Entered credit limit exceeds typical historical range. \
     For prediction reliability, the value was adjusted to realistic bounds.";

pub const DECISION_SUPPORT_CAPTION: &str =
    "This system provides decision support only and does not replace human judgment.";

/// Reasons for the decision; never empty.
///
/// `credit_limit` is the capped value used for the prediction.
pub fn decision_reasons(age: u32, credit_limit: f64, pay_status: i32) -> Vec<&'static str> {
    let mut reasons = Vec::new();

    if pay_status >= DELAY_WARNING_STATUS {
        reasons.push(REASON_REPAYMENT_DELAY);
    }
    if credit_limit >= HIGH_EXPOSURE_LIMIT {
        reasons.push(REASON_HIGH_EXPOSURE);
    }
    if age < YOUNG_AGE {
        reasons.push(REASON_YOUNG_AGE);
    }

    if reasons.is_empty() {
        reasons.push(REASON_STABLE_PROFILE);
    }
    reasons
}

/// Fixed recommendation bullets per tier
pub fn recommendations(tier: RiskTier) -> [&'static str; 3] {
    match tier {
        RiskTier::Low => [
            "Consistent repayment behaviour observed",
            "Credit exposure is well supported",
            "Suitable for standard credit approval workflow",
        ],
        RiskTier::Medium => [
            "Moderate repayment risk detected",
            "Manual review or reduced exposure recommended",
            "Approval subject to internal policy thresholds",
        ],
        RiskTier::High => [
            "High likelihood of repayment default",
            "Payment delay history is a key concern",
            "Additional guarantees or rejection recommended",
        ],
    }
}
