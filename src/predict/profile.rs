//! Customer profile input and full feature-vector synthesis
//!
//! Only four attributes are entered by the operator. Every other schema
//! field is derived from them with fixed rules so the vector looks like a
//! realistic customer history.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Upper bound on credit limit, taken from the realistic training range
pub const MAX_CREDIT_LIMIT: f64 = 1_000_000.0;

/// Smallest credit limit the form accepts
pub const MIN_CREDIT_LIMIT: f64 = 1000.0;

/// Inclusive age bounds accepted by the form
pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;

/// Largest repayment-delay code offered by the form
pub const MAX_PAY_STATUS: i32 = 4;

/// Fractions of the credit limit used for BILL_AMT1..BILL_AMT6
const BILL_FRACTIONS: [f64; 6] = [0.30, 0.25, 0.20, 0.15, 0.10, 0.05];

/// Fractions of the credit limit used for PAY_AMT1..PAY_AMT6
const PAYMENT_FRACTIONS: [f64; 6] = [0.05, 0.04, 0.03, 0.02, 0.02, 0.01];

/// Secondary repayment-status fields that mirror PAY_0
const SECONDARY_PAY_FIELDS: [&str; 5] = ["PAY_2", "PAY_3", "PAY_4", "PAY_5", "PAY_6"];

const DEFAULT_EDUCATION: f64 = 2.0;
const DEFAULT_MARRIAGE: f64 = 1.0;

/// Customer sex as coded in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Dataset encoding: 1 = male, 2 = female
    pub fn code(self) -> f64 {
        match self {
            Sex::Male => 1.0,
            Sex::Female => 2.0,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => write!(f, "Male"),
            Sex::Female => write!(f, "Female"),
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(format!("Unknown sex: '{}'. Use 'male' or 'female'.", s)),
        }
    }
}

/// Attributes entered by the operator
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerProfile {
    pub age: u32,
    pub sex: Sex,
    pub credit_limit: f64,
    /// Most recent repayment status: 0 = on time, 1-4 = increasing delay
    pub pay_status: i32,
}

/// Apply the credit-limit safety cap.
///
/// Returns the (possibly clamped) limit and whether clamping happened.
pub fn cap_credit_limit(limit: f64) -> (f64, bool) {
    if limit > MAX_CREDIT_LIMIT {
        (MAX_CREDIT_LIMIT, true)
    } else {
        (limit, false)
    }
}

/// Derived value for a schema field, or `None` when the field has no rule
fn derived_value(field: &str, profile: &CustomerProfile, limit: f64) -> Option<f64> {
    let pay = profile.pay_status as f64;
    match field {
        "AGE" => Some(profile.age as f64),
        "LIMIT_BAL" => Some(limit),
        "SEX" => Some(profile.sex.code()),
        "PAY_0" => Some(pay),
        "EDUCATION" => Some(DEFAULT_EDUCATION),
        "MARRIAGE" => Some(DEFAULT_MARRIAGE),
        f if SECONDARY_PAY_FIELDS.contains(&f) => Some(pay),
        f => {
            if let Some(n) = f.strip_prefix("BILL_AMT") {
                history_fraction(n, &BILL_FRACTIONS).map(|r| limit * r)
            } else if let Some(n) = f.strip_prefix("PAY_AMT") {
                history_fraction(n, &PAYMENT_FRACTIONS).map(|r| limit * r)
            } else {
                None
            }
        }
    }
}

/// Fraction for month suffix "1".."6"
fn history_fraction(suffix: &str, fractions: &[f64; 6]) -> Option<f64> {
    let month: usize = suffix.parse().ok()?;
    fractions.get(month.checked_sub(1)?).copied()
}

/// Assemble one raw feature vector in schema order.
///
/// `limit` is the already-capped credit limit. Fields without a rule are 0.
pub fn build_feature_vector(profile: &CustomerProfile, limit: f64, schema: &[String]) -> Vec<f64> {
    schema
        .iter()
        .map(|field| derived_value(field, profile, limit).unwrap_or(0.0))
        .collect()
}
