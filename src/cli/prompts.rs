//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};

use super::args::PredictArgs;
use crate::predict::{CustomerProfile, Sex, MAX_AGE, MAX_PAY_STATUS, MIN_AGE, MIN_CREDIT_LIMIT};

const DEFAULT_AGE: u32 = 28;
const DEFAULT_CREDIT_LIMIT: f64 = 50_000.0;

/// Ask whether another customer should be assessed
pub fn confirm_another() -> Result<bool> {
    let again = Confirm::new()
        .with_prompt("Assess another customer?")
        .default(false)
        .interact()?;
    Ok(again)
}

fn prompt_age() -> Result<u32> {
    let age = Input::<u32>::new()
        .with_prompt("Age")
        .default(DEFAULT_AGE)
        .validate_with(|v: &u32| -> Result<(), String> {
            if (MIN_AGE..=MAX_AGE).contains(v) {
                Ok(())
            } else {
                Err(format!("Age must be between {} and {}", MIN_AGE, MAX_AGE))
            }
        })
        .interact_text()?;
    Ok(age)
}

fn prompt_sex() -> Result<Sex> {
    let labels: Vec<String> = Sex::ALL.iter().map(|s| s.to_string()).collect();
    let selected = Select::new()
        .with_prompt("Sex")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Sex::ALL[selected])
}

fn prompt_credit_limit() -> Result<f64> {
    let limit = Input::<f64>::new()
        .with_prompt("Credit Limit")
        .default(DEFAULT_CREDIT_LIMIT)
        .validate_with(|v: &f64| -> Result<(), String> {
            if v.is_finite() && *v >= MIN_CREDIT_LIMIT {
                Ok(())
            } else {
                Err(format!("Credit limit must be at least {}", MIN_CREDIT_LIMIT))
            }
        })
        .interact_text()?;
    Ok(limit)
}

fn prompt_pay_status() -> Result<i32> {
    let options: Vec<String> = (0..=MAX_PAY_STATUS)
        .map(|m| match m {
            0 => "0 - paid on time".to_string(),
            1 => "1 - one month late".to_string(),
            n => format!("{} - {} months late", n, n),
        })
        .collect();
    let selected = Select::new()
        .with_prompt("Recent Repayment Delay (months)")
        .items(&options)
        .default(0)
        .interact()?;
    Ok(selected as i32)
}

/// Collect a customer profile, asking only for fields not given as flags
pub fn prompt_customer(given: &PredictArgs) -> Result<CustomerProfile> {
    let age = match given.age {
        Some(age) => age,
        None => prompt_age()?,
    };
    let sex = match given.sex {
        Some(sex) => sex,
        None => prompt_sex()?,
    };
    let credit_limit = match given.credit_limit {
        Some(limit) => limit,
        None => prompt_credit_limit()?,
    };
    let pay_status = match given.pay_0 {
        Some(pay) => pay,
        None => prompt_pay_status()?,
    };

    Ok(CustomerProfile {
        age,
        sex,
        credit_limit,
        pay_status,
    })
}
