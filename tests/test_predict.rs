//! Integration tests for single-customer risk assessment

use creditrisk::predict::*;
use creditrisk::PipelineError;

#[path = "common/mod.rs"]
mod common;

use common::*;

fn profile(age: u32, sex: Sex, credit_limit: f64, pay_status: i32) -> CustomerProfile {
    CustomerProfile {
        age,
        sex,
        credit_limit,
        pay_status,
    }
}

#[test]
fn test_typical_customer_gets_stable_profile_reason() {
    let (_dir, paths) = trained_workspace(800);
    let predictor = Predictor::load(&paths).unwrap();

    let assessment = predictor.assess(&profile(28, Sex::Male, 50_000.0, 0)).unwrap();

    assert_ne!(assessment.tier, RiskTier::High);
    assert_eq!(assessment.reasons, vec![REASON_STABLE_PROFILE]);
    assert!(!assessment.limit_capped);
    assert_eq!(assessment.effective_limit, 50_000.0);
}

#[test]
fn test_repayment_delay_raises_probability() {
    let (_dir, paths) = trained_workspace(800);
    let predictor = Predictor::load(&paths).unwrap();

    let on_time = predictor.assess(&profile(40, Sex::Female, 100_000.0, 0)).unwrap();
    let late = predictor.assess(&profile(40, Sex::Female, 100_000.0, 3)).unwrap();

    assert!(late.probability > on_time.probability);
    assert!(late.reasons.contains(&REASON_REPAYMENT_DELAY));
    assert!(!late.reasons.contains(&REASON_STABLE_PROFILE));
}

#[test]
fn test_credit_limit_is_capped_and_flagged() {
    let (_dir, paths) = trained_workspace(300);
    let predictor = Predictor::load(&paths).unwrap();

    let assessment = predictor.assess(&profile(45, Sex::Male, 2_000_000.0, 0)).unwrap();

    assert!(assessment.limit_capped);
    assert_eq!(assessment.effective_limit, MAX_CREDIT_LIMIT);
    assert!(assessment.reasons.contains(&REASON_HIGH_EXPOSURE));

    // Same answer as entering the cap directly
    let at_cap = predictor.assess(&profile(45, Sex::Male, MAX_CREDIT_LIMIT, 0)).unwrap();
    assert_eq!(assessment.probability, at_cap.probability);
    assert!(!at_cap.limit_capped);
}

#[test]
fn test_display_probability_is_clipped_and_tier_uses_raw() {
    let (_dir, paths) = trained_workspace(300);
    let predictor = Predictor::load(&paths).unwrap();

    for pay in 0..=MAX_PAY_STATUS {
        let a = predictor.assess(&profile(22, Sex::Female, 1_000.0, pay)).unwrap();
        assert!((DISPLAY_FLOOR..=DISPLAY_CEILING).contains(&a.display_probability));
        assert_eq!(a.tier, RiskTier::from_probability(a.probability));
        assert_eq!(a.recommendations, recommendations(a.tier));
    }
}

#[test]
fn test_young_customer_reason() {
    let (_dir, paths) = trained_workspace(300);
    let predictor = Predictor::load(&paths).unwrap();

    let a = predictor.assess(&profile(21, Sex::Male, 20_000.0, 0)).unwrap();
    assert_eq!(a.reasons, vec![REASON_YOUNG_AGE]);
}

#[test]
fn test_assessments_are_independent() {
    let (_dir, paths) = trained_workspace(300);
    let predictor = Predictor::load(&paths).unwrap();
    let customer = profile(35, Sex::Female, 80_000.0, 1);

    let first = predictor.assess(&customer).unwrap();
    let _ = predictor.assess(&profile(60, Sex::Male, 500_000.0, 4)).unwrap();
    let again = predictor.assess(&customer).unwrap();

    assert_eq!(first.probability, again.probability);
}

#[test]
fn test_permuted_scaler_schema_is_rejected() {
    let (_dir, paths) = trained_workspace(200);
    let predictor = Predictor::load(&paths).unwrap();

    let mut scaler = predictor.scaler.clone();
    scaler.feature_names.swap(0, 1);

    let err = Predictor::new(predictor.schema.clone(), scaler, predictor.model.clone()).unwrap_err();
    assert!(matches!(err, PipelineError::SchemaMismatch { .. }));
}

#[test]
fn test_feature_order_changes_probability() {
    let (_dir, paths) = trained_workspace(800);
    let predictor = Predictor::load(&paths).unwrap();
    let customer = profile(40, Sex::Female, 200_000.0, 2);

    let vector = build_feature_vector(&customer, 200_000.0, &predictor.schema);
    let mut reversed = vector.clone();
    reversed.reverse();
    assert_ne!(vector, reversed);

    let in_order = predictor.probability_for(&vector).unwrap();
    let out_of_order = predictor.probability_for(&reversed).unwrap();
    assert!((in_order - out_of_order).abs() > 1e-9);

    let mut swapped = vector.clone();
    let limit_at = predictor.schema.iter().position(|c| c == "LIMIT_BAL").unwrap();
    let pay_at = predictor.schema.iter().position(|c| c == "PAY_0").unwrap();
    swapped.swap(limit_at, pay_at);
    let swapped_probability = predictor.probability_for(&swapped).unwrap();
    assert!((in_order - swapped_probability).abs() > 1e-9);
}

#[test]
fn test_feature_vector_follows_schema_order() {
    let (_dir, paths) = trained_workspace(200);
    let predictor = Predictor::load(&paths).unwrap();
    let customer = profile(30, Sex::Female, 100_000.0, 2);

    let vector = build_feature_vector(&customer, 100_000.0, &predictor.schema);
    assert_eq!(vector.len(), predictor.schema.len());

    let at = |name: &str| vector[predictor.schema.iter().position(|c| c == name).unwrap()];
    assert_eq!(at("SEX"), 2.0);
    assert_eq!(at("AGE"), 30.0);
    assert_eq!(at("PAY_6"), 2.0);
    assert_eq!(at("BILL_AMT1"), 30_000.0);
    assert_eq!(at("PAY_AMT6"), 1_000.0);
}
