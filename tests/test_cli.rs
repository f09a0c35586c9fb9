//! Tests for CLI argument parsing and the binary's stage commands

use assert_cmd::Command;
use clap::Parser;
use creditrisk::cli::{Cli, Commands};
use creditrisk::predict::Sex;
use predicates::prelude::*;
use std::path::PathBuf;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_prepare_default_values() {
    let cli = Cli::parse_from(["creditrisk", "prepare"]);

    let Commands::Prepare(args) = &cli.command else {
        panic!("expected prepare");
    };
    assert_eq!(args.target, "default.payment.next.month");
    assert_eq!(args.test_size, 0.2);
    assert_eq!(args.seed, 42);
    assert_eq!(args.infer_schema_length, 10000);
    assert!(args.drop_columns.is_empty());
    assert_eq!(
        args.input_path(&cli.paths()),
        PathBuf::from("data/raw/credit_data.csv")
    );
}

#[test]
fn test_global_directories_apply_to_artifacts() {
    let cli = Cli::parse_from([
        "creditrisk",
        "train",
        "--models-dir",
        "/tmp/m",
        "--data-dir",
        "/tmp/d",
    ]);
    let paths = cli.paths();

    assert_eq!(paths.model(), PathBuf::from("/tmp/m/credit_model.json"));
    assert_eq!(paths.x_train(), PathBuf::from("/tmp/d/processed/X_train_scaled.csv"));
    assert_eq!(paths.outputs_dir, PathBuf::from("outputs"));
}

#[test]
fn test_train_options() {
    let cli = Cli::parse_from(["creditrisk", "train", "--max-iter", "50", "--c", "0.5"]);
    let Commands::Train(args) = &cli.command else {
        panic!("expected train");
    };
    assert_eq!(args.max_iter, 50);
    assert_eq!(args.c, 0.5);
}

#[test]
fn test_invalid_values_are_rejected() {
    assert!(Cli::try_parse_from(["creditrisk", "prepare", "--test-size", "1.5"]).is_err());
    assert!(Cli::try_parse_from(["creditrisk", "train", "--c", "0"]).is_err());
    assert!(Cli::try_parse_from(["creditrisk", "train", "--max-iter", "0"]).is_err());
    assert!(Cli::try_parse_from(["creditrisk", "predict", "--age", "12"]).is_err());
    assert!(Cli::try_parse_from(["creditrisk", "predict", "--pay-0", "7"]).is_err());
    assert!(Cli::try_parse_from(["creditrisk", "predict", "--sex", "x"]).is_err());
}

#[test]
fn test_predict_flags_complete() {
    let cli = Cli::parse_from([
        "creditrisk",
        "predict",
        "--age",
        "28",
        "--sex",
        "male",
        "--credit-limit",
        "50000",
        "--pay-0",
        "0",
    ]);
    let Commands::Predict(args) = &cli.command else {
        panic!("expected predict");
    };
    assert!(args.is_complete());
    assert_eq!(args.sex, Some(Sex::Male));
}

#[test]
fn test_drop_columns_are_comma_separated() {
    let cli = Cli::parse_from(["creditrisk", "prepare", "--drop-columns", "ID,NOTES"]);
    let Commands::Prepare(args) = &cli.command else {
        panic!("expected prepare");
    };
    assert_eq!(args.drop_columns, vec!["ID".to_string(), "NOTES".to_string()]);
}

#[test]
fn test_binary_runs_all_stages_then_predicts() {
    let mut df = create_credit_dataframe(300, 21, true);
    let (dir, csv_path) = create_temp_csv(&mut df);
    let data_dir = dir.path().join("data");
    let models_dir = dir.path().join("models");
    let outputs_dir = dir.path().join("outputs");

    Command::cargo_bin("creditrisk")
        .unwrap()
        .args(["run", "-i"])
        .arg(&csv_path)
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--models-dir")
        .arg(&models_dir)
        .arg("--outputs-dir")
        .arg(&outputs_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("MODEL PERFORMANCE"));

    assert!(models_dir.join("credit_model.json").exists());
    assert!(outputs_dir.join("shap_high_risk.png").exists());
    assert!(outputs_dir.join("shap_low_risk.png").exists());

    Command::cargo_bin("creditrisk")
        .unwrap()
        .args(["predict", "--age", "28", "--sex", "male", "--credit-limit", "50000", "--pay-0", "0"])
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--models-dir")
        .arg(&models_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Estimated Probability of Default"));
}

#[test]
fn test_binary_reports_missing_target() {
    let mut df = create_credit_dataframe(50, 4, false);
    let (dir, csv_path) = create_temp_csv(&mut df);

    Command::cargo_bin("creditrisk")
        .unwrap()
        .arg("prepare")
        .arg("-i")
        .arg(&csv_path)
        .args(["-t", "missing_label"])
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("--models-dir")
        .arg(dir.path().join("models"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing_label"));
}

#[test]
fn test_missing_value_table_excludes_dropped_index() {
    let mut df = create_credit_dataframe(120, 9, true);
    let (dir, csv_path) = create_temp_csv(&mut df);

    let output = Command::cargo_bin("creditrisk")
        .unwrap()
        .arg("prepare")
        .arg("-i")
        .arg(&csv_path)
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("--models-dir")
        .arg(dir.path().join("models"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8_lossy(&output);

    let table_start = stdout.find("Missing values:").expect("missing-value table printed");
    let dropped_at = stdout.find("Dropped column(s): Unnamed: 0").expect("index dropped");
    assert!(dropped_at < table_start);

    let table_end = stdout[table_start..]
        .find("Stratified Split")
        .map(|offset| table_start + offset)
        .unwrap_or(stdout.len());
    let table = &stdout[table_start..table_end];
    assert!(table.contains("LIMIT_BAL"));
    assert!(!table.contains("Unnamed: 0"));
}
