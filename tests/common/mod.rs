//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

use creditrisk::model::{load_training_data, save_model, train_and_evaluate, LogisticConfig};
use creditrisk::pipeline::{
    drop_unused_columns, prepare_dataset, save_prepared, ArtifactPaths, PrepareOptions,
    DEFAULT_SEED, DEFAULT_TARGET, DEFAULT_TEST_SIZE,
};

/// Feature columns of the credit card default dataset, in file order
pub const CREDIT_FEATURES: [&str; 23] = [
    "LIMIT_BAL", "SEX", "EDUCATION", "MARRIAGE", "AGE", "PAY_0", "PAY_2", "PAY_3", "PAY_4",
    "PAY_5", "PAY_6", "BILL_AMT1", "BILL_AMT2", "BILL_AMT3", "BILL_AMT4", "BILL_AMT5",
    "BILL_AMT6", "PAY_AMT1", "PAY_AMT2", "PAY_AMT3", "PAY_AMT4", "PAY_AMT5", "PAY_AMT6",
];

/// Create a synthetic credit dataset with the real column layout.
///
/// Default probability rises with the repayment delay and falls with the
/// credit limit, so a fitted model has a clear signal to find.
/// `with_index` prepends the `Unnamed: 0` column pandas writes.
pub fn create_credit_dataframe(rows: usize, seed: u64, with_index: bool) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut limit = Vec::with_capacity(rows);
    let mut sex = Vec::with_capacity(rows);
    let mut education = Vec::with_capacity(rows);
    let mut marriage = Vec::with_capacity(rows);
    let mut age = Vec::with_capacity(rows);
    let mut pay: Vec<Vec<i64>> = vec![Vec::with_capacity(rows); 6];
    let mut bill: Vec<Vec<f64>> = vec![Vec::with_capacity(rows); 6];
    let mut pay_amt: Vec<Vec<f64>> = vec![Vec::with_capacity(rows); 6];
    let mut target = Vec::with_capacity(rows);

    for _ in 0..rows {
        let l = rng.gen_range(1..=50) as f64 * 10_000.0;
        let a: i64 = rng.gen_range(21..=70);
        let p0: i64 = if rng.gen::<f64>() < 0.7 {
            0
        } else {
            rng.gen_range(1..=4)
        };

        limit.push(l);
        sex.push(rng.gen_range(1..=2i64));
        education.push(rng.gen_range(1..=4i64));
        marriage.push(rng.gen_range(1..=3i64));
        age.push(a);

        pay[0].push(p0);
        for column in pay.iter_mut().skip(1) {
            column.push((p0 + rng.gen_range(-1..=1i64)).max(0));
        }
        for column in bill.iter_mut() {
            column.push((l * rng.gen_range(0.0..0.5)).round());
        }
        for column in pay_amt.iter_mut() {
            column.push((l * rng.gen_range(0.0..0.05)).round());
        }

        let young = if a < 25 { 0.3 } else { 0.0 };
        let logit = -1.8 + 1.1 * p0 as f64 - l / 250_000.0 + young;
        let p = 1.0 / (1.0 + (-logit).exp());
        target.push(i64::from(rng.gen::<f64>() < p));
    }

    let mut columns: Vec<Column> = Vec::with_capacity(CREDIT_FEATURES.len() + 2);
    if with_index {
        columns.push(Column::new("Unnamed: 0".into(), (0..rows as i64).collect::<Vec<_>>()));
    }
    columns.push(Column::new("LIMIT_BAL".into(), limit));
    columns.push(Column::new("SEX".into(), sex));
    columns.push(Column::new("EDUCATION".into(), education));
    columns.push(Column::new("MARRIAGE".into(), marriage));
    columns.push(Column::new("AGE".into(), age));
    for (name, values) in ["PAY_0", "PAY_2", "PAY_3", "PAY_4", "PAY_5", "PAY_6"]
        .iter()
        .zip(pay)
    {
        columns.push(Column::new((*name).into(), values));
    }
    for (i, values) in bill.into_iter().enumerate() {
        columns.push(Column::new(format!("BILL_AMT{}", i + 1).into(), values));
    }
    for (i, values) in pay_amt.into_iter().enumerate() {
        columns.push(Column::new(format!("PAY_AMT{}", i + 1).into(), values));
    }
    columns.push(Column::new(DEFAULT_TARGET.into(), target));

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("credit_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Artifact layout rooted in a temporary directory
pub fn temp_paths(dir: &TempDir) -> ArtifactPaths {
    ArtifactPaths::new(
        dir.path().join("data"),
        dir.path().join("models"),
        dir.path().join("outputs"),
    )
}

pub fn default_options() -> PrepareOptions {
    PrepareOptions {
        target: DEFAULT_TARGET.to_string(),
        test_size: DEFAULT_TEST_SIZE,
        seed: DEFAULT_SEED,
    }
}

/// A workspace with the preparation artifacts written
pub fn prepared_workspace(rows: usize) -> (TempDir, ArtifactPaths) {
    let dir = TempDir::new().unwrap();
    let paths = temp_paths(&dir);
    let df = create_credit_dataframe(rows, 7, true);
    let (df, _) = drop_unused_columns(df, &[]);
    let prepared = prepare_dataset(&df, &default_options()).unwrap();
    save_prepared(&prepared, &paths).unwrap();
    (dir, paths)
}

/// A workspace with preparation and training artifacts written
pub fn trained_workspace(rows: usize) -> (TempDir, ArtifactPaths) {
    let (dir, paths) = prepared_workspace(rows);
    let data = load_training_data(&paths).unwrap();
    let outcome = train_and_evaluate(&data, &LogisticConfig::default()).unwrap();
    save_model(&outcome.model, &paths).unwrap();
    (dir, paths)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
