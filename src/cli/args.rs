//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::model::{DEFAULT_C, DEFAULT_MAX_ITER};
use crate::pipeline::{ArtifactPaths, DEFAULT_SEED, DEFAULT_TARGET, DEFAULT_TEST_SIZE};
use crate::predict::{Sex, MAX_AGE, MAX_PAY_STATUS, MIN_AGE, MIN_CREDIT_LIMIT};

/// creditrisk - Credit default risk pipeline: prepare, train, predict, explain
#[derive(Parser, Debug)]
#[command(name = "creditrisk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding raw/ and processed/ data
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory for the scaler, model and feature schema
    #[arg(long, global = true, default_value = "models")]
    pub models_dir: PathBuf,

    /// Directory for rendered plots
    #[arg(long, global = true, default_value = "outputs")]
    pub outputs_dir: PathBuf,
}

/// Options shared by `prepare` and `run`
#[derive(clap::Args, Debug, Clone)]
pub struct PrepareArgs {
    /// Raw dataset (CSV or Parquet). Defaults to <data-dir>/raw/credit_data.csv
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Binary label column
    #[arg(short, long, default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Fraction of rows held out for testing, in (0, 1)
    #[arg(long, default_value_t = DEFAULT_TEST_SIZE, value_parser = validate_test_size)]
    pub test_size: f64,

    /// Seed for the stratified shuffle
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Columns to drop before processing (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Vec<String>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// Options shared by `train` and `run`
#[derive(clap::Args, Debug, Clone)]
pub struct TrainArgs {
    /// Newton iteration cap
    #[arg(long, default_value_t = DEFAULT_MAX_ITER, value_parser = validate_max_iter)]
    pub max_iter: usize,

    /// Inverse L2 regularisation strength, > 0
    #[arg(long = "c", default_value_t = DEFAULT_C, value_parser = validate_c)]
    pub c: f64,
}

/// Customer fields for `predict`; any that are missing are asked for
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PredictArgs {
    /// Customer age in years (18-100)
    #[arg(long, value_parser = validate_age)]
    pub age: Option<u32>,

    /// Customer sex: male or female
    #[arg(long)]
    pub sex: Option<Sex>,

    /// Requested credit limit (>= 1000)
    #[arg(long, value_parser = validate_credit_limit)]
    pub credit_limit: Option<f64>,

    /// Most recent repayment delay in months (0-4)
    #[arg(long = "pay-0", value_parser = validate_pay_status)]
    pub pay_0: Option<i32>,
}

impl PredictArgs {
    /// True when every field was supplied on the command line
    pub fn is_complete(&self) -> bool {
        self.age.is_some() && self.sex.is_some() && self.credit_limit.is_some() && self.pay_0.is_some()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split, scale and persist the raw dataset
    Prepare(PrepareArgs),

    /// Fit the classifier on the prepared splits and report test metrics
    Train(TrainArgs),

    /// Assess a single customer's default risk
    Predict(PredictArgs),

    /// Compute attributions on the test set and render summary plots
    Explain,

    /// Run prepare, train and explain in sequence
    Run {
        #[command(flatten)]
        prepare: PrepareArgs,

        #[command(flatten)]
        train: TrainArgs,
    },
}

impl Cli {
    /// Artifact locations resolved from the global directory flags
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(&self.data_dir, &self.models_dir, &self.outputs_dir)
    }
}

impl PrepareArgs {
    /// The input path, falling back to the conventional raw dataset location
    pub fn input_path(&self, paths: &ArtifactPaths) -> PathBuf {
        self.input.clone().unwrap_or_else(|| paths.raw_dataset())
    }
}

fn parse_f64(s: &str) -> Result<f64, String> {
    s.parse()
        .map_err(|_| format!("'{}' is not a valid number", s))
}

/// Validator for test_size parameter
fn validate_test_size(s: &str) -> Result<f64, String> {
    let value = parse_f64(s)?;
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "test_size must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    }
}

/// Validator for the iteration cap
fn validate_max_iter(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid iteration count", s))?;
    if value >= 1 {
        Ok(value)
    } else {
        Err("max_iter must be at least 1".to_string())
    }
}

/// Validator for the regularisation strength
fn validate_c(s: &str) -> Result<f64, String> {
    let value = parse_f64(s)?;
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(format!("c must be a positive number, got {}", value))
    }
}

fn validate_age(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid age", s))?;
    if (MIN_AGE..=MAX_AGE).contains(&value) {
        Ok(value)
    } else {
        Err(format!("age must be between {} and {}, got {}", MIN_AGE, MAX_AGE, value))
    }
}

fn validate_credit_limit(s: &str) -> Result<f64, String> {
    let value = parse_f64(s)?;
    if value >= MIN_CREDIT_LIMIT && value.is_finite() {
        Ok(value)
    } else {
        Err(format!(
            "credit limit must be at least {}, got {}",
            MIN_CREDIT_LIMIT, value
        ))
    }
}

fn validate_pay_status(s: &str) -> Result<i32, String> {
    let value: i32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid repayment status", s))?;
    if (0..=MAX_PAY_STATUS).contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "repayment status must be between 0 and {}, got {}",
            MAX_PAY_STATUS, value
        ))
    }
}
