//! Stage runners invoked by the binary

use std::time::Instant;

use anyhow::Result;
use console::style;

use super::args::{PredictArgs, PrepareArgs, TrainArgs};
use super::prompts::{confirm_another, prompt_customer};
use crate::explain::{explain_test_set, write_summary_plots, PlotRenderer, HIGH_RISK_TITLE, LOW_RISK_TITLE};
use crate::model::{load_training_data, save_model, train_and_evaluate, LogisticConfig};
use crate::pipeline::{
    count_missing_values, drop_unused_columns, load_dataset, prepare_dataset, save_prepared,
    total_missing, ArtifactPaths, PrepareOptions,
};
use crate::predict::Predictor;
use crate::report::{
    display_assessment, display_classification_report, display_group, print_dataset_overview,
    print_missing_values, PreparationSummary,
};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_info, print_kv, print_step_header, print_step_time, print_success,
    print_warning, run_with_spinner,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Load, split, scale and persist the raw dataset
pub fn run_prepare(args: &PrepareArgs, paths: &ArtifactPaths) -> Result<()> {
    let input = args.input_path(paths);
    print_banner(VERSION, "Data Preparation");
    print_config(&input, &args.target, &paths.processed_dir(), args.test_size, args.seed);

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let df = run_with_spinner(
        "Reading raw dataset...",
        || load_dataset(&input, args.infer_schema_length),
        |df| format!("Dataset loaded ({} rows)", df.height()),
    )?;

    let (rows, cols) = df.shape();
    let mut summary = PreparationSummary::new(rows, cols);
    print_dataset_overview(&df);

    let (df, dropped) = drop_unused_columns(df, &args.drop_columns);
    if !dropped.is_empty() {
        print_info(&format!("Dropped column(s): {}", dropped.join(", ")));
    }
    summary.set_dropped(dropped);

    let missing = count_missing_values(&df);
    print_missing_values(&missing);
    summary.set_missing_cells(total_missing(&missing));
    print_step_time(step_start.elapsed());

    // Step 2: Split and scale
    print_step_header(2, "Stratified Split & Scaling");
    let step_start = Instant::now();
    let options = PrepareOptions {
        target: args.target.clone(),
        test_size: args.test_size,
        seed: args.seed,
    };
    let prepared = run_with_spinner(
        "Splitting and fitting scaler...",
        || prepare_dataset(&df, &options),
        |p| {
            format!(
                "Split into {} training and {} test rows",
                p.train_rows(),
                p.test_rows()
            )
        },
    )?;
    summary.record_split(&prepared);
    print_step_time(step_start.elapsed());

    // Step 3: Persist artifacts
    print_step_header(3, "Save Artifacts");
    let step_start = Instant::now();
    run_with_spinner(
        "Writing processed data and scaler...",
        || save_prepared(&prepared, paths),
        |_| "Artifacts saved".to_string(),
    )?;
    print_kv("Processed data", paths.processed_dir().display());
    print_kv("Scaler", paths.scaler().display());
    print_kv("Feature schema", paths.feature_columns().display());
    print_step_time(step_start.elapsed());

    summary.display();
    print_completion("Data preparation completed successfully");
    Ok(())
}

/// Fit the classifier and report its test performance
pub fn run_train(args: &TrainArgs, paths: &ArtifactPaths) -> Result<()> {
    print_banner(VERSION, "Model Training");

    // Step 1: Load processed splits
    print_step_header(1, "Load Processed Data");
    let step_start = Instant::now();
    let data = load_training_data(paths)?;
    print_success(&format!(
        "Loaded {} training and {} test rows with {} features",
        data.x_train.nrows(),
        data.x_test.nrows(),
        data.schema.len()
    ));
    print_step_time(step_start.elapsed());

    // Step 2: Fit
    print_step_header(2, "Fit Logistic Regression");
    let step_start = Instant::now();
    let spinner = create_spinner("Training model...");
    let config = LogisticConfig {
        max_iter: args.max_iter,
        c: args.c,
    };
    let outcome = match train_and_evaluate(&data, &config) {
        Ok(outcome) => outcome,
        Err(err) => {
            spinner.abandon_with_message("❌ Training failed");
            return Err(err);
        }
    };
    let meta = &outcome.model.metadata;
    if meta.converged {
        finish_with_success(
            &spinner,
            &format!("Converged after {} iteration(s)", meta.iterations),
        );
    } else {
        finish_with_warning(
            &spinner,
            &format!("Stopped at the iteration cap ({}) without converging", meta.max_iter),
        );
    }
    print_step_time(step_start.elapsed());

    display_classification_report(&outcome.report);

    // Step 3: Persist
    print_step_header(3, "Save Model");
    save_model(&outcome.model, paths)?;
    print_success(&format!("Model saved to {}", paths.model().display()));

    print_completion("Model training completed successfully");
    Ok(())
}

/// Score one or more customers interactively
pub fn run_predict(args: &PredictArgs, paths: &ArtifactPaths) -> Result<()> {
    print_banner(VERSION, "Credit Risk Assessment");
    let predictor = Predictor::load(paths)?;
    print_info("Enter customer details to estimate the probability of default.");
    println!();

    loop {
        let profile = prompt_customer(args)?;
        let assessment = predictor.assess(&profile)?;
        display_assessment(&assessment);

        if args.is_complete() || !confirm_another()? {
            break;
        }
        println!();
    }
    Ok(())
}

/// Compute attributions on the test set and write the two plots
pub fn run_explain(paths: &ArtifactPaths) -> Result<()> {
    print_banner(VERSION, "Explainability Report");

    // Step 1: Attributions
    print_step_header(1, "Compute Attributions");
    let step_start = Instant::now();
    let explanation = run_with_spinner(
        "Computing SHAP values...",
        || explain_test_set(paths),
        |e| format!("Explained {} test rows", e.total_rows()),
    )?;
    print_kv("Base value (log-odds)", format!("{:.4}", explanation.expected_value));

    display_group(
        HIGH_RISK_TITLE,
        explanation.partition.high.len(),
        &explanation.high_ranking(),
    );
    display_group(
        LOW_RISK_TITLE,
        explanation.partition.low.len(),
        &explanation.low_ranking(),
    );
    for (label, rows) in [
        ("high-risk", &explanation.partition.high),
        ("low-risk", &explanation.partition.low),
    ] {
        if rows.is_empty() {
            print_warning(&format!("No {} customers in the test set", label));
        }
    }
    print_step_time(step_start.elapsed());

    // Step 2: Plots
    print_step_header(2, "Render Summary Plots");
    let step_start = Instant::now();
    let renderer = PlotRenderer::new();
    let (high, low) = run_with_spinner(
        "Rendering plots...",
        || write_summary_plots(&explanation, paths, &renderer),
        |_| "Plots written".to_string(),
    )?;
    println!("      {} {}", style("•").dim(), high.display());
    println!("      {} {}", style("•").dim(), low.display());
    print_step_time(step_start.elapsed());

    print_completion("Explainability report completed successfully");
    Ok(())
}

/// Prepare, train and explain in order, stopping at the first failure
pub fn run_all(prepare: &PrepareArgs, train: &TrainArgs, paths: &ArtifactPaths) -> Result<()> {
    run_prepare(prepare, paths)?;
    run_train(train, paths)?;
    run_explain(paths)
}
