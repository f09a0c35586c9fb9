//! Model performance output for the training stage

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Table};
use console::style;

use crate::model::{ClassMetrics, ClassificationReport};

fn metric_row(m: &ClassMetrics) -> Vec<Cell> {
    vec![
        Cell::new(&m.label),
        Cell::new(format!("{:.2}", m.precision)).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.2}", m.recall)).set_alignment(CellAlignment::Right),
        Cell::new(format!("{:.2}", m.f1)).set_alignment(CellAlignment::Right),
        Cell::new(m.support).set_alignment(CellAlignment::Right),
    ]
}

/// Precision/recall/F1 table in the familiar classification-report layout
pub fn classification_table(report: &ClassificationReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("").add_attribute(Attribute::Bold),
        Cell::new("precision").add_attribute(Attribute::Bold),
        Cell::new("recall").add_attribute(Attribute::Bold),
        Cell::new("f1-score").add_attribute(Attribute::Bold),
        Cell::new("support").add_attribute(Attribute::Bold),
    ]);

    for class in &report.classes {
        table.add_row(metric_row(class));
    }
    table.add_row(vec![
        Cell::new("accuracy"),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format!("{:.2}", report.accuracy)).set_alignment(CellAlignment::Right),
        Cell::new(report.total).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(metric_row(&report.macro_avg));
    table.add_row(metric_row(&report.weighted_avg));
    table
}

/// Print accuracy and the full report
pub fn display_classification_report(report: &ClassificationReport) {
    println!();
    println!(
        "    {} {}",
        style("📊").cyan(),
        style("MODEL PERFORMANCE").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!(
        "      Accuracy: {}",
        style(format!("{:.2}", report.accuracy)).yellow().bold()
    );
    println!();
    for line in classification_table(report).to_string().lines() {
        println!("    {}", line);
    }
}
