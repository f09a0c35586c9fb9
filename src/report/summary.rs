//! Preparation summary report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::PreparedData;

/// Summary of the data preparation stage
#[derive(Debug, Default)]
pub struct PreparationSummary {
    pub input_rows: usize,
    pub input_columns: usize,
    pub dropped_columns: Vec<String>,
    pub features: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_positive_rate: f64,
    pub test_positive_rate: f64,
    pub missing_cells: usize,
}

impl PreparationSummary {
    pub fn new(input_rows: usize, input_columns: usize) -> Self {
        Self {
            input_rows,
            input_columns,
            ..Default::default()
        }
    }

    pub fn set_dropped(&mut self, dropped: Vec<String>) {
        self.dropped_columns = dropped;
    }

    pub fn set_missing_cells(&mut self, missing: usize) {
        self.missing_cells = missing;
    }

    pub fn record_split(&mut self, prepared: &PreparedData) {
        self.features = prepared.schema.len();
        self.train_rows = prepared.train_rows();
        self.test_rows = prepared.test_rows();
        let (train_rate, test_rate) = prepared.positive_rates();
        self.train_positive_rate = train_rate;
        self.test_positive_rate = test_rate;
    }

    /// Build the summary table
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Input Shape"),
            Cell::new(format!("{} × {}", self.input_rows, self.input_columns)),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Dropped Columns"),
            Cell::new(self.dropped_columns.len()).fg(if self.dropped_columns.is_empty() {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![Cell::new("🔢 Features"), Cell::new(self.features)]);
        table.add_row(vec![
            Cell::new("🏋️ Train Rows"),
            Cell::new(format!(
                "{} ({:.1}% default)",
                self.train_rows,
                self.train_positive_rate * 100.0
            )),
        ]);
        table.add_row(vec![
            Cell::new("🧪 Test Rows"),
            Cell::new(format!(
                "{} ({:.1}% default)",
                self.test_rows,
                self.test_positive_rate * 100.0
            )),
        ]);
        table.add_row(vec![
            Cell::new("❓ Missing Cells"),
            Cell::new(self.missing_cells).fg(if self.missing_cells == 0 {
                Color::Green
            } else {
                Color::Red
            }),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PREPARATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }

        if !self.dropped_columns.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Dropped Columns").yellow(),
                style(format!("({})", self.dropped_columns.len())).dim()
            );
            for column in &self.dropped_columns {
                println!("        {} {}", style("•").dim(), column);
            }
        }
    }
}
