//! Raw dataset overview printed during preparation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use polars::prelude::*;

/// Rows shown in the data sample
const SAMPLE_ROWS: usize = 5;

/// Print shape, column list and a sample of the first rows
pub fn print_dataset_overview(df: &DataFrame) {
    let (rows, cols) = df.shape();
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    println!("      Column names: {}", style(names.join(", ")).dim());

    println!("\n    {} Sample data:", style("✧").cyan());
    let sample = df.head(Some(SAMPLE_ROWS));
    for line in sample.to_string().lines() {
        println!("      {}", line);
    }
}

/// Table of per-column missing counts
pub fn missing_values_table(counts: &[(String, usize)]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Column").add_attribute(Attribute::Bold),
        Cell::new("Missing").add_attribute(Attribute::Bold),
    ]);

    for (name, count) in counts {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(count).fg(if *count == 0 { Color::Green } else { Color::Red }),
        ]);
    }
    table
}

/// Print the missing-value table
pub fn print_missing_values(counts: &[(String, usize)]) {
    println!("\n    {} Missing values:", style("✧").cyan());
    for line in missing_values_table(counts).to_string().lines() {
        println!("      {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_table_has_row_per_column() {
        let counts = vec![("AGE".to_string(), 0), ("LIMIT_BAL".to_string(), 3)];
        let rendered = missing_values_table(&counts).to_string();
        assert!(rendered.contains("AGE"));
        assert!(rendered.contains("LIMIT_BAL"));
        assert!(rendered.contains('3'));
    }
}
