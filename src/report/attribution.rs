//! Console summary of attribution results

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Table};
use console::style;

use crate::explain::FeatureImportance;

/// Rows shown per group
const TOP_FEATURES: usize = 5;

/// Table of the most influential features in a group
pub fn importance_table(ranking: &[FeatureImportance]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new("mean |SHAP|").add_attribute(Attribute::Bold),
    ]);

    for (rank, item) in ranking.iter().take(TOP_FEATURES).enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&item.feature),
            Cell::new(format!("{:.4}", item.mean_abs)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Print a group's sample count and top features
pub fn display_group(title: &str, samples: usize, ranking: &[FeatureImportance]) {
    println!();
    println!(
        "    {} {}",
        style(title).white().bold(),
        style(format!("({} samples)", samples)).dim()
    );
    if samples == 0 {
        println!("      {}", style("No samples in this group").dim());
        return;
    }
    for line in importance_table(ranking).to_string().lines() {
        println!("    {}", line);
    }
}
