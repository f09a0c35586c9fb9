//! Rendering of a single credit risk assessment

use console::style;

use crate::predict::{Assessment, RiskTier, CAPPED_LIMIT_NOTICE, DECISION_SUPPORT_CAPTION};
use crate::utils::{print_bullet, print_info};

/// Probability as a percentage with two decimals, e.g. "23.45%"
pub fn format_probability(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Print the tier banner, probability, notices, reasons and recommendations
pub fn display_assessment(assessment: &Assessment) {
    println!();
    println!(
        "    {} {}",
        style("📊").cyan(),
        style("CREDIT RISK ASSESSMENT").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    let headline = assessment.tier.headline();
    let banner = match assessment.tier {
        RiskTier::High => style(format!("🚨 {}", headline)).red().bold(),
        RiskTier::Medium => style(format!("⚠️  {}", headline)).yellow().bold(),
        RiskTier::Low => style(format!("✅ {}", headline)).green().bold(),
    };
    println!("      {}", banner);
    println!(
        "      Estimated Probability of Default: {}",
        style(format_probability(assessment.display_probability)).bold()
    );

    if assessment.limit_capped {
        println!();
        print_info(CAPPED_LIMIT_NOTICE);
    }

    println!();
    println!("    {}", style("🧠 Why this decision was made").white().bold());
    for reason in &assessment.reasons {
        print_bullet(reason);
    }

    println!();
    println!("    {}", style("✅ Recommendation").white().bold());
    for recommendation in &assessment.recommendations {
        print_bullet(recommendation);
    }

    println!();
    println!("    {}", style(DECISION_SUPPORT_CAPTION).dim().italic());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_probability() {
        assert_eq!(format_probability(0.2345), "23.45%");
        assert_eq!(format_probability(0.01), "1.00%");
    }
}
