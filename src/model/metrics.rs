//! Binary classification metrics

use serde::Serialize;

/// Precision/recall/F1 for one class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Accuracy plus per-class and averaged scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub total: usize,
}

/// Fraction of predictions equal to the truth
pub fn accuracy(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| (*t - *p).abs() < 0.5)
        .count();
    correct as f64 / y_true.len() as f64
}

/// Ratio that reports 0.0 when the denominator is zero
fn safe_div(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

fn class_metrics(y_true: &[f64], y_pred: &[f64], class: f64) -> ClassMetrics {
    let is = |v: f64| (v - class).abs() < 0.5;
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;
    for (&t, &p) in y_true.iter().zip(y_pred) {
        match (is(t), is(p)) {
            (true, true) => tp += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
            (false, false) => {}
        }
    }

    let precision = safe_div(tp as f64, (tp + fp) as f64);
    let recall = safe_div(tp as f64, (tp + fn_) as f64);
    let f1 = safe_div(2.0 * precision * recall, precision + recall);

    ClassMetrics {
        label: format!("{}", class as i64),
        precision,
        recall,
        f1,
        support: tp + fn_,
    }
}

/// Build the report for labels 0 and 1
pub fn classification_report(y_true: &[f64], y_pred: &[f64]) -> ClassificationReport {
    let classes: Vec<ClassMetrics> = [0.0, 1.0]
        .iter()
        .map(|&c| class_metrics(y_true, y_pred, c))
        .collect();

    let total: usize = classes.iter().map(|c| c.support).sum();
    let k = classes.len() as f64;

    let macro_avg = ClassMetrics {
        label: "macro avg".to_string(),
        precision: classes.iter().map(|c| c.precision).sum::<f64>() / k,
        recall: classes.iter().map(|c| c.recall).sum::<f64>() / k,
        f1: classes.iter().map(|c| c.f1).sum::<f64>() / k,
        support: total,
    };

    let weighted = |f: fn(&ClassMetrics) -> f64| {
        safe_div(
            classes.iter().map(|c| f(c) * c.support as f64).sum::<f64>(),
            total as f64,
        )
    };
    let weighted_avg = ClassMetrics {
        label: "weighted avg".to_string(),
        precision: weighted(|c: &ClassMetrics| c.precision),
        recall: weighted(|c: &ClassMetrics| c.recall),
        f1: weighted(|c: &ClassMetrics| c.f1),
        support: total,
    };

    ClassificationReport {
        accuracy: accuracy(y_true, y_pred),
        classes,
        macro_avg,
        weighted_avg,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(&[0.0, 1.0, 1.0, 0.0], &[0.0, 1.0, 0.0, 0.0]), 0.75);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_report_matches_hand_computation() {
        // tp=2 fp=1 fn=1 tn=4 for class 1
        let y_true = [1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let y_pred = [1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        let report = classification_report(&y_true, &y_pred);

        let pos = &report.classes[1];
        assert!((pos.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((pos.recall - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(pos.support, 3);

        let neg = &report.classes[0];
        assert!((neg.precision - 0.8).abs() < 1e-12);
        assert!((neg.recall - 0.8).abs() < 1e-12);
        assert_eq!(neg.support, 5);

        assert_eq!(report.total, 8);
        assert_eq!(report.accuracy, 0.75);
        let expected_weighted = (0.8 * 5.0 + (2.0 / 3.0) * 3.0) / 8.0;
        assert!((report.weighted_avg.f1 - expected_weighted).abs() < 1e-12);
    }

    #[test]
    fn test_report_with_no_positive_predictions() {
        let report = classification_report(&[0.0, 1.0], &[0.0, 0.0]);
        assert_eq!(report.classes[1].precision, 0.0);
        assert_eq!(report.classes[1].f1, 0.0);
    }
}
