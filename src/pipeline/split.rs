//! Deterministic stratified train/test split
//!
//! Each class is shuffled with a seeded RNG and contributes to the test
//! partition in proportion to its share of the data. Allocation uses the
//! largest-remainder method so the partition sizes are exact.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::PipelineError;

/// Default fraction of rows held out for testing
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Default shuffle seed
pub const DEFAULT_SEED: u64 = 42;

/// Row indices of the two partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split row indices into stratified train/test partitions.
///
/// `labels` holds one class value per row (0.0/1.0 for this pipeline).
/// The test partition has `ceil(test_size * n)` rows.
pub fn stratified_split(
    labels: &[f64],
    test_size: f64,
    seed: u64,
) -> Result<SplitIndices, PipelineError> {
    let n = labels.len();
    let n_test = (test_size * n as f64).ceil() as usize;

    if !(test_size > 0.0 && test_size < 1.0) || n_test == 0 || n_test >= n {
        return Err(PipelineError::InvalidSplit { rows: n, test_size });
    }

    // Group row indices by class; BTreeMap keeps class order stable
    let mut classes: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        classes.entry(label.round() as i64).or_default().push(idx);
    }

    if classes.len() < 2 {
        let (&class, members) = classes
            .iter()
            .next()
            .ok_or(PipelineError::InvalidSplit { rows: n, test_size })?;
        return Err(PipelineError::SingleClass {
            class,
            rows: members.len(),
        });
    }

    if let Some((&class, members)) = classes.iter().find(|(_, m)| m.len() < 2) {
        return Err(PipelineError::ClassTooSmall {
            class,
            count: members.len(),
        });
    }

    // Each class needs a row on both sides
    if n_test < classes.len() || n - n_test < classes.len() {
        return Err(PipelineError::InvalidSplit { rows: n, test_size });
    }

    let allocation = allocate_test_counts(&classes, n, n_test);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n - n_test);
    let mut test = Vec::with_capacity(n_test);

    for ((_, members), class_test) in classes.iter().zip(allocation) {
        let mut shuffled = members.clone();
        shuffled.shuffle(&mut rng);
        test.extend_from_slice(&shuffled[..class_test]);
        train.extend_from_slice(&shuffled[class_test..]);
    }

    // Interleave classes so neither partition is ordered by label
    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    Ok(SplitIndices { train, test })
}

/// Per-class test counts summing to `n_test`.
///
/// Every class keeps at least one row on each side.
fn allocate_test_counts(classes: &BTreeMap<i64, Vec<usize>>, n: usize, n_test: usize) -> Vec<usize> {
    let quotas: Vec<f64> = classes
        .values()
        .map(|m| m.len() as f64 * n_test as f64 / n as f64)
        .collect();

    let mut counts: Vec<usize> = quotas.iter().map(|q| q.floor() as usize).collect();
    let mut remaining = n_test.saturating_sub(counts.iter().sum());

    let mut order: Vec<usize> = (0..quotas.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = quotas[a] - quotas[a].floor();
        let rb = quotas[b] - quotas[b].floor();
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });

    for &class_idx in order.iter().cycle().take(order.len() * 2) {
        if remaining == 0 {
            break;
        }
        let size = classes.values().nth(class_idx).map_or(0, Vec::len);
        if counts[class_idx] + 1 < size {
            counts[class_idx] += 1;
            remaining -= 1;
        }
    }

    let sizes: Vec<usize> = classes.values().map(Vec::len).collect();
    for (count, size) in counts.iter_mut().zip(&sizes) {
        *count = (*count).clamp(1, size - 1);
    }

    // Clamping can move the total off n_test; shift rows between classes
    // without breaking the one-row-per-side floor.
    while counts.iter().sum::<usize>() > n_test {
        let Some(idx) = (0..counts.len())
            .filter(|&i| counts[i] > 1)
            .max_by_key(|&i| counts[i])
        else {
            break;
        };
        counts[idx] -= 1;
    }
    while counts.iter().sum::<usize>() < n_test {
        let Some(idx) = (0..counts.len())
            .filter(|&i| counts[i] + 1 < sizes[i])
            .max_by_key(|&i| sizes[i] - counts[i])
        else {
            break;
        };
        counts[idx] += 1;
    }

    counts
}

/// Select rows of a slice by index
pub fn take_rows<T: Copy>(values: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| values[i]).collect()
}
