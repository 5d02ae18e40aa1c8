//! Entropy and information gain of categorical splits
//!
use std::collections::BTreeMap;

use sylva::{error::Result, Dataset};

/// Given the class frequencies calculates the entropy of the subset.
///
/// The entropy is the sum over all labels of the probability of encountering that label times its
/// logarithm in base two, with negative sign. Labels with a count of zero do not contribute and the
/// entropy of an empty distribution is zero.
///
/// ```rust
/// use sylva_id3::entropy;
///
/// assert_eq!(entropy(&[7]), 0.0);
/// assert_eq!(entropy(&[4, 4]), 1.0);
/// ```
pub fn entropy<'a, I: IntoIterator<Item = &'a usize>>(counts: I) -> f64 {
    let counts: Vec<usize> = counts.into_iter().copied().collect();
    let n_samples = counts.iter().sum::<usize>();
    if n_samples == 0 {
        return 0.0;
    }

    let n_samples = n_samples as f64;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| count as f64 / n_samples)
        .map(|p| -p * p.log2())
        .sum::<f64>()
        .abs()
}

/// Weighted average entropy of `target` after partitioning the dataset on `attribute`
///
/// Every partition contributes its entropy weighted with its share of the observations. The
/// partitions are returned as well, so that a caller deciding on the split does not have to
/// compute them a second time.
pub fn average_entropy(
    dataset: &Dataset,
    attribute: &str,
    target: &str,
) -> Result<(f64, BTreeMap<String, Dataset>)> {
    dataset.field_index(target)?;
    let partitions = dataset.partition_by(attribute)?;

    let n_samples = dataset.nsamples();
    if n_samples == 0 {
        return Ok((0.0, partitions));
    }

    let mut avg_entropy = 0.0;
    for partition in partitions.values() {
        let labels = partition.class_counts(target)?;
        let weight = partition.nsamples() as f64 / n_samples as f64;

        avg_entropy += weight * entropy(labels.values());
    }

    Ok((avg_entropy, partitions))
}

/// The information gain obtained by splitting the dataset on `attribute`
///
/// This is the entropy of `target` in the whole dataset minus the weighted average entropy of
/// `target` in the partitions induced by `attribute`.
pub fn information_gain(dataset: &Dataset, attribute: &str, target: &str) -> Result<f64> {
    let labels = dataset.class_counts(target)?;
    let (avg_entropy, _) = average_entropy(dataset, attribute, target)?;

    Ok(entropy(labels.values()) - avg_entropy)
}
