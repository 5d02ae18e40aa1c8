//! Utility functions for randomly generating datasets

use rand::Rng;
use sylva::Dataset;

/// Generate a noise-free categorical dataset
///
/// Every observation has `nattributes` fields `a0, a1, ...` drawn uniformly from the values
/// `v0, v1, ...` and a field `label`. The label is `yes` if one of the first two attributes takes
/// the value `v0`, `no` otherwise, so a tree of depth two separates the classes perfectly and
/// the remaining attributes are noise.
///
/// # Panics
///
/// If `nattributes` or `nvalues` is zero.
pub fn disjunction(
    nsamples: usize,
    nattributes: usize,
    nvalues: usize,
    rng: &mut impl Rng,
) -> Dataset {
    assert!(nattributes > 0, "at least one attribute is required");
    assert!(nvalues > 0, "at least one value is required");

    let mut header: Vec<String> = (0..nattributes).map(|i| format!("a{}", i)).collect();
    header.push("label".to_string());

    let rows: Vec<Vec<String>> = (0..nsamples)
        .map(|_| {
            let idxs: Vec<usize> = (0..nattributes).map(|_| rng.gen_range(0..nvalues)).collect();
            let label = if idxs.iter().take(2).any(|&idx| idx == 0) {
                "yes"
            } else {
                "no"
            };

            idxs.iter()
                .map(|idx| format!("v{}", idx))
                .chain(std::iter::once(label.to_string()))
                .collect()
        })
        .collect();

    // rows have the length of the header by construction
    Dataset::new(rows, header).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn disjunction_shape_and_labels() {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = disjunction(100, 4, 3, &mut rng);

        assert_eq!(dataset.nsamples(), 100);
        assert_eq!(dataset.header(), &["a0", "a1", "a2", "a3", "label"]);

        for row in dataset.rows() {
            let value = |idx: usize| -> usize {
                row.get(idx).unwrap()[1..].parse().unwrap()
            };
            let expected = if value(0) == 0 || value(1) == 0 {
                "yes"
            } else {
                "no"
            };
            assert_eq!(row.get(4), Some(expected));
        }

        let universe = dataset.value_universe();
        assert!(universe["a2"].len() <= 3);
    }

    #[test]
    fn same_seed_same_data() {
        let first = disjunction(20, 3, 4, &mut SmallRng::seed_from_u64(7));
        let second = disjunction(20, 3, 4, &mut SmallRng::seed_from_u64(7));

        assert_eq!(first, second);
    }

    #[test]
    #[should_panic]
    fn no_attributes() {
        disjunction(10, 0, 2, &mut SmallRng::seed_from_u64(0));
    }
}
