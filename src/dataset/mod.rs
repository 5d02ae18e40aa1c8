//! Datasets
//!
//! This module implements the categorical dataset struct and the record abstraction used to
//! feed single observations into fitted models.
use ndarray::{Array2, ArrayView1, Axis};
use rand::seq::SliceRandom;
use rand::Rng;

use std::collections::{BTreeMap, BTreeSet, HashMap};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::convert::TryFrom;

use crate::error::{Error, Result};

mod impl_records;
mod iter;

pub use impl_records::Record;
pub use iter::{Row, Rows};

/// Distinct values observed for every field of a dataset
///
/// The universe is computed once on the full training data, so that a split on an attribute can
/// create a branch for every value of it, even for values missing in the current subset.
pub type ValueUniverse = BTreeMap<String, BTreeSet<String>>;

/// Dataset
///
/// This is the fundamental structure of a categorical dataset. It contains an ordered header of
/// unique field names and a two-dimensional matrix of string values with dimensionality
/// (nsamples, nfields). There is no dedicated target column, algorithms select the field they
/// learn from their own parameters.
///
/// The rectangular shape of the records guarantees that every row has exactly one value per
/// field.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        crate = "serde_crate",
        try_from = "DatasetFields",
        into = "DatasetFields"
    )
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    header: Vec<String>,
    records: Array2<String>,
    name_to_idx: HashMap<String, usize>,
}

/// Serialized form of a dataset, the name index is rebuilt and checked on deserialization
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(crate = "serde_crate")]
struct DatasetFields {
    header: Vec<String>,
    records: Array2<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<DatasetFields> for Dataset {
    type Error = Error;

    fn try_from(fields: DatasetFields) -> Result<Dataset> {
        Dataset::from_records(fields.records, fields.header)
    }
}

#[cfg(feature = "serde")]
impl From<Dataset> for DatasetFields {
    fn from(dataset: Dataset) -> Self {
        DatasetFields {
            header: dataset.header,
            records: dataset.records,
        }
    }
}

fn index_header(header: &[String]) -> Result<HashMap<String, usize>> {
    let mut name_to_idx = HashMap::with_capacity(header.len());
    for (idx, name) in header.iter().enumerate() {
        if name_to_idx.insert(name.clone(), idx).is_some() {
            return Err(Error::DuplicateField(name.clone()));
        }
    }

    Ok(name_to_idx)
}

impl Dataset {
    /// Create a new dataset from raw rows and a header
    ///
    /// ### Parameters
    ///
    /// * `rows`: the observations, every row has to contain one value per header field
    /// * `header`: the unique names of the fields
    ///
    /// ### Returns
    ///
    /// The dataset, or an error if the header contains duplicates or a row has the wrong length.
    pub fn new<S, H>(rows: Vec<Vec<S>>, header: Vec<H>) -> Result<Dataset>
    where
        S: Into<String>,
        H: Into<String>,
    {
        let header: Vec<String> = header.into_iter().map(Into::into).collect();
        let nfields = header.len();
        let nsamples = rows.len();

        let mut values: Vec<String> = Vec::with_capacity(nsamples * nfields);
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != nfields {
                return Err(Error::RaggedRow {
                    row: row_idx,
                    expected: nfields,
                    found: row.len(),
                });
            }
            values.extend(row.into_iter().map(Into::into));
        }

        let records = Array2::from_shape_vec((nsamples, nfields), values)?;

        Dataset::from_records(records, header)
    }

    /// Create a new dataset from an existing matrix of values
    ///
    /// The number of columns has to match the length of the header.
    pub fn from_records(records: Array2<String>, header: Vec<String>) -> Result<Dataset> {
        if records.ncols() != header.len() {
            return Err(Error::Parameters(format!(
                "records have {} columns, but the header names {} fields",
                records.ncols(),
                header.len()
            )));
        }
        let name_to_idx = index_header(&header)?;

        Ok(Dataset {
            header,
            records,
            name_to_idx,
        })
    }

    /// Ordered field names
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Matrix of values with dimensionality (nsamples, nfields)
    pub fn records(&self) -> &Array2<String> {
        &self.records
    }

    /// Number of observations
    pub fn nsamples(&self) -> usize {
        self.records.nrows()
    }

    /// Number of fields
    pub fn nfields(&self) -> usize {
        self.header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nsamples() == 0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.name_to_idx.contains_key(field)
    }

    /// Return the column index of a field
    pub fn field_index(&self, field: &str) -> Result<usize> {
        self.name_to_idx
            .get(field)
            .copied()
            .ok_or_else(|| Error::UnknownField(field.to_string()))
    }

    /// Return all values of a single field
    pub fn column(&self, field: &str) -> Result<ArrayView1<'_, String>> {
        let idx = self.field_index(field)?;

        Ok(self.records.column(idx))
    }

    /// Return the observation at `idx`
    ///
    /// ### Panics
    ///
    /// If `idx` is out of bounds
    pub fn row(&self, idx: usize) -> Row<'_> {
        Row::new(self, self.records.row(idx))
    }

    /// Iterate over all observations in order
    pub fn rows(&self) -> Rows<'_> {
        Rows::new(self)
    }

    /// Project the dataset onto a list of fields
    ///
    /// The resulting dataset contains the requested fields in the given order, the order of the
    /// observations is preserved.
    pub fn project<S: AsRef<str>>(&self, fields: &[S]) -> Result<Dataset> {
        let idxs = fields
            .iter()
            .map(|field| self.field_index(field.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let header = idxs.iter().map(|&idx| self.header[idx].clone()).collect();
        let records = self.records.select(Axis(1), &idxs);

        Dataset::from_records(records, header)
    }

    /// Select a subset of observations by their indices, keeping all fields
    pub fn select(&self, idxs: &[usize]) -> Dataset {
        Dataset {
            header: self.header.clone(),
            records: self.records.select(Axis(0), idxs),
            name_to_idx: self.name_to_idx.clone(),
        }
    }

    /// Group observations by the value they have for `field`
    ///
    /// Every observed value maps to the sub-dataset of observations sharing it. Values which do not
    /// occur in this dataset have no entry.
    pub fn partition_by(&self, field: &str) -> Result<BTreeMap<String, Dataset>> {
        let col = self.column(field)?;

        let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (idx, value) in col.iter().enumerate() {
            groups.entry(value.as_str()).or_default().push(idx);
        }

        Ok(groups
            .into_iter()
            .map(|(value, idxs)| (value.to_string(), self.select(&idxs)))
            .collect())
    }

    /// Count the occurrences of every value of `field`
    pub fn class_counts(&self, field: &str) -> Result<BTreeMap<String, usize>> {
        let col = self.column(field)?;

        let mut counts = BTreeMap::new();
        for value in col.iter() {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }

        Ok(counts)
    }

    /// Collect the distinct values of every field
    pub fn value_universe(&self) -> ValueUniverse {
        self.header
            .iter()
            .zip(self.records.axis_iter(Axis(1)))
            .map(|(name, col)| (name.clone(), col.iter().cloned().collect()))
            .collect()
    }

    /// Shuffle the observations with a random number generator
    pub fn shuffle<R: Rng>(&self, rng: &mut R) -> Dataset {
        let mut idxs: Vec<usize> = (0..self.nsamples()).collect();
        idxs.shuffle(rng);

        self.select(&idxs)
    }

    /// Split the dataset in two parts, the first one contains `ratio` of the observations
    pub fn split_with_ratio(&self, ratio: f32) -> (Dataset, Dataset) {
        let n = (self.nsamples() as f32 * ratio).ceil() as usize;
        let n = n.min(self.nsamples());

        let first: Vec<usize> = (0..n).collect();
        let second: Vec<usize> = (n..self.nsamples()).collect();

        (self.select(&first), self.select(&second))
    }

    /// Performs K-folding on the dataset
    ///
    /// The observations are split into `k` contiguous chunks of (almost) equal size. For every
    /// chunk a pair of `(training, validation)` datasets is returned, where the validation set is
    /// the chunk and the training set contains all remaining observations in their original order.
    ///
    /// ### Returns
    ///
    /// `k` pairs of datasets, or an error if `k < 2` or there are fewer than `k` observations.
    pub fn fold(&self, k: usize) -> Result<Vec<(Dataset, Dataset)>> {
        let nsamples = self.nsamples();
        if k < 2 || k > nsamples {
            return Err(Error::Parameters(format!(
                "cannot split {} samples into {} folds",
                nsamples, k
            )));
        }

        let bounds: Vec<usize> = (0..=k).map(|i| i * nsamples / k).collect();

        Ok(bounds
            .windows(2)
            .map(|w| {
                let (start, end) = (w[0], w[1]);
                let train: Vec<usize> = (0..start).chain(end..nsamples).collect();
                let valid: Vec<usize> = (start..end).collect();

                (self.select(&train), self.select(&valid))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn five_columns() -> Dataset {
        Dataset::new(
            vec![
                vec!["x", "1", "a", "p", "0"],
                vec!["y", "2", "b", "q", "1"],
                vec!["x", "3", "a", "r", "0"],
            ],
            vec!["A", "B", "C", "D", "label"],
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let res = Dataset::new(vec![vec!["a", "b"], vec!["c"]], vec!["f1", "f2"]);

        assert!(matches!(
            res,
            Err(Error::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn new_rejects_duplicate_fields() {
        let res = Dataset::new(vec![vec!["a", "b"]], vec!["f", "f"]);

        assert!(matches!(res, Err(Error::DuplicateField(name)) if name == "f"));
    }

    #[test]
    fn project_keeps_requested_order() {
        let data = five_columns();
        let projected = data.project(&["label", "A"]).unwrap();

        assert_eq!(projected.header(), &["label", "A"]);
        assert_eq!(projected.nsamples(), 3);
        assert_eq!(projected.row(1).get(0), Some("1"));
        assert_eq!(projected.row(1).get(1), Some("y"));
        assert_eq!(projected.field_index("A").unwrap(), 1);
    }

    #[test]
    fn project_truncates_rows() {
        let data = five_columns();
        let projected = data.project(&["A", "label"]).unwrap();

        assert_eq!(projected.header(), &["A", "label"]);
        assert_eq!(projected.nfields(), 2);
        for row in projected.rows() {
            assert_eq!(row.len(), 2);
        }
        assert_eq!(projected.column("label").unwrap().to_vec(), vec!["0", "1", "0"]);
    }

    #[test]
    fn has_field_follows_projection() {
        let data = five_columns();

        assert!(data.has_field("label"));
        assert!(!data.has_field("Z"));
        assert!(!data.project(&["A"]).unwrap().has_field("label"));
    }

    #[test]
    fn project_unknown_field() {
        let data = five_columns();

        assert!(matches!(
            data.project(&["A", "Z"]),
            Err(Error::UnknownField(name)) if name == "Z"
        ));
    }

    #[test]
    fn partition_by_groups_rows() {
        let data = five_columns();
        let parts = data.partition_by("A").unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts["x"].nsamples(), 2);
        assert_eq!(parts["y"].nsamples(), 1);
        assert_eq!(parts["x"].column("B").unwrap().to_vec(), vec!["1", "3"]);
        assert_eq!(parts["y"].header(), data.header());
        assert!(data.partition_by("nope").is_err());
    }

    #[test]
    fn class_counts_and_universe() {
        let data = five_columns();
        let counts = data.class_counts("label").unwrap();

        assert_eq!(counts["0"], 2);
        assert_eq!(counts["1"], 1);

        let universe = data.value_universe();
        assert_eq!(universe.len(), 5);
        assert_eq!(
            universe["A"].iter().cloned().collect::<Vec<_>>(),
            vec!["x", "y"]
        );
    }

    #[test]
    fn empty_dataset() {
        let data = Dataset::new(Vec::<Vec<String>>::new(), vec!["a", "b"]).unwrap();

        assert!(data.is_empty());
        assert!(data.partition_by("a").unwrap().is_empty());
        assert!(data.class_counts("b").unwrap().is_empty());
        assert_eq!(data.project(&["b"]).unwrap().nfields(), 1);
    }

    #[test]
    fn folds_cover_all_samples() {
        let rows: Vec<Vec<String>> = (0..10).map(|i| vec![i.to_string()]).collect();
        let data = Dataset::new(rows, vec!["id"]).unwrap();

        let folds = data.fold(3).unwrap();
        assert_eq!(folds.len(), 3);

        let mut seen = Vec::new();
        for (train, valid) in &folds {
            assert_eq!(train.nsamples() + valid.nsamples(), 10);
            seen.extend(valid.column("id").unwrap().iter().cloned());
        }
        seen.sort_by_key(|x| x.parse::<usize>().unwrap());
        let expected: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        assert_eq!(seen, expected);

        assert!(data.fold(1).is_err());
        assert!(data.fold(11).is_err());
    }

    #[test]
    fn shuffle_keeps_rows() {
        let data = five_columns();
        let mut rng = SmallRng::seed_from_u64(42);
        let shuffled = data.shuffle(&mut rng);

        assert_eq!(shuffled.header(), data.header());
        let mut before = data.column("B").unwrap().to_vec();
        let mut after = shuffled.column("B").unwrap().to_vec();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn split_with_ratio_sizes() {
        let data = five_columns();
        let (train, valid) = data.split_with_ratio(0.5);

        assert_eq!(train.nsamples(), 2);
        assert_eq!(valid.nsamples(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let data = five_columns();
        let json = serde_json::to_string(&data).unwrap();
        let restored: Dataset = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, data);
        assert_eq!(restored.field_index("label").unwrap(), 4);
        assert_eq!(restored.class_counts("A").unwrap()["x"], 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_rejects_inconsistent_documents() {
        // the serialized name index is not trusted
        let stale_index = r#"{"header":["a"],"records":{"v":1,"dim":[1,1],"data":["x"]},"name_to_idx":{"a":4}}"#;
        let data: Dataset = serde_json::from_str(stale_index).unwrap();
        assert_eq!(data.class_counts("a").unwrap()["x"], 1);

        let short_header = r#"{"header":["a"],"records":{"v":1,"dim":[1,2],"data":["x","y"]}}"#;
        assert!(serde_json::from_str::<Dataset>(short_header).is_err());

        let duplicates = r#"{"header":["a","a"],"records":{"v":1,"dim":[1,2],"data":["x","y"]}}"#;
        assert!(serde_json::from_str::<Dataset>(duplicates).is_err());
    }
}
