use super::{Dataset, Record};
use ndarray::ArrayView1;
use std::collections::HashMap;

/// A single observation borrowed from a dataset
///
/// Values can be accessed by position or, through the [`Record`] trait, by field name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    dataset: &'a Dataset,
    values: ArrayView1<'a, String>,
}

impl<'a> Row<'a> {
    pub(crate) fn new(dataset: &'a Dataset, values: ArrayView1<'a, String>) -> Self {
        Row { dataset, values }
    }

    /// Value at column `idx`, `None` if out of bounds
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy the observation into a map from field name to value
    pub fn to_map(&self) -> HashMap<String, String> {
        self.dataset
            .header()
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect()
    }
}

impl<'a> Record for Row<'a> {
    fn value(&self, field: &str) -> Option<&str> {
        self.dataset
            .field_index(field)
            .ok()
            .and_then(|idx| self.values.get(idx))
            .map(|v| v.as_str())
    }
}

/// Iterator over the observations of a dataset in order
pub struct Rows<'a> {
    dataset: &'a Dataset,
    idx: usize,
}

impl<'a> Rows<'a> {
    pub fn new(dataset: &'a Dataset) -> Rows<'a> {
        Rows { dataset, idx: 0 }
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.dataset.nsamples() {
            return None;
        }

        let row = self.dataset.row(self.idx);
        self.idx += 1;

        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dataset.nsamples() - self.idx;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Rows<'a> {}
