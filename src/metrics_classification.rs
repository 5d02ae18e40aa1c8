//! Common metrics for performance evaluation of classifiers
//!
//! Scoring is essential for classification tasks. This module implements a confusion matrix over
//! categorical labels with precision, recall and accuracy, together with the summary statistics
//! used when scores of several cross-validation folds are aggregated.
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use ndarray::{Array1, Array2, Axis};

use crate::error::{Error, Result};

/// Confusion matrix for multi-label evaluation
///
/// A confusion matrix shows predictions in a matrix, where rows correspond to target and columns
/// to predicted. The diagonal entries are correct predictions. Models may refuse to predict a
/// sample, these samples are counted in an additional last column and are always wrong.
pub struct ConfusionMatrix {
    matrix: Array2<usize>,
    members: Vec<String>,
}

impl ConfusionMatrix {
    /// Create a confusion matrix from predictions and the ground truth
    ///
    /// ### Returns
    ///
    /// The confusion matrix, or an error if both sides have a different number of samples.
    pub fn from_predictions<P, S, I>(predictions: &[Option<P>], ground_truth: I) -> Result<Self>
    where
        P: AsRef<str>,
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let ground_truth: Vec<S> = ground_truth.into_iter().collect();
        if ground_truth.len() != predictions.len() {
            return Err(Error::Parameters(format!(
                "{} predictions for {} ground truth labels",
                predictions.len(),
                ground_truth.len()
            )));
        }

        let members: Vec<String> = ground_truth
            .iter()
            .map(|x| x.as_ref())
            .chain(predictions.iter().flatten().map(|x| x.as_ref()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect();

        // create a map from class label to index
        let set = members
            .iter()
            .enumerate()
            .map(|(idx, label)| (label.as_str(), idx))
            .collect::<HashMap<_, usize>>();

        let unknown = members.len();
        let mut matrix = Array2::zeros((members.len(), members.len() + 1));
        for (truth, pred) in ground_truth.iter().zip(predictions) {
            let row = set[truth.as_ref()];
            let col = pred.as_ref().map_or(unknown, |p| set[p.as_ref()]);

            matrix[(row, col)] += 1;
        }

        Ok(ConfusionMatrix { matrix, members })
    }

    /// Sorted labels which index the rows and the first columns of the matrix
    pub fn labels(&self) -> &[String] {
        &self.members
    }

    /// Number of evaluated samples
    pub fn nsamples(&self) -> usize {
        self.matrix.sum()
    }

    /// Number of samples for which no prediction was made
    pub fn unknown(&self) -> usize {
        self.matrix.column(self.members.len()).sum()
    }

    /// Count how often `truth` was predicted as `predicted`
    pub fn count(&self, truth: &str, predicted: &str) -> usize {
        let row = self.members.iter().position(|x| x == truth);
        let col = self.members.iter().position(|x| x == predicted);

        match (row, col) {
            (Some(row), Some(col)) => self.matrix[(row, col)],
            _ => 0,
        }
    }

    fn correct(&self) -> usize {
        self.matrix.diag().sum()
    }

    /// Calculate precision for every class
    pub fn precision(&self) -> Array1<f32> {
        let predicted = self.matrix.sum_axis(Axis(0));

        self.matrix
            .diag()
            .iter()
            .zip(predicted.iter())
            .map(|(tp, total)| ratio(*tp, *total))
            .collect()
    }

    /// Calculate recall for every class
    pub fn recall(&self) -> Array1<f32> {
        let actual = self.matrix.sum_axis(Axis(1));

        self.matrix
            .diag()
            .iter()
            .zip(actual.iter())
            .map(|(tp, total)| ratio(*tp, *total))
            .collect()
    }

    /// Return mean accuracy
    ///
    /// Samples without a prediction count as misclassified. The accuracy of an empty matrix is
    /// zero.
    pub fn accuracy(&self) -> f32 {
        ratio(self.correct(), self.nsamples())
    }
}

fn ratio(a: usize, b: usize) -> f32 {
    if b == 0 {
        0.0
    } else {
        a as f32 / b as f32
    }
}

impl fmt::Debug for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let len = self.members.len();
        writeln!(f)?;
        write!(f, "{: <10}", "classes")?;
        for member in &self.members {
            write!(f, " | {: <10}", member)?;
        }
        writeln!(f, " | {: <10}", "unknown")?;

        for i in 0..len {
            write!(f, "{: <10}", self.members[i])?;

            for j in 0..=len {
                write!(f, " | {: <10}", self.matrix[(i, j)])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Classification functions
///
/// Contains only the routine for the construction of the confusion matrix. The ground truth can be
/// any sequence of labels, for example a column of a dataset.
pub trait ToConfusionMatrix<I> {
    fn confusion_matrix(&self, ground_truth: I) -> Result<ConfusionMatrix>;
}

impl<P, S, I> ToConfusionMatrix<I> for [Option<P>]
where
    P: AsRef<str>,
    S: AsRef<str>,
    I: IntoIterator<Item = S>,
{
    fn confusion_matrix(&self, ground_truth: I) -> Result<ConfusionMatrix> {
        ConfusionMatrix::from_predictions(self, ground_truth)
    }
}

impl<P, S, I> ToConfusionMatrix<I> for Vec<Option<P>>
where
    P: AsRef<str>,
    S: AsRef<str>,
    I: IntoIterator<Item = S>,
{
    fn confusion_matrix(&self, ground_truth: I) -> Result<ConfusionMatrix> {
        ConfusionMatrix::from_predictions(self, ground_truth)
    }
}

/// Mean and population standard deviation of a list of scores
///
/// Returns `(0, 0)` for an empty list.
pub fn mean_std(values: &[f32]) -> (f32, f32) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f32;
    let mean = values.iter().sum::<f32>() / n;
    let var = values.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>() / n;

    (mean, var.sqrt())
}
