mod blobs;

pub use blobs::{BlobsSpec, make_blobs};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::{Rng, seq::SliceRandom};

use crate::{MlErr, Result};

/// The amount of features every sample carries.
pub const N_FEATURES: usize = 2;

/// A single labeled point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub features: [f64; N_FEATURES],
    pub label: usize,
}

/// An immutable, in-memory collection of labeled 2-D samples.
///
/// Row `i` of `features` is labeled by `labels[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f64>,
    labels: Array1<usize>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `features` - A `(n, 2)` matrix of feature vectors.
    /// * `labels` - One label per feature row.
    ///
    /// # Returns
    /// An error if the amount of columns isn't 2 or the amount of rows and labels differ.
    pub fn new(features: Array2<f64>, labels: Array1<usize>) -> Result<Self> {
        if features.ncols() != N_FEATURES {
            return Err(MlErr::SizeMismatch {
                what: "feature columns",
                got: features.ncols(),
                expected: N_FEATURES,
            });
        }

        if features.nrows() != labels.len() {
            return Err(MlErr::SizeMismatch {
                what: "labels",
                got: labels.len(),
                expected: features.nrows(),
            });
        }

        Ok(Self { features, labels })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    #[inline]
    pub fn labels(&self) -> ArrayView1<'_, usize> {
        self.labels.view()
    }

    /// Returns the sample at `idx`, or `None` if out of bounds.
    pub fn sample(&self, idx: usize) -> Option<Sample> {
        let label = *self.labels.get(idx)?;
        let row = self.features.row(idx);

        Some(Sample {
            features: [row[0], row[1]],
            label,
        })
    }

    /// Iterates the samples in row order.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.len()).filter_map(|i| self.sample(i))
    }

    /// Computes the range covered by one feature.
    ///
    /// # Arguments
    /// * `axis` - The feature column, either 0 or 1.
    ///
    /// # Returns
    /// The `(min, max)` pair of the column or an error if the dataset is empty or the axis
    /// doesn't exist.
    pub fn feature_range(&self, axis: usize) -> Result<(f64, f64)> {
        if axis >= N_FEATURES {
            return Err(MlErr::SizeMismatch {
                what: "feature axis",
                got: axis,
                expected: N_FEATURES - 1,
            });
        }

        if self.is_empty() {
            return Err(MlErr::EmptyDataset);
        }

        let range = self.features.column(axis).iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), &x| (min.min(x), max.max(x)),
        );

        Ok(range)
    }

    /// Counts the samples of each label, indexed by label.
    pub fn class_counts(&self) -> Vec<usize> {
        let nclasses = self.labels.iter().max().map_or(0, |&max| max + 1);
        let mut counts = vec![0; nclasses];

        for &label in &self.labels {
            counts[label] += 1;
        }

        counts
    }

    /// Returns the row indices of the samples labeled `label`, in row order.
    pub fn rows_with_label(&self, label: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter_map(|(i, &l)| (l == label).then_some(i))
            .collect()
    }

    /// Returns a copy of this dataset with its rows permuted.
    ///
    /// # Arguments
    /// * `rng` - The random number generator driving the permutation.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);

        Self {
            features: self.features.select(Axis(0), &order),
            labels: self.labels.select(Axis(0), &order),
        }
    }
}
