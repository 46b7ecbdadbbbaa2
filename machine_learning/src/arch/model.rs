use ndarray::{Array1, ArrayView2};

use crate::error::Result;

pub trait Classifier {
    /// Predicts one label per row of `points`, in order.
    ///
    /// # Arguments
    /// * `points` - A `(n, features)` matrix.
    ///
    /// # Returns
    /// The labels, or an error if the amount of columns doesn't match the fitted features.
    fn predict(&self, points: ArrayView2<f64>) -> Result<Array1<usize>>;
}
