use ndarray::{Array1, ArrayView1};

/// A loss over the raw scores (logits) a linear model produces.
pub trait LossFn {
    /// Returns the mean loss of the scores `z` against the targets `y`.
    fn loss(&self, z: ArrayView1<f64>, y: ArrayView1<f64>) -> f64;

    /// Returns the derivative of the mean loss with respect to each score.
    fn loss_prime(&self, z: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64>;

    /// Returns the second derivative of the mean loss with respect to each score.
    fn curvature(&self, z: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64>;
}
