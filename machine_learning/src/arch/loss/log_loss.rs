use ndarray::{Array1, ArrayView1, Zip};

use super::LossFn;
use crate::arch::activations::{Sigmoid, softplus};

/// Binary cross-entropy of a sigmoid-linked score, `ln(1 + e^z) - y * z`.
#[derive(Default, Clone, Copy)]
pub struct LogLoss;

impl LogLoss {
    /// Returns a new `LogLoss`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for LogLoss {
    fn loss(&self, z: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
        Zip::from(&z)
            .and(&y)
            .map_collect(|&z, &y| softplus(z) - y * z)
            .mean()
            .unwrap_or_default()
    }

    fn loss_prime(&self, z: ArrayView1<f64>, y: ArrayView1<f64>) -> Array1<f64> {
        let sigmoid = Sigmoid::new();
        let n = z.len().max(1) as f64;

        Zip::from(&z)
            .and(&y)
            .map_collect(|&z, &y| (sigmoid.f(z) - y) / n)
    }

    fn curvature(&self, z: ArrayView1<f64>, _y: ArrayView1<f64>) -> Array1<f64> {
        let sigmoid = Sigmoid::new();
        let n = z.len().max(1) as f64;

        z.mapv(|z| sigmoid.df(z) / n)
    }
}
