use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::{MlErr, Result, arch::loss::LossFn};

/// An L2 regularized loss over a linear model's parameters.
///
/// `value(θ) = loss(X θ, y) + α / 2 * Σ θ_j²`, where the sum only runs over the first
/// `penalized` parameters so that an intercept column can be left unpenalized.
pub struct Objective<L: LossFn> {
    x: Array2<f64>,
    y: Array1<f64>,
    alpha: f64,
    penalized: usize,
    loss_fn: L,
}

impl<L: LossFn> Objective<L> {
    /// Creates a new `Objective`.
    ///
    /// # Arguments
    /// * `x` - The design matrix, one row per sample and one column per parameter.
    /// * `y` - The targets.
    /// * `alpha` - The L2 regularization strength.
    /// * `penalized` - The amount of leading parameters affected by the penalty.
    /// * `loss_fn` - The loss of the model's scores.
    ///
    /// # Returns
    /// An error if the amount of rows and targets differ.
    pub fn new(
        x: Array2<f64>,
        y: Array1<f64>,
        alpha: f64,
        penalized: usize,
        loss_fn: L,
    ) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                what: "targets",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        let penalized = penalized.min(x.ncols());

        Ok(Self {
            x,
            y,
            alpha,
            penalized,
            loss_fn,
        })
    }

    /// The amount of parameters.
    pub fn size(&self) -> usize {
        self.x.ncols()
    }

    fn scores(&self, params: ArrayView1<f64>) -> Array1<f64> {
        self.x.dot(&params)
    }

    /// The loss without the penalty term.
    pub fn loss(&self, params: ArrayView1<f64>) -> f64 {
        self.loss_fn.loss(self.scores(params).view(), self.y.view())
    }

    pub fn value(&self, params: ArrayView1<f64>) -> f64 {
        let penalty: f64 = params.iter().take(self.penalized).map(|p| p * p).sum();
        self.loss(params) + 0.5 * self.alpha * penalty
    }

    pub fn gradient(&self, params: ArrayView1<f64>) -> Array1<f64> {
        let z = self.scores(params);
        let d = self.loss_fn.loss_prime(z.view(), self.y.view());

        let mut grad = self.x.t().dot(&d);
        for j in 0..self.penalized {
            grad[j] += self.alpha * params[j];
        }

        grad
    }

    pub fn hessian(&self, params: ArrayView1<f64>) -> Array2<f64> {
        let z = self.scores(params);
        let curvature = self.loss_fn.curvature(z.view(), self.y.view());

        let weighted = &self.x * &curvature.insert_axis(Axis(1));
        let mut hessian = self.x.t().dot(&weighted);
        for j in 0..self.penalized {
            hessian[[j, j]] += self.alpha;
        }

        hessian
    }
}
