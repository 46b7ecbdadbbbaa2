use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, concatenate, s};
use serde::Deserialize;

use super::{Classifier, activations::Sigmoid, loss::LogLoss};
use crate::{
    MlErr, Result,
    dataset::Dataset,
    optimization::{GradientDescent, Newton},
    training::{Objective, TrainOutcome, Trainer},
};

/// The algorithm used to minimize the regularized log loss.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Solver {
    #[default]
    Newton,
    GradientDescent {
        learning_rate: f64,
    },
}

/// An unfitted binary logistic regression.
///
/// Fitting minimizes `C * Σ logloss + ½‖w‖²`, with the intercept left out of the penalty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogisticRegression {
    /// Inverse of the L2 regularization strength.
    pub c: f64,
    pub fit_intercept: bool,
    pub max_iter: usize,
    /// Training stops once the largest gradient component is at most `tol`.
    pub tol: f64,
    pub solver: Solver,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            c: 1.0,
            fit_intercept: true,
            max_iter: 100,
            tol: 1e-4,
            solver: Solver::default(),
        }
    }
}

impl LogisticRegression {
    /// Returns a new `LogisticRegression` with the default hyperparameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fits the model on a binary dataset.
    ///
    /// Not converging within `max_iter` steps isn't an error, it's logged and recorded in
    /// the fitted model.
    ///
    /// # Arguments
    /// * `dataset` - A dataset whose labels are all 0 or 1, with both present.
    ///
    /// # Returns
    /// The fitted model or an error if the hyperparameters or labels are invalid, or the
    /// solver fails.
    pub fn fit(&self, dataset: &Dataset) -> Result<FittedLogistic> {
        self.validate()?;

        let y = binary_targets(dataset.labels())?;
        let x = dataset.features();
        let (nsamples, nfeatures) = x.dim();

        let design = if self.fit_intercept {
            let ones = Array2::ones((nsamples, 1));
            concatenate(Axis(1), &[x, ones.view()]).map_err(|_| MlErr::SizeMismatch {
                what: "design matrix",
                got: ones.nrows(),
                expected: nsamples,
            })?
        } else {
            x.to_owned()
        };

        let alpha = 1.0 / (self.c * nsamples as f64);
        let objective = Objective::new(design, y, alpha, nfeatures, LogLoss::new())?;

        let TrainOutcome {
            params,
            n_iter,
            converged,
            loss,
        } = match self.solver {
            Solver::Newton => Trainer::new(Newton::new(), self.max_iter, self.tol).train(&objective)?,
            Solver::GradientDescent { learning_rate } => {
                Trainer::new(GradientDescent::new(learning_rate), self.max_iter, self.tol)
                    .train(&objective)?
            }
        };

        if converged {
            debug!("logistic regression converged after {n_iter} iterations, loss {loss:.6}");
        } else {
            warn!(
                "logistic regression failed to converge after {n_iter} iterations (tol {}), \
                 consider increasing max_iter",
                self.tol
            );
        }

        let weights = params.slice(s![..nfeatures]).to_owned();
        let intercept = if self.fit_intercept {
            params[nfeatures]
        } else {
            0.0
        };

        Ok(FittedLogistic {
            weights,
            intercept,
            n_iter,
            converged,
            loss,
        })
    }

    fn validate(&self) -> Result<()> {
        if !self.c.is_finite() || self.c <= 0.0 {
            return Err(MlErr::InvalidHyperparameter {
                name: "c",
                value: self.c,
            });
        }

        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(MlErr::InvalidHyperparameter {
                name: "tol",
                value: self.tol,
            });
        }

        match self.solver {
            Solver::GradientDescent { learning_rate }
                if !learning_rate.is_finite() || learning_rate <= 0.0 =>
            {
                Err(MlErr::InvalidHyperparameter {
                    name: "learning_rate",
                    value: learning_rate,
                })
            }
            _ => Ok(()),
        }
    }
}

fn binary_targets(labels: ArrayView1<usize>) -> Result<Array1<f64>> {
    if labels.is_empty() {
        return Err(MlErr::EmptyDataset);
    }

    if labels.iter().any(|&l| l > 1) {
        return Err(MlErr::InvalidLabels {
            reason: "only labels 0 and 1 are supported",
        });
    }

    if !labels.iter().any(|&l| l == 0) || !labels.iter().any(|&l| l == 1) {
        return Err(MlErr::InvalidLabels {
            reason: "both classes need at least one sample",
        });
    }

    Ok(labels.mapv(|l| l as f64))
}

/// A fitted logistic regression: a linear decision boundary `w·x + b = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLogistic {
    weights: Array1<f64>,
    intercept: f64,
    n_iter: usize,
    converged: bool,
    loss: f64,
}

impl FittedLogistic {
    #[inline]
    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    #[inline]
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    #[inline]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// The mean log loss over the training set.
    #[inline]
    pub fn loss(&self) -> f64 {
        self.loss
    }

    /// Computes the signed score `w·x + b` of each row of `points`.
    pub fn decision_function(&self, points: ArrayView2<f64>) -> Result<Array1<f64>> {
        if points.ncols() != self.weights.len() {
            return Err(MlErr::SizeMismatch {
                what: "point features",
                got: points.ncols(),
                expected: self.weights.len(),
            });
        }

        Ok(points.dot(&self.weights) + self.intercept)
    }

    /// Computes the probability of each row of `points` belonging to class 1.
    pub fn predict_proba(&self, points: ArrayView2<f64>) -> Result<Array1<f64>> {
        let sigmoid = Sigmoid::new();
        Ok(self.decision_function(points)?.mapv(|z| sigmoid.f(z)))
    }
}

impl Classifier for FittedLogistic {
    fn predict(&self, points: ArrayView2<f64>) -> Result<Array1<usize>> {
        let scores = self.decision_function(points)?;
        Ok(scores.mapv(|z| usize::from(z > 0.0)))
    }
}
