use log::debug;
use ndarray::Array1;

use crate::{
    MlErr, Result,
    arch::loss::LossFn,
    optimization::Optimizer,
    training::Objective,
};

/// The result of minimizing an `Objective`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    pub params: Array1<f64>,
    /// The amount of optimizer steps taken.
    pub n_iter: usize,
    /// Whether the gradient got below the tolerance.
    pub converged: bool,
    /// The unpenalized loss at `params`.
    pub loss: f64,
}

/// Drives an `Optimizer` over an `Objective` until the gradient vanishes or the
/// iteration budget runs out.
pub struct Trainer<O: Optimizer> {
    optimizer: O,
    max_iter: usize,
    tol: f64,
}

impl<O: Optimizer> Trainer<O> {
    /// Creates a new `Trainer`.
    ///
    /// # Arguments
    /// * `optimizer` - The optimizer that dictates how to update the parameters on each step.
    /// * `max_iter` - The maximum amount of steps.
    /// * `tol` - Training stops once the largest gradient component is at most `tol`.
    pub fn new(optimizer: O, max_iter: usize, tol: f64) -> Self {
        Self {
            optimizer,
            max_iter,
            tol,
        }
    }

    /// Minimizes `objective` starting from all-zero parameters.
    ///
    /// # Returns
    /// The outcome, or an error if the optimizer fails or the parameters diverge.
    pub fn train<L: LossFn>(&mut self, objective: &Objective<L>) -> Result<TrainOutcome> {
        let mut params = Array1::zeros(objective.size());
        let mut n_iter = 0;

        let converged = loop {
            let grad = objective.gradient(params.view());
            if grad.iter().any(|g| !g.is_finite()) {
                return Err(MlErr::Diverged { iteration: n_iter });
            }

            let grad_max = grad.iter().fold(0.0f64, |m, g| m.max(g.abs()));

            debug!(
                "iteration {n_iter}: objective {:.6}, max |grad| {grad_max:.3e}",
                objective.value(params.view())
            );

            if grad_max <= self.tol {
                break true;
            }

            if n_iter == self.max_iter {
                break false;
            }

            self.optimizer
                .update_params(objective, &mut params, grad.view())?;
            n_iter += 1;
        };

        let loss = objective.loss(params.view());

        Ok(TrainOutcome {
            params,
            n_iter,
            converged,
            loss,
        })
    }
}
