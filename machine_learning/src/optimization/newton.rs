use log::trace;
use ndarray::{Array1, ArrayView1};

use super::{Optimizer, solve};
use crate::{MlErr, Result, arch::loss::LossFn, training::Objective};

/// Sufficient decrease constant of the backtracking line search.
const ARMIJO: f64 = 1e-4;
const MAX_HALVINGS: usize = 40;

/// Newton's method with a backtracking line search.
///
/// Each step solves `H * d = g` for the objective's hessian `H` and gradient `g` and then
/// halves the step length until the objective decreases enough.
#[derive(Default)]
pub struct Newton {
    iteration: usize,
}

impl Newton {
    /// Returns a new `Newton`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Optimizer for Newton {
    fn update_params<L: LossFn>(
        &mut self,
        objective: &Objective<L>,
        params: &mut Array1<f64>,
        grad: ArrayView1<f64>,
    ) -> Result<()> {
        let iteration = self.iteration;
        self.iteration += 1;

        let hessian = objective.hessian(params.view());
        let direction = solve(hessian, grad.to_owned()).ok_or(MlErr::SingularSystem { iteration })?;

        let current = objective.value(params.view());
        let slope = grad.dot(&direction);
        let mut t = 1.0;

        for _ in 0..MAX_HALVINGS {
            let candidate = &*params - &(&direction * t);
            if objective.value(candidate.view()) <= current - ARMIJO * t * slope {
                *params = candidate;
                return Ok(());
            }

            t *= 0.5;
        }

        trace!("line search exhausted at iteration {iteration}, taking step {t}");
        params.scaled_add(-t, &direction);
        Ok(())
    }
}
