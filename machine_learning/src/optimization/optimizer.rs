use ndarray::{Array1, ArrayView1};

use crate::{Result, arch::loss::LossFn, training::Objective};

pub trait Optimizer {
    /// Takes one step over `objective`, updating `params` in place.
    ///
    /// # Arguments
    /// * `objective` - The function being minimized.
    /// * `params` - The current parameters.
    /// * `grad` - The gradient of `objective` at `params`.
    ///
    /// # Returns
    /// An error if the step can't be computed.
    fn update_params<L: LossFn>(
        &mut self,
        objective: &Objective<L>,
        params: &mut Array1<f64>,
        grad: ArrayView1<f64>,
    ) -> Result<()>;
}
