use ndarray::ArrayView1;

use crate::{MlErr, Result};

fn check_lengths(y_pred: ArrayView1<usize>, y: ArrayView1<usize>) -> Result<()> {
    if y_pred.len() != y.len() {
        return Err(MlErr::SizeMismatch {
            what: "predictions",
            got: y_pred.len(),
            expected: y.len(),
        });
    }

    Ok(())
}

/// The fraction of predictions equal to their target.
///
/// # Returns
/// The accuracy, or an error if the lengths differ or there are no targets.
pub fn accuracy(y_pred: ArrayView1<usize>, y: ArrayView1<usize>) -> Result<f64> {
    check_lengths(y_pred, y)?;
    if y.is_empty() {
        return Err(MlErr::EmptyDataset);
    }

    let hits = y_pred.iter().zip(&y).filter(|(p, t)| p == t).count();
    Ok(hits as f64 / y.len() as f64)
}

/// The fraction of samples of class `label` that were predicted as `label`.
///
/// # Returns
/// `None` if no target is `label`, or an error if the lengths differ.
pub fn recall(y_pred: ArrayView1<usize>, y: ArrayView1<usize>, label: usize) -> Result<Option<f64>> {
    check_lengths(y_pred, y)?;

    let (hits, total) = y_pred
        .iter()
        .zip(&y)
        .filter(|&(_, &t)| t == label)
        .fold((0usize, 0usize), |(hits, total), (&p, _)| {
            (hits + usize::from(p == label), total + 1)
        });

    Ok((total > 0).then(|| hits as f64 / total as f64))
}
