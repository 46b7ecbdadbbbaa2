use ndarray::{Array1, Array2};

const PIVOT_EPS: f64 = 1e-12;

/// Solves the square system `a * x = b` by gaussian elimination with partial pivoting.
///
/// # Arguments
/// * `a` - The coefficients, consumed as scratch space.
/// * `b` - The right hand side, consumed as scratch space.
///
/// # Returns
/// The solution, or `None` if `a` isn't square, doesn't match `b` or is (numerically)
/// singular.
pub fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();
    if a.dim() != (n, n) {
        return None;
    }

    let scale = a.iter().fold(0.0f64, |m, x| m.max(x.abs())).max(1.0);

    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))?;
        if a[[pivot, col]].abs() <= PIVOT_EPS * scale {
            return None;
        }

        if pivot != col {
            for k in 0..n {
                a.swap([pivot, k], [col, k]);
            }
            b.swap(pivot, col);
        }

        for row in col + 1..n {
            let factor = a[[row, col]] / a[[col, col]];
            if factor == 0.0 {
                continue;
            }

            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[[row, k]] * x[k]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }

    Some(x)
}
