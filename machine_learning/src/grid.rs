use ndarray::{Array1, Array2};

use crate::{MlErr, Result, dataset::Dataset};

/// Builds evenly spaced values over the half-open interval `[start, stop)`.
///
/// The amount of values is `ceil((stop - start) / step)`, value `i` being
/// `start + i * step`, so `stop` is never included.
///
/// # Arguments
/// * `start` - The first value.
/// * `stop` - The exclusive upper limit.
/// * `step` - The spacing between values.
///
/// # Returns
/// The values or an error if `step` isn't finite and positive.
pub fn arange(start: f64, stop: f64, step: f64) -> Result<Array1<f64>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(MlErr::InvalidStep { step });
    }

    let span = (stop - start) / step;
    let len = if span > 0.0 { span.ceil() as usize } else { 0 };

    Ok(Array1::from_iter((0..len).map(|i| start + i as f64 * step)))
}

/// A rectangular lattice of evaluation points, the cartesian product of two axes.
///
/// The lattice is laid out row-major with `x2` selecting the row and `x1` the column, so
/// one value per point reshapes into a `(x2.len(), x1.len())` surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Meshgrid {
    x1: Array1<f64>,
    x2: Array1<f64>,
    step: f64,
}

impl Meshgrid {
    /// Creates a new `Meshgrid` from two already spaced axes.
    ///
    /// # Arguments
    /// * `x1` - The first feature's coordinates (columns).
    /// * `x2` - The second feature's coordinates (rows).
    /// * `step` - The spacing the axes were built with.
    pub fn new(x1: Array1<f64>, x2: Array1<f64>, step: f64) -> Self {
        Self { x1, x2, step }
    }

    /// Creates the `Meshgrid` that covers every sample of `dataset`.
    ///
    /// Axis `i` spans `[min_i - margin, max_i + margin)` in steps of `step`.
    ///
    /// # Arguments
    /// * `dataset` - The dataset whose feature ranges are covered.
    /// * `margin` - The padding added on both ends of each axis.
    /// * `step` - The spacing between consecutive coordinates.
    ///
    /// # Returns
    /// The lattice, or an error if the dataset is empty or the step is invalid.
    pub fn covering(dataset: &Dataset, margin: f64, step: f64) -> Result<Self> {
        let (min1, max1) = dataset.feature_range(0)?;
        let (min2, max2) = dataset.feature_range(1)?;

        let x1 = arange(min1 - margin, max1 + margin, step)?;
        let x2 = arange(min2 - margin, max2 + margin, step)?;

        Ok(Self::new(x1, x2, step))
    }

    #[inline]
    pub fn x1(&self) -> &Array1<f64> {
        &self.x1
    }

    #[inline]
    pub fn x2(&self) -> &Array1<f64> {
        &self.x2
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The surface shape, `(x2.len(), x1.len())`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.x2.len(), self.x1.len())
    }

    /// The amount of points in the lattice.
    #[inline]
    pub fn len(&self) -> usize {
        self.x1.len() * self.x2.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The first and last coordinate of each axis, `((x1_min, x1_max), (x2_min, x2_max))`.
    ///
    /// # Returns
    /// `None` if any axis is empty.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let x1 = (*self.x1.first()?, *self.x1.last()?);
        let x2 = (*self.x2.first()?, *self.x2.last()?);
        Some((x1, x2))
    }

    /// Flattens the lattice into a `(len, 2)` matrix of points.
    ///
    /// Row `r * x1.len() + c` holds `(x1[c], x2[r])`.
    pub fn points(&self) -> Array2<f64> {
        let ncols = self.x1.len();

        Array2::from_shape_fn((self.len(), 2), |(k, j)| match j {
            0 => self.x1[k % ncols],
            _ => self.x2[k / ncols],
        })
    }

    /// Reshapes one value per lattice point back into the lattice's surface.
    ///
    /// # Arguments
    /// * `values` - The values in the same order as `points`.
    ///
    /// # Returns
    /// A `shape()` array or an error if there isn't exactly one value per point.
    pub fn reshape<T>(&self, values: Array1<T>) -> Result<Array2<T>> {
        let got = values.len();
        let expected = self.len();

        if got != expected {
            return Err(MlErr::SizeMismatch {
                what: "grid values",
                got,
                expected,
            });
        }

        values
            .into_shape_with_order(self.shape())
            .map_err(|_| MlErr::SizeMismatch {
                what: "grid values",
                got,
                expected,
            })
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn arange_is_half_open() {
        let xs = arange(0.0, 1.0, 0.25).unwrap();
        assert_eq!(xs, array![0.0, 0.25, 0.5, 0.75]);

        let xs = arange(0.0, 1.1, 0.25).unwrap();
        assert_eq!(xs.len(), 5);
        assert!((xs[4] - 1.0).abs() < EPS);
    }

    #[test]
    fn arange_empty_and_invalid() {
        assert!(arange(1.0, 1.0, 0.1).unwrap().is_empty());
        assert!(arange(2.0, 1.0, 0.1).unwrap().is_empty());
        assert_eq!(arange(0.0, 1.0, 0.0), Err(MlErr::InvalidStep { step: 0.0 }));
        assert!(arange(0.0, 1.0, -0.1).is_err());
        assert!(arange(0.0, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn points_are_row_major() {
        let grid = Meshgrid::new(array![0.0, 1.0, 2.0], array![10.0, 20.0], 1.0);
        let points = grid.points();

        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.len(), 6);
        assert_eq!(
            points,
            array![
                [0.0, 10.0],
                [1.0, 10.0],
                [2.0, 10.0],
                [0.0, 20.0],
                [1.0, 20.0],
                [2.0, 20.0],
            ]
        );
    }

    #[test]
    fn reshape_matches_points_layout() {
        let grid = Meshgrid::new(array![0.0, 1.0, 2.0], array![10.0, 20.0], 1.0);
        let sums = grid.points().map_axis(ndarray::Axis(1), |p| p[0] + p[1]);

        let surface = grid.reshape(sums).unwrap();
        assert_eq!(surface, array![[10.0, 11.0, 12.0], [20.0, 21.0, 22.0]]);
    }

    #[test]
    fn reshape_rejects_wrong_length() {
        let grid = Meshgrid::new(array![0.0, 1.0], array![0.0, 1.0], 1.0);
        let err = grid.reshape(Array1::<usize>::zeros(3)).unwrap_err();

        assert_eq!(
            err,
            MlErr::SizeMismatch {
                what: "grid values",
                got: 3,
                expected: 4
            }
        );
    }

    #[test]
    fn covering_pads_dataset_ranges() {
        let features = array![[-2.0, 0.5], [1.0, 3.0], [0.3, -1.25]];
        let ds = Dataset::new(features, array![0, 1, 0]).unwrap();
        let grid = Meshgrid::covering(&ds, 1.0, 0.1).unwrap();

        let x1 = grid.x1();
        let x2 = grid.x2();
        assert!((x1[0] - -3.0).abs() < EPS);
        assert!((x2[0] - -2.25).abs() < EPS);
        assert!(x1[x1.len() - 1] < 2.0 && x1[x1.len() - 1] > 2.0 - 0.1 - EPS);
        assert!(x2[x2.len() - 1] < 4.0 && x2[x2.len() - 1] > 4.0 - 0.1 - EPS);

        for w in x1.windows(2) {
            assert!((w[1] - w[0] - 0.1).abs() < EPS);
        }

        let ((lo1, _), (lo2, _)) = grid.bounds().unwrap();
        assert_eq!((lo1, lo2), (x1[0], x2[0]));
        assert_eq!(grid.points().nrows(), x1.len() * x2.len());
    }

    #[test]
    fn empty_axis_yields_empty_grid() {
        let grid = Meshgrid::new(array![], array![1.0, 2.0], 0.1);

        assert!(grid.is_empty());
        assert!(grid.bounds().is_none());
        assert_eq!(grid.points().dim(), (0, 2));
        assert_eq!(grid.reshape(Array1::<f64>::zeros(0)).unwrap().dim(), (2, 0));
    }
}
