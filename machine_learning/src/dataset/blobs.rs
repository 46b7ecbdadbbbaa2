use log::debug;
use ndarray::{Array1, Array2, s};
use ndarray_rand::RandomExt;
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::Normal;
use serde::Deserialize;

use super::{Dataset, N_FEATURES};
use crate::{MlErr, Result};

/// Describes a set of isotropic gaussian blobs, one per class.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlobsSpec {
    /// The amount of samples drawn for each class.
    pub sizes: Vec<usize>,
    /// The center of each class' blob.
    pub centers: Vec<[f64; N_FEATURES]>,
    /// The standard deviation shared by every blob.
    pub std_dev: f64,
    pub seed: u64,
}

impl Default for BlobsSpec {
    fn default() -> Self {
        Self {
            sizes: vec![2000, 50],
            centers: vec![[-5.0, 5.0], [5.0, 5.0]],
            std_dev: 3.0,
            seed: 47,
        }
    }
}

/// Draws a labeled dataset from gaussian blobs.
///
/// The rows are laid out class by class: the first `sizes[0]` rows are labeled `0` and
/// drawn around `centers[0]`, the next `sizes[1]` rows are labeled `1`, and so on. The
/// same spec always yields the same coordinates.
///
/// # Arguments
/// * `spec` - The blobs' description.
///
/// # Returns
/// The generated dataset or an error if the spec is invalid.
pub fn make_blobs(spec: &BlobsSpec) -> Result<Dataset> {
    let BlobsSpec {
        ref sizes,
        ref centers,
        std_dev,
        seed,
    } = *spec;

    if sizes.is_empty() {
        return Err(MlErr::EmptyDataset);
    }

    if sizes.len() != centers.len() {
        return Err(MlErr::SizeMismatch {
            what: "blob centers",
            got: centers.len(),
            expected: sizes.len(),
        });
    }

    if let Some(class) = sizes.iter().position(|&n| n == 0) {
        return Err(MlErr::EmptyClass { class });
    }

    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(MlErr::InvalidStdDev { std_dev });
    }

    let normal = Normal::new(0.0, std_dev).map_err(|_| MlErr::InvalidStdDev { std_dev })?;
    let mut rng = StdRng::seed_from_u64(seed);

    let total: usize = sizes.iter().sum();
    let mut features = Array2::zeros((total, N_FEATURES));
    let mut labels = Array1::zeros(total);
    let mut start = 0;

    for (class, (&size, center)) in sizes.iter().zip(centers).enumerate() {
        let end = start + size;
        let noise = Array2::<f64>::random_using((size, N_FEATURES), normal, &mut rng);
        let center = Array1::from(center.to_vec());

        features.slice_mut(s![start..end, ..]).assign(&(noise + &center));
        labels.slice_mut(s![start..end]).fill(class);
        debug!("drew {size} samples for class {class} around {center}");

        start = end;
    }

    Dataset::new(features, labels)
}
