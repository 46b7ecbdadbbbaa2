use std::path::PathBuf;

use log::info;
use machine_learning::{
    arch::{Classifier, FittedLogistic},
    dataset::{Dataset, make_blobs},
    grid::Meshgrid,
    metrics::{accuracy, recall},
};
use ndarray::Array2;

use crate::{config::Config, error::Result, render};

/// Everything computed before rendering.
#[derive(Debug, Clone)]
pub struct Surface {
    pub dataset: Dataset,
    pub grid: Meshgrid,
    pub model: FittedLogistic,
    /// One predicted label per grid point, shaped like `grid.shape()`.
    pub labels: Array2<usize>,
}

/// A summary of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub samples: usize,
    pub class_counts: Vec<usize>,
    /// `(x2 points, x1 points)`.
    pub grid_shape: (usize, usize),
    /// How many grid points were assigned each label.
    pub predicted_counts: Vec<usize>,
    pub train_accuracy: f64,
    /// Training recall of the least populated class.
    pub minority_recall: Option<f64>,
    /// Mean log loss of the fitted model over the training set.
    pub train_loss: f64,
    pub n_iter: usize,
    pub converged: bool,
    pub output: PathBuf,
}

/// Generates the dataset, builds the grid, fits the model and predicts the grid's labels.
pub fn predict_surface(config: &Config) -> Result<Surface> {
    let dataset = make_blobs(&config.blobs)?;
    info!(
        "generated {} samples, class counts {:?}",
        dataset.len(),
        dataset.class_counts()
    );

    let grid = Meshgrid::covering(&dataset, config.margin, config.step)?;
    let (rows, cols) = grid.shape();
    info!("built a {rows}x{cols} grid ({} points)", grid.len());

    let model = config.model.fit(&dataset)?;
    info!(
        "fitted logistic regression: weights {}, intercept {:.4}, loss {:.4}, {} iterations",
        model.weights(),
        model.intercept(),
        model.loss(),
        model.n_iter()
    );

    let predictions = model.predict(grid.points().view())?;
    let labels = grid.reshape(predictions)?;

    Ok(Surface {
        dataset,
        grid,
        model,
        labels,
    })
}

/// Runs the whole pipeline: predict the decision surface, render it with the samples on
/// top, then optionally open the image.
pub fn run(config: &Config) -> Result<Report> {
    let Surface {
        dataset,
        grid,
        model,
        labels,
    } = predict_surface(config)?;

    render::render(&config.output, &grid, labels.view(), &dataset, &config.style)?;

    if config.show {
        render::display(&config.output);
    }

    let y_pred = model.predict(dataset.features())?;
    let class_counts = dataset.class_counts();
    let minority = class_counts
        .iter()
        .enumerate()
        .min_by_key(|&(_, &count)| count)
        .map(|(label, _)| label);
    let minority_recall = match minority {
        Some(label) => recall(y_pred.view(), dataset.labels(), label)?,
        None => None,
    };

    let mut predicted_counts = vec![0; class_counts.len().max(2)];
    for &label in &labels {
        predicted_counts[label] += 1;
    }

    let report = Report {
        samples: dataset.len(),
        class_counts,
        grid_shape: grid.shape(),
        predicted_counts,
        train_accuracy: accuracy(y_pred.view(), dataset.labels())?,
        minority_recall,
        train_loss: model.loss(),
        n_iter: model.n_iter(),
        converged: model.converged(),
        output: config.output.clone(),
    };

    info!(
        "training accuracy {:.4}, minority recall {}",
        report.train_accuracy,
        report
            .minority_recall
            .map_or_else(|| "n/a".to_string(), |r| format!("{r:.4}"))
    );

    Ok(report)
}
