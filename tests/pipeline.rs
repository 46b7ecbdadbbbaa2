use std::fs;

use imbalanced_classification::{Config, PipelineErr, pipeline};
use machine_learning::{MlErr, grid::arange};

fn config_in(dir: &tempfile::TempDir) -> Config {
    Config {
        output: dir.path().join("imbalanced_classification.png"),
        show: false,
        ..Default::default()
    }
}

#[test]
fn reference_scenario_writes_the_figure() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let report = pipeline::run(&config).unwrap();

    assert_eq!(report.samples, 2050);
    assert_eq!(report.class_counts, vec![2000, 50]);
    assert!(report.converged);

    let (rows, cols) = report.grid_shape;
    assert!(rows > 0 && cols > 0);
    assert_eq!(report.predicted_counts.iter().sum::<usize>(), rows * cols);
    // Both sides of the boundary show up on the grid.
    assert!(report.predicted_counts.iter().all(|&n| n > 0));
    assert!(report.train_accuracy > 0.97);
    assert!(report.minority_recall.is_some());
    // Better than the constant-probability model.
    assert!(report.train_loss > 0.0 && report.train_loss < 2f64.ln());

    let bytes = fs::read(&config.output).unwrap();
    assert!(!bytes.is_empty());
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn surface_matches_the_grid() {
    let dir = tempfile::tempdir().unwrap();
    let surface = pipeline::predict_surface(&config_in(&dir)).unwrap();

    let (min1, max1) = surface.dataset.feature_range(0).unwrap();
    let (min2, max2) = surface.dataset.feature_range(1).unwrap();
    let x1 = surface.grid.x1();
    let x2 = surface.grid.x2();

    assert_eq!(x1[0], min1 - 1.0);
    assert_eq!(x2[0], min2 - 1.0);
    assert!(x1[x1.len() - 1] < max1 + 1.0);
    assert!(x1[x1.len() - 1] >= max1 + 1.0 - 0.1 - 1e-9);
    assert!(x2[x2.len() - 1] < max2 + 1.0);
    assert!(x2[x2.len() - 1] >= max2 + 1.0 - 0.1 - 1e-9);
    assert_eq!(*x1, arange(min1 - 1.0, max1 + 1.0, 0.1).unwrap());

    assert_eq!(surface.grid.len(), x1.len() * x2.len());
    assert_eq!(surface.labels.dim(), (x2.len(), x1.len()));
    // Nothing was written.
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn pipeline_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let a = pipeline::predict_surface(&config).unwrap();
    let b = pipeline::predict_surface(&config).unwrap();

    assert_eq!(a.grid, b.grid);
    assert_eq!(a.labels, b.labels);
    assert_eq!(a.model, b.model);
}

#[test]
fn majority_side_predicts_majority() {
    let dir = tempfile::tempdir().unwrap();
    let surface = pipeline::predict_surface(&config_in(&dir)).unwrap();

    // The majority blob sits at x1 = -5, the minority one at x1 = +5.
    let (rows, cols) = surface.labels.dim();
    assert_eq!(surface.labels[[rows / 2, 0]], 0);
    assert_eq!(surface.labels[[rows / 2, cols - 1]], 1);
}

#[test]
fn invalid_blobs_fail_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(&dir);
    config.blobs.sizes = vec![2000, 0];

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, PipelineErr::Ml(MlErr::EmptyClass { class: 1 })));
    assert!(!config.output.exists());
}

#[test]
fn json_config_drives_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("custom.png");
    let json = format!(
        r#"{{
            "blobs": {{ "sizes": [300, 30], "centers": [[0.0, 0.0], [6.0, 6.0]], "std_dev": 1.5, "seed": 7 }},
            "step": 0.25,
            "output": {},
            "show": false,
            "style": {{ "width": 320, "height": 240 }}
        }}"#,
        serde_json::to_string(&output).unwrap()
    );

    let config = Config::from_json(&json).unwrap();
    let report = pipeline::run(&config).unwrap();

    assert_eq!(report.samples, 330);
    assert_eq!(report.output, output);
    assert!(fs::metadata(&output).unwrap().len() > 0);
}
