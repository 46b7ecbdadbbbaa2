use anyhow::Context;
use log::info;

use imbalanced_classification::{Config, pipeline};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();
    let report = pipeline::run(&config).context("pipeline failed")?;

    info!(
        "done: {} samples, {}x{} grid, decision surface written to {}",
        report.samples,
        report.grid_shape.0,
        report.grid_shape.1,
        report.output.display()
    );

    Ok(())
}
