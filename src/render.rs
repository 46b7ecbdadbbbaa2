use std::{fmt::Display, fs, path::Path};

use log::{debug, info, warn};
use machine_learning::{dataset::Dataset, grid::Meshgrid};
use ndarray::ArrayView2;
use plotters::prelude::*;
use serde::Deserialize;

use crate::error::{PipelineErr, Result};

/// Colors and sizes of the rendered figure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub width: u32,
    pub height: u32,
    /// Fill color of each predicted label's region, indexed by label.
    pub level_colors: Vec<[u8; 3]>,
    /// Marker color of each class' samples, indexed by label.
    pub class_colors: Vec<[u8; 3]>,
    pub marker_radius: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            width: 600,
            height: 300,
            // Both ends of the "Paired" colormap.
            level_colors: vec![[166, 206, 227], [177, 89, 40]],
            class_colors: vec![[31, 119, 180], [255, 127, 14]],
            marker_radius: 3,
        }
    }
}

impl RenderStyle {
    fn pick(colors: &[[u8; 3]], label: usize) -> RGBColor {
        match colors {
            [] => BLACK,
            colors => {
                let [r, g, b] = colors[label % colors.len()];
                RGBColor(r, g, b)
            }
        }
    }

    pub fn level_color(&self, label: usize) -> RGBColor {
        Self::pick(&self.level_colors, label)
    }

    pub fn class_color(&self, label: usize) -> RGBColor {
        Self::pick(&self.class_colors, label)
    }
}

/// A horizontal run of grid cells sharing a predicted label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub label: usize,
    pub x: (f64, f64),
    pub y: (f64, f64),
}

/// Splits a predicted-label surface into filled regions.
///
/// Every lattice node owns the `step × step` square centered on it; consecutive nodes of a
/// row with the same label are merged into one cell.
///
/// # Arguments
/// * `grid` - The lattice the surface was predicted on.
/// * `surface` - One label per lattice node, shaped like `grid.shape()`.
///
/// # Returns
/// The cells, or an error if the surface doesn't match the grid.
pub fn contour_cells(grid: &Meshgrid, surface: ArrayView2<usize>) -> Result<Vec<Cell>> {
    if surface.dim() != grid.shape() {
        return Err(PipelineErr::Render(format!(
            "surface shape {:?} doesn't match grid shape {:?}",
            surface.dim(),
            grid.shape()
        )));
    }

    let h = grid.step() / 2.0;
    let (x1, x2) = (grid.x1(), grid.x2());
    let mut cells = Vec::new();

    for (r, row) in surface.outer_iter().enumerate() {
        let y = (x2[r] - h, x2[r] + h);
        let mut start = 0;

        for c in 1..=row.len() {
            if c < row.len() && row[c] == row[start] {
                continue;
            }

            cells.push(Cell {
                label: row[start],
                x: (x1[start] - h, x1[c - 1] + h),
                y,
            });
            start = c;
        }
    }

    Ok(cells)
}

fn render_err<E: Display>(err: E) -> PipelineErr {
    PipelineErr::Render(err.to_string())
}

/// Draws the predicted-label surface as filled regions, overlays the samples class by class
/// and writes the figure as a PNG, overwriting `path`.
///
/// The file is completely written once this returns.
pub fn render(
    path: &Path,
    grid: &Meshgrid,
    surface: ArrayView2<usize>,
    dataset: &Dataset,
    style: &RenderStyle,
) -> Result<()> {
    let ((x_lo, x_hi), (y_lo, y_hi)) = grid
        .bounds()
        .ok_or_else(|| PipelineErr::Render("the grid is empty".into()))?;
    let cells = contour_cells(grid, surface)?;
    debug!("filling {} contour cells", cells.len());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let h = grid.step() / 2.0;
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d((x_lo - h)..(x_hi + h), (y_lo - h)..(y_hi + h))
        .map_err(render_err)?;

    chart
        .draw_series(cells.iter().map(|cell| {
            Rectangle::new(
                [(cell.x.0, cell.y.0), (cell.x.1, cell.y.1)],
                style.level_color(cell.label).filled(),
            )
        }))
        .map_err(render_err)?;

    let features = dataset.features();
    for label in 0..dataset.class_counts().len() {
        let color = style.class_color(label);
        let rows = dataset.rows_with_label(label);

        chart
            .draw_series(rows.iter().map(|&i| {
                let p = features.row(i);
                Circle::new((p[0], p[1]), style.marker_radius, color.filled())
            }))
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    info!("wrote {}", path.display());

    Ok(())
}

/// Opens the image at `path` in the system viewer without waiting for it.
///
/// A missing viewer isn't fatal, it's only logged.
pub fn display(path: &Path) {
    match open::that_detached(path) {
        Ok(()) => info!("opened {} in the system viewer", path.display()),
        Err(e) => warn!("couldn't open {} in a viewer: {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use super::*;

    fn grid() -> Meshgrid {
        Meshgrid::new(array![0.0, 1.0, 2.0, 3.0], array![10.0, 11.0], 1.0)
    }

    fn dataset() -> Dataset {
        let features = array![[0.5, 10.2], [2.5, 10.8], [1.0, 10.5]];
        Dataset::new(features, array![0, 1, 0]).unwrap()
    }

    #[test]
    fn cells_merge_runs() {
        let surface = array![[0, 0, 1, 1], [0, 1, 1, 1]];
        let cells = contour_cells(&grid(), surface.view()).unwrap();

        assert_eq!(
            cells,
            vec![
                Cell {
                    label: 0,
                    x: (-0.5, 1.5),
                    y: (9.5, 10.5)
                },
                Cell {
                    label: 1,
                    x: (1.5, 3.5),
                    y: (9.5, 10.5)
                },
                Cell {
                    label: 0,
                    x: (-0.5, 0.5),
                    y: (10.5, 11.5)
                },
                Cell {
                    label: 1,
                    x: (0.5, 3.5),
                    y: (10.5, 11.5)
                },
            ]
        );
    }

    #[test]
    fn uniform_rows_are_one_cell_each() {
        let surface = Array2::<usize>::zeros((2, 4));
        let cells = contour_cells(&grid(), surface.view()).unwrap();

        assert_eq!(cells.len(), 2);
        assert!(cells.iter().all(|c| c.x == (-0.5, 3.5)));
    }

    #[test]
    fn mismatched_surface_is_rejected() {
        let surface = Array2::<usize>::zeros((4, 2));
        assert!(matches!(
            contour_cells(&grid(), surface.view()),
            Err(PipelineErr::Render(_))
        ));
    }

    #[test]
    fn colors_wrap_around() {
        let style = RenderStyle::default();

        assert_eq!(style.level_color(0), RGBColor(166, 206, 227));
        assert_eq!(style.level_color(3), RGBColor(177, 89, 40));
        assert_eq!(style.class_color(1), RGBColor(255, 127, 14));

        let bare = RenderStyle {
            class_colors: vec![],
            ..Default::default()
        };
        assert_eq!(bare.class_color(0), BLACK);
    }

    #[test]
    fn writes_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("figure.png");
        let surface = array![[0, 0, 1, 1], [0, 1, 1, 1]];

        render(
            &path,
            &grid(),
            surface.view(),
            &dataset(),
            &RenderStyle::default(),
        )
        .unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        fs::write(&path, b"stale").unwrap();
        let surface = Array2::<usize>::zeros((2, 4));

        render(
            &path,
            &grid(),
            surface.view(),
            &dataset(),
            &RenderStyle::default(),
        )
        .unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.len() > 5);
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn empty_grid_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let grid = Meshgrid::new(array![], array![], 0.1);
        let surface = Array2::<usize>::zeros((0, 0));

        let res = render(
            &dir.path().join("x.png"),
            &grid,
            surface.view(),
            &dataset(),
            &RenderStyle::default(),
        );
        assert!(matches!(res, Err(PipelineErr::Render(_))));
    }
}
