use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::ScaleState;
use crate::error::{ChartError, ChartResult};
use crate::render::{BLANK, Cell, Colorizer, Grid};

/// Accumulates the per-series grids of one `chart()` call.
///
/// Grids are composited in registration order: a later grid overwrites an
/// earlier cell only where the later cell is non-blank.
#[derive(Debug, Clone)]
pub struct Canvas {
    scale: ScaleState,
    all_time_max_height: usize,
    colorizer: Arc<dyn Colorizer>,
    results: Vec<Grid>,
}

impl Canvas {
    #[must_use]
    pub fn new(scale: ScaleState, colorizer: Arc<dyn Colorizer>) -> Self {
        Self {
            all_time_max_height: scale.rows,
            scale,
            colorizer,
            results: Vec::new(),
        }
    }

    #[must_use]
    pub fn scale(&self) -> &ScaleState {
        &self.scale
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.scale.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.scale.max
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.scale.width
    }

    #[must_use]
    pub fn all_time_max_height(&self) -> usize {
        self.all_time_max_height
    }

    /// Records the tallest row count seen by the owning chart; never below the current rows.
    pub fn set_all_time_max_height(&mut self, height: usize) {
        self.all_time_max_height = height.max(self.scale.rows);
    }

    pub fn add_result(&mut self, grid: Grid) {
        self.results.push(grid);
    }

    #[must_use]
    pub fn results(&self) -> &[Grid] {
        &self.results
    }

    /// Merges every accumulated grid into one.
    #[must_use]
    pub fn composite(&self) -> Grid {
        let mut merged = Grid::blank(self.scale.rows + 1, self.scale.total_width);
        for grid in &self.results {
            merged.overlay(grid);
        }
        merged
    }

    /// Plain composite rows, padded on top to the all-time frame height.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let merged = self.composite();
        let mut lines = self.padding_lines();
        lines.extend(merged.lines());
        lines
    }

    /// Colorized output, padded on top to the all-time frame height.
    ///
    /// Runs of cells sharing a color context are colorized as one piece.
    #[must_use]
    pub fn render(&self) -> String {
        let merged = self.composite();
        let mut lines = self.padding_lines();
        for row in 0..merged.height() {
            lines.push(self.render_row(merged.row(row)));
        }
        lines.join("\n")
    }

    #[must_use]
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            min: self.scale.min,
            max: self.scale.max,
            width: self.scale.width,
            rows: self.scale.rows,
            offset: self.scale.offset,
            all_time_max_height: self.all_time_max_height,
            series_count: self.results.len(),
            lines: self.composite().lines(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    fn padding_lines(&self) -> Vec<String> {
        let missing = self.all_time_max_height.saturating_sub(self.scale.rows);
        let blank: String = std::iter::repeat_n(BLANK, self.scale.total_width).collect();
        vec![blank; missing]
    }

    fn render_row(&self, cells: &[Cell]) -> String {
        let mut out = String::new();
        let mut run = String::new();
        let mut run_colors: Option<&Cell> = None;

        for cell in cells {
            if let Some(head) = run_colors {
                if head.colors != cell.colors {
                    out.push_str(&self.colorizer.colorize(&run, &head.colors));
                    run.clear();
                }
            }
            if run.is_empty() {
                run_colors = Some(cell);
            }
            run.push(cell.glyph);
        }
        if let Some(head) = run_colors {
            out.push_str(&self.colorizer.colorize(&run, &head.colors));
        }
        out
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Serializable rendering state used by regression tests and tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    pub min: f64,
    pub max: f64,
    pub width: usize,
    pub rows: usize,
    pub offset: usize,
    pub all_time_max_height: usize,
    pub series_count: usize,
    pub lines: Vec<String>,
}
