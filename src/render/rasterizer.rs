//! Per-series rasterization into a character [`Grid`].
//!
//! Rasterization is a pure function of a series, the shared scale and the
//! pre-formatted axis labels. The active color context is a local value
//! threaded through the walk, so separate series never observe each other.

use tracing::trace;

use crate::core::{Appearance, ScaleState, Series};
use crate::render::{ColorToken, Grid};

/// Box-drawing glyphs used by the rasterizer.
pub mod glyphs {
    pub const TICK: char = '┤';
    pub const REFERENCE_TICK: char = '┼';
    pub const FLAT: char = '─';
    pub const VERTICAL: char = '│';
    pub const RISE_START: char = '╭';
    pub const RISE_END: char = '╯';
    pub const FALL_START: char = '╰';
    pub const FALL_END: char = '╮';
    pub const MARKER: char = 'o';
    pub const DASHED_HORIZONTAL: char = '╌';
    pub const DASHED_VERTICAL: char = '╎';
}

/// Formats one axis label per grid row, top row first.
pub fn axis_labels<F>(scale: &ScaleState, mut format: F) -> Vec<String>
where
    F: FnMut(f64) -> String,
{
    (0..=scale.rows)
        .map(|row| format(scale.label_value(row)))
        .collect()
}

/// Draws one series: axis border and labels first, then segments, markers and rules.
///
/// `labels` must hold one entry per grid row as produced by [`axis_labels`].
#[must_use]
pub fn rasterize_series(series: &Series, scale: &ScaleState, labels: &[String]) -> Grid {
    let mut grid = Grid::blank(scale.rows + 1, scale.total_width);
    draw_border(&mut grid, series, scale, labels);

    let mut context: &[ColorToken] = series.colors.as_slice();
    for (&x, value) in &series.points {
        let Some(value) = *value else {
            continue;
        };
        let y = scale.scaled(value);
        let next = x.checked_add(1).and_then(|next| series.value_at(next));

        if let Some(next) = next {
            context = draw_segment(&mut grid, scale, series, x, y, scale.scaled(next), context);
        } else if let Some(appearance) = series.appearance.filter(|a| a.is_point()) {
            draw_marker(&mut grid, scale, x, y, appearance, context);
        }
    }

    if let (Some(appearance), Some(reference)) =
        (series.appearance.filter(|a| a.is_line()), series.reference)
    {
        draw_rule(&mut grid, scale, scale.scaled(reference), appearance, context);
    }

    trace!(
        points = series.points.len(),
        rows = grid.height(),
        columns = grid.width(),
        "series rasterized"
    );
    grid
}

/// Rasterizes every series, returning grids in registration order.
pub fn rasterize_all(series: &[Series], scale: &ScaleState, labels: &[String]) -> Vec<Grid> {
    #[cfg(feature = "parallel-raster")]
    {
        use rayon::prelude::*;

        series
            .par_iter()
            .map(|item| rasterize_series(item, scale, labels))
            .collect()
    }

    #[cfg(not(feature = "parallel-raster"))]
    {
        series
            .iter()
            .map(|item| rasterize_series(item, scale, labels))
            .collect()
    }
}

/// Grid row highlighted on the axis for this series.
#[must_use]
pub fn reference_row(series: &Series, scale: &ScaleState) -> Option<usize> {
    series
        .reference
        .and_then(|value| scale.row_of(scale.scaled(value)))
}

fn draw_border(grid: &mut Grid, series: &Series, scale: &ScaleState, labels: &[String]) {
    let highlighted = reference_row(series, scale);
    let tick_column = scale.offset - 1;

    for row in 0..=scale.rows {
        let is_reference = highlighted == Some(row);
        let colors: &[ColorToken] = if is_reference {
            series.colors.as_slice()
        } else {
            &[]
        };
        if let Some(label) = labels.get(row) {
            write_label(grid, row, tick_column, label, colors);
        }
        let tick = if is_reference {
            glyphs::REFERENCE_TICK
        } else {
            glyphs::TICK
        };
        grid.put(row, tick_column, tick, colors);
    }
}

/// Right-aligns `label` so it ends just before `margin`; overlong labels keep their head.
fn write_label(grid: &mut Grid, row: usize, margin: usize, label: &str, colors: &[ColorToken]) {
    let chars: Vec<char> = label.chars().take(margin).collect();
    let start = margin - chars.len();
    for (index, ch) in chars.into_iter().enumerate() {
        grid.put(row, start + index, ch, colors);
    }
}

fn draw_segment<'s>(
    grid: &mut Grid,
    scale: &ScaleState,
    series: &'s Series,
    x: usize,
    y: i64,
    y1: i64,
    context: &'s [ColorToken],
) -> &'s [ColorToken] {
    let column = scale.column_of(x);

    if y == y1 {
        if let Some(row) = scale.row_of(y) {
            grid.put(row, column, glyphs::FLAT, context);
        }
        return context;
    }

    let (start, end, context): (char, char, &'s [ColorToken]) = if y1 < y {
        (glyphs::FALL_START, glyphs::FALL_END, series.colors_down.as_slice())
    } else {
        (glyphs::RISE_START, glyphs::RISE_END, series.colors.as_slice())
    };

    if let Some(row) = scale.row_of(y1) {
        grid.put(row, column, start, context);
    }
    if let Some(row) = scale.row_of(y) {
        grid.put(row, column, end, context);
    }
    for level in (y.min(y1) + 1)..y.max(y1) {
        if let Some(row) = scale.row_of(level) {
            grid.put(row, column, glyphs::VERTICAL, context);
        }
    }
    context
}

fn draw_marker(
    grid: &mut Grid,
    scale: &ScaleState,
    x: usize,
    y: i64,
    appearance: Appearance,
    context: &[ColorToken],
) {
    let column = scale.column_of(x);
    let Some(row) = scale.row_of(y) else {
        return;
    };

    if appearance == Appearance::Cross {
        for guide_column in scale.offset..scale.total_width {
            grid.put(row, guide_column, glyphs::DASHED_HORIZONTAL, context);
        }
        for guide_row in 0..=scale.rows {
            grid.put(guide_row, column, glyphs::DASHED_VERTICAL, context);
        }
    }
    grid.put(row, column, glyphs::MARKER, context);
}

fn draw_rule(
    grid: &mut Grid,
    scale: &ScaleState,
    y: i64,
    appearance: Appearance,
    context: &[ColorToken],
) {
    let Some(row) = scale.row_of(y) else {
        return;
    };
    let glyph = if appearance == Appearance::FullLine {
        glyphs::FLAT
    } else {
        glyphs::DASHED_HORIZONTAL
    };
    for column in scale.offset..scale.total_width {
        grid.put(row, column, glyph, context);
    }
}
