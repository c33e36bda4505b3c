use std::sync::Arc;

use ascii_linechart::render::{PlainColorizer, glyphs, reference_row};
use ascii_linechart::{Appearance, ChartSettings, LineChart};

fn plain_settings(offset: usize) -> ChartSettings {
    ChartSettings::new()
        .with_offset(offset)
        .with_formatter(Arc::new(|value: f64, _: &ChartSettings| format!("{value}")))
        .with_colorizer(Arc::new(PlainColorizer))
}

#[test]
fn cross_marker_draws_full_guides_without_hiding_the_marker() {
    let mut chart = LineChart::with_settings(plain_settings(3));
    chart.add_point(3, 5.0, None, Some(Appearance::Cross));

    let canvas = chart.chart().expect("chart");
    assert_eq!(
        canvas.lines(),
        vec![" 5┤   ╎".to_owned(), " 4┼╌╌╌o".to_owned()]
    );
}

#[test]
fn point_marker_is_a_single_glyph() {
    let mut chart = LineChart::with_settings(plain_settings(3).with_height(4.0));
    chart.add_markers(vec![(0, Some(0.0)), (4, Some(4.0))], None, None);
    chart.add_point(2, 2.0, None, Some(Appearance::Point));

    let canvas = chart.chart().expect("chart");
    let point_grid = &canvas.results()[1];
    let row = canvas.scale().row_of(canvas.scale().scaled(2.0)).expect("row");

    assert_eq!(point_grid.glyph(row, 5), glyphs::MARKER);
    let plot_glyphs = (0..point_grid.height())
        .flat_map(|r| (3..point_grid.width()).map(move |c| (r, c)))
        .filter(|(r, c)| point_grid.glyph(*r, *c) != ' ')
        .count();
    assert_eq!(plot_glyphs, 1);
}

#[test]
fn point_at_origin_is_drawn() {
    let mut chart = LineChart::with_settings(plain_settings(2));
    chart.add_point(0, 1.0, None, None);
    chart.add_point(2, 3.0, None, None);

    let canvas = chart.chart().expect("chart");
    let grid = canvas.composite();
    let rows = canvas.scale().rows;
    assert_eq!(grid.glyph(rows, 2), glyphs::MARKER);
    assert_eq!(grid.glyph(0, 4), glyphs::MARKER);
}

#[test]
fn dashed_line_spans_the_plot_body_on_one_row() {
    let mut chart = LineChart::with_settings(plain_settings(3));
    chart.add_markers(vec![(0, Some(0.0)), (5, Some(10.0))], None, None);
    chart.add_line(4.0, None, None);

    let canvas = chart.chart().expect("chart");
    let scale = *canvas.scale();
    let line_grid = &canvas.results()[1];
    let line_row = scale.row_of(scale.scaled(4.0)).expect("line row");

    for row in 0..line_grid.height() {
        for column in scale.offset..scale.total_width {
            let expected = if row == line_row {
                glyphs::DASHED_HORIZONTAL
            } else {
                ' '
            };
            assert_eq!(line_grid.glyph(row, column), expected);
        }
    }
}

#[test]
fn full_line_uses_solid_glyph() {
    let mut chart = LineChart::with_settings(plain_settings(2));
    chart.add_line(1.0, None, Some(Appearance::FullLine));

    let canvas = chart.chart().expect("chart");
    assert_eq!(canvas.lines(), vec!["1┤ ".to_owned(), "0┼─".to_owned()]);
}

#[test]
fn reference_tick_matches_line_row() {
    let mut chart = LineChart::with_settings(plain_settings(4).with_height(12.0));
    chart.add_markers(vec![(0, Some(-6.0)), (3, Some(6.0))], None, None);
    chart.add_line(1.5, None, Some(Appearance::FullLine));

    let canvas = chart.chart().expect("chart");
    let scale = canvas.scale();
    let line_series = &chart.series()[1];
    let row = reference_row(line_series, scale).expect("reference row");
    let grid = &canvas.results()[1];

    assert_eq!(grid.glyph(row, scale.offset - 1), glyphs::REFERENCE_TICK);
    assert_eq!(grid.glyph(row, scale.offset), glyphs::FLAT);
}
