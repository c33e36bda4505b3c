use std::sync::Arc;

use ascii_linechart::render::{Colorizer, PlainColorizer};
use ascii_linechart::{ChartSettings, LineChart};

#[test]
fn settings_roundtrip_plain_fields_through_json() {
    let settings = ChartSettings::new()
        .with_height(12.0)
        .with_offset(7)
        .with_precision(1)
        .with_formatter(Arc::new(|_: f64, _: &ChartSettings| "custom".to_owned()));

    let json = serde_json::to_string(&settings).expect("serialize settings");
    let restored: ChartSettings = serde_json::from_str(&json).expect("deserialize settings");

    assert_eq!(restored.height, Some(12.0));
    assert_eq!(restored.offset, 7);
    assert_eq!(restored.precision, 1);
    assert_eq!(restored.format_label(2.5), "   2.5");
}

#[test]
fn missing_fields_take_defaults() {
    let restored: ChartSettings = serde_json::from_str("{}").expect("deserialize settings");
    assert_eq!(restored.height, None);
    assert_eq!(restored.offset, ascii_linechart::api::DEFAULT_OFFSET);
    assert_eq!(restored.precision, ascii_linechart::api::DEFAULT_PRECISION);
}

#[test]
fn custom_formatter_receives_settings() {
    let settings = ChartSettings::new()
        .with_precision(3)
        .with_formatter(Arc::new(|value: f64, settings: &ChartSettings| {
            format!("{value:.prec$}", prec = settings.precision)
        }));
    assert_eq!(settings.format_label(1.0), "1.000");
}

#[test]
fn precision_controls_default_labels() {
    let settings = ChartSettings::new()
        .with_offset(6)
        .with_precision(0)
        .with_colorizer(Arc::new(PlainColorizer));
    let mut chart = LineChart::with_settings(settings);
    chart.add_markers(vec![(0, Some(0.0)), (1, Some(2.0))], None, None);

    let lines = chart.chart().expect("chart").lines();
    assert_eq!(&lines[0][..5], "    2");
    assert_eq!(&lines[2][..5], "    0");
}

#[test]
fn settings_can_be_edited_in_place() {
    let mut chart = LineChart::new();
    chart.settings_mut().offset = 4;
    chart.settings_mut().height = Some(3.0);
    assert_eq!(chart.settings().offset, 4);
    assert_eq!(chart.settings().height(), Some(3.0));
    assert_eq!(chart.settings().colorizer().colorize("x", &[]), "x");
}
