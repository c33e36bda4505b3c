mod settings;

pub use settings::{
    ChartSettings, DEFAULT_OFFSET, DEFAULT_PRECISION, LabelFormatterFn, format_label_padded,
};

use tracing::debug;

use crate::core::{Appearance, Extents, ScaleState, Series, SeriesStore};
use crate::error::ChartResult;
use crate::render::{Canvas, ColorList, axis_labels, rasterize_all};

/// Registers series and renders them into a colorized character chart.
///
/// A `LineChart` is meant to be driven from one thread at a time; `chart()`
/// needs `&mut self` because it records the tallest frame seen so far.
#[derive(Debug, Default)]
pub struct LineChart {
    settings: ChartSettings,
    store: SeriesStore,
    all_time_max_height: usize,
}

impl LineChart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(settings: ChartSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Adds a single scatter point. Non-point appearances fall back to `Point`.
    pub fn add_point(
        &mut self,
        x: usize,
        y: f64,
        colors: Option<ColorList>,
        appearance: Option<Appearance>,
    ) -> &mut Self {
        let appearance = Appearance::normalize_point(appearance);
        self.store
            .push(Series::point(x, y, colors.unwrap_or_default(), appearance));
        self
    }

    /// Adds a connected overlay from `(x, value)` samples.
    ///
    /// Negative x samples are dropped. `colors_down` colors falling segments
    /// and defaults to `colors`.
    pub fn add_markers<I>(
        &mut self,
        points: I,
        colors: Option<ColorList>,
        colors_down: Option<ColorList>,
    ) -> &mut Self
    where
        I: IntoIterator<Item = (i64, Option<f64>)>,
    {
        self.store.push(Series::markers(
            points,
            colors.unwrap_or_default(),
            colors_down,
        ));
        self
    }

    /// Adds a horizontal reference line. Non-line appearances fall back to `DashedLine`.
    pub fn add_line(
        &mut self,
        value: f64,
        colors: Option<ColorList>,
        appearance: Option<Appearance>,
    ) -> &mut Self {
        let appearance = Appearance::normalize_line(appearance);
        self.store
            .push(Series::line(value, colors.unwrap_or_default(), appearance));
        self
    }

    pub fn clear_all_markers(&mut self) -> &mut Self {
        self.store.clear();
        self
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        self.store.as_slice()
    }

    #[must_use]
    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ChartSettings {
        &mut self.settings
    }

    pub fn set_settings(&mut self, settings: ChartSettings) -> &mut Self {
        self.settings = settings;
        self
    }

    /// Tallest row count produced by any `chart()` call on this instance.
    #[must_use]
    pub fn all_time_max_height(&self) -> usize {
        self.all_time_max_height
    }

    /// Computes the shared scale and rasterizes every series onto a fresh canvas.
    ///
    /// Fails when no finite value is registered or the settings cannot
    /// produce a grid.
    pub fn chart(&mut self) -> ChartResult<Canvas> {
        self.settings.validate()?;

        let extents = Extents::scan(&self.store)?;
        let range = extents.range();
        self.settings.set_computed_height(range);
        let target_height = self.settings.height().unwrap_or(range);
        let scale = ScaleState::new(extents, target_height, self.settings.offset)?;
        self.all_time_max_height = self.all_time_max_height.max(scale.rows);

        debug!(
            series = self.store.len(),
            min = scale.min,
            max = scale.max,
            width = scale.width,
            rows = scale.rows,
            ratio = scale.ratio,
            all_time_max_height = self.all_time_max_height,
            "chart scale computed"
        );

        let mut canvas = Canvas::new(scale, self.settings.colorizer());
        canvas.set_all_time_max_height(self.all_time_max_height);

        let labels = axis_labels(&scale, |value| self.settings.format_label(value));
        for grid in rasterize_all(self.store.as_slice(), &scale, &labels) {
            canvas.add_result(grid);
        }
        Ok(canvas)
    }
}
