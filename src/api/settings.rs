use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{AnsiColorizer, Colorizer};

/// Formats an axis label from its raw data value.
pub type LabelFormatterFn = Arc<dyn Fn(f64, &ChartSettings) -> String + Send + Sync + 'static>;

pub const DEFAULT_OFFSET: usize = 10;
pub const DEFAULT_PRECISION: usize = 2;

/// Appearance and scale settings shared by every render of a chart.
///
/// Plain fields serialize so hosts can persist chart setup. The formatter and
/// colorizer are runtime capabilities and come back as defaults on load.
#[derive(Clone, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Target plot height in rows before scaling. `None` uses one row per data unit.
    #[serde(default)]
    pub height: Option<f64>,
    /// Left margin width, including the axis tick column.
    ///
    /// Labels wider than `offset - 1` keep only their leading characters, so
    /// a clipped `1000000000000.00` reads as a smaller number. Size the
    /// offset or the formatter for the largest label expected.
    #[serde(default = "default_offset")]
    pub offset: usize,
    /// Decimal places used by the default label formatter.
    #[serde(default = "default_precision")]
    pub precision: usize,
    #[serde(skip, default = "default_formatter")]
    formatter: LabelFormatterFn,
    #[serde(skip, default = "default_colorizer")]
    colorizer: Arc<dyn Colorizer>,
    #[serde(skip)]
    computed_height: Option<f64>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            height: None,
            offset: DEFAULT_OFFSET,
            precision: DEFAULT_PRECISION,
            formatter: default_formatter(),
            colorizer: default_colorizer(),
            computed_height: None,
        }
    }
}

impl fmt::Debug for ChartSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartSettings")
            .field("height", &self.height)
            .field("offset", &self.offset)
            .field("precision", &self.precision)
            .field("colorizer", &self.colorizer)
            .field("computed_height", &self.computed_height)
            .finish_non_exhaustive()
    }
}

impl ChartSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target plot height in rows.
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets the left margin width, tick column included.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: LabelFormatterFn) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_colorizer(mut self, colorizer: Arc<dyn Colorizer>) -> Self {
        self.colorizer = colorizer;
        self
    }

    /// Explicit height, else the height recorded by the last render.
    #[must_use]
    pub fn height(&self) -> Option<f64> {
        self.height.or(self.computed_height)
    }

    /// Records the data range of the current render as the fallback height.
    pub fn set_computed_height(&mut self, range: f64) {
        self.computed_height = Some(range);
    }

    #[must_use]
    pub fn computed_height(&self) -> Option<f64> {
        self.computed_height
    }

    #[must_use]
    pub fn formatter(&self) -> LabelFormatterFn {
        Arc::clone(&self.formatter)
    }

    #[must_use]
    pub fn colorizer(&self) -> Arc<dyn Colorizer> {
        Arc::clone(&self.colorizer)
    }

    /// Formats one axis label with the configured formatter.
    #[must_use]
    pub fn format_label(&self, value: f64) -> String {
        (self.formatter)(value, self)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.offset == 0 {
            return Err(ChartError::InvalidSettings(
                "offset must be >= 1 to hold the axis tick".to_owned(),
            ));
        }
        if let Some(height) = self.height {
            if !height.is_finite() || height <= 0.0 {
                return Err(ChartError::InvalidSettings(
                    "height must be finite and > 0".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

fn default_offset() -> usize {
    DEFAULT_OFFSET
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

fn default_formatter() -> LabelFormatterFn {
    Arc::new(format_label_padded)
}

fn default_colorizer() -> Arc<dyn Colorizer> {
    Arc::new(AnsiColorizer)
}

/// Fixed-precision label right-aligned to the label margin.
#[must_use]
pub fn format_label_padded(value: f64, settings: &ChartSettings) -> String {
    let width = settings.offset.saturating_sub(1);
    let precision = settings.precision;
    format!("{value:>width$.precision$}")
}
