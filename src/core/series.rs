use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::render::ColorList;

/// How a series is drawn in addition to its connecting segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Appearance {
    /// `o` marker on the last point of each run.
    Point,
    /// `o` marker with dashed crosshair guides through it.
    Cross,
    /// Horizontal `╌` reference line.
    DashedLine,
    /// Horizontal `─` reference line.
    FullLine,
}

impl Appearance {
    #[must_use]
    pub fn is_point(self) -> bool {
        matches!(self, Self::Point | Self::Cross)
    }

    #[must_use]
    pub fn is_line(self) -> bool {
        matches!(self, Self::DashedLine | Self::FullLine)
    }

    /// Point appearances pass through; anything else becomes `Point`.
    #[must_use]
    pub fn normalize_point(appearance: Option<Self>) -> Self {
        match appearance {
            Some(value) if value.is_point() => value,
            _ => Self::Point,
        }
    }

    /// Line appearances pass through; anything else becomes `DashedLine`.
    #[must_use]
    pub fn normalize_line(appearance: Option<Self>) -> Self {
        match appearance {
            Some(value) if value.is_line() => value,
            _ => Self::DashedLine,
        }
    }
}

/// One registered dataset.
///
/// `points` only holds real samples. The value highlighted on the axis
/// border lives in `reference`, so no x slot carries a second meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub points: BTreeMap<usize, Option<f64>>,
    pub reference: Option<f64>,
    pub colors: ColorList,
    pub colors_down: ColorList,
    pub appearance: Option<Appearance>,
}

impl Series {
    /// Single scatter point at `x`.
    #[must_use]
    pub fn point(x: usize, y: f64, colors: ColorList, appearance: Appearance) -> Self {
        let value = finite_or_absent(y);
        let mut points = BTreeMap::new();
        points.insert(x, value);
        Self {
            points,
            reference: value,
            colors_down: colors.clone(),
            colors,
            appearance: Some(appearance),
        }
    }

    /// Horizontal reference line at `value`.
    #[must_use]
    pub fn line(value: f64, colors: ColorList, appearance: Appearance) -> Self {
        Self {
            points: BTreeMap::new(),
            reference: finite_or_absent(value),
            colors_down: colors.clone(),
            colors,
            appearance: Some(appearance),
        }
    }

    /// Bulk overlay without marker/line decoration.
    ///
    /// Negative x keys are dropped, later duplicates replace earlier ones.
    #[must_use]
    pub fn markers<I>(points: I, colors: ColorList, colors_down: Option<ColorList>) -> Self
    where
        I: IntoIterator<Item = (i64, Option<f64>)>,
    {
        let mut canonical = BTreeMap::new();
        let mut dropped = 0usize;
        for (x, y) in points {
            match usize::try_from(x) {
                Ok(x) => {
                    canonical.insert(x, y.and_then(finite_or_absent));
                }
                Err(_) => dropped += 1,
            }
        }
        if dropped > 0 {
            trace!(dropped, "dropped marker samples with negative x");
        }

        let reference = canonical
            .get(&0)
            .copied()
            .flatten()
            .or_else(|| canonical.values().find_map(|value| *value));

        Self {
            points: canonical,
            reference,
            colors_down: colors_down.unwrap_or_else(|| colors.clone()),
            colors,
            appearance: None,
        }
    }

    /// Present value at `x`, if any.
    #[must_use]
    pub fn value_at(&self, x: usize) -> Option<f64> {
        self.points.get(&x).copied().flatten()
    }

    /// Highest x this series occupies. Line series occupy x = 0.
    #[must_use]
    pub fn last_x(&self) -> usize {
        self.points.keys().next_back().copied().unwrap_or(0)
    }

    /// Every finite value that participates in scaling.
    pub fn scale_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points
            .values()
            .filter_map(|value| *value)
            .chain(self.reference)
    }

    #[must_use]
    pub fn is_point(&self) -> bool {
        self.appearance.is_some_and(Appearance::is_point)
    }

    #[must_use]
    pub fn is_line(&self) -> bool {
        self.appearance.is_some_and(Appearance::is_line)
    }
}

fn finite_or_absent(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        warn!(value, "non-finite sample stored as absent");
        None
    }
}

/// Append-only collection of series in registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStore {
    series: Vec<Series>,
}

impl SeriesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, series: Series) {
        self.series.push(series);
        trace!(count = self.series.len(), "series registered");
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Series> {
        self.series.iter()
    }
}

impl<'a> IntoIterator for &'a SeriesStore {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}
