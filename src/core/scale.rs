use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::Series;
use crate::error::{ChartError, ChartResult};

/// Upper bound on the cells of one series grid (`(rows + 1) * total_width`).
///
/// Every registered series allocates a grid of this size, so scales beyond
/// it are rejected instead of exhausting memory.
pub const MAX_GRID_CELLS: usize = 1 << 22;

/// Largest magnitude a scaled coordinate may take; keeps `max2 - min2` exact in `i64`.
const MAX_SCALED: f64 = (1u64 << 53) as f64;

/// Value extrema and horizontal extent across every registered series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub min: f64,
    pub max: f64,
    /// One plus the highest x position, in character columns.
    pub width: usize,
}

impl Extents {
    /// Scans all series once, ignoring absent values.
    ///
    /// Fails with `EmptySeriesSet` when no series holds a finite value.
    pub fn scan<'a, I>(series: I) -> ChartResult<Self>
    where
        I: IntoIterator<Item = &'a Series>,
    {
        let mut min: Option<OrderedFloat<f64>> = None;
        let mut max: Option<OrderedFloat<f64>> = None;
        let mut last_x = 0usize;

        for item in series {
            last_x = last_x.max(item.last_x());
            for value in item.scale_values().map(OrderedFloat) {
                min = Some(min.map_or(value, |current| current.min(value)));
                max = Some(max.map_or(value, |current| current.max(value)));
            }
        }

        match (min, max) {
            (Some(min), Some(max)) => Ok(Self {
                min: min.into_inner(),
                max: max.into_inner(),
                width: last_x + 1,
            }),
            _ => Err(ChartError::EmptySeriesSet),
        }
    }

    /// Value span, floored to 1 so it is always a safe divisor.
    #[must_use]
    pub fn range(self) -> f64 {
        (self.max - self.min).abs().max(1.0)
    }
}

/// Derived vertical and horizontal scale for one render call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleState {
    pub min: f64,
    pub max: f64,
    pub width: usize,
    pub range: f64,
    /// Character rows per data unit.
    pub ratio: f64,
    pub min2: i64,
    pub max2: i64,
    /// Highest row index; grids hold `rows + 1` rows.
    pub rows: usize,
    /// Columns reserved for labels and the tick glyph.
    pub offset: usize,
    pub total_width: usize,
}

impl ScaleState {
    /// Derives the scale from extrema, a target height in rows and the label margin.
    pub fn new(extents: Extents, target_height: f64, offset: usize) -> ChartResult<Self> {
        if !target_height.is_finite() || target_height <= 0.0 {
            return Err(ChartError::InvalidSettings(
                "target height must be finite and > 0".to_owned(),
            ));
        }
        if offset == 0 {
            return Err(ChartError::InvalidSettings(
                "offset must leave room for the axis tick".to_owned(),
            ));
        }

        let range = extents.range();
        if !range.is_finite() {
            return Err(ChartError::InvalidData(
                "value range is not representable".to_owned(),
            ));
        }
        let ratio = target_height / range;
        let min2 = checked_scale_value(extents.min, ratio)?;
        let max2 = checked_scale_value(extents.max, ratio)?;
        let rows = usize::try_from(max2.abs_diff(min2).max(1)).map_err(|_| {
            ChartError::InvalidData("scaled row count does not fit in memory".to_owned())
        })?;
        let total_width = extents.width.checked_add(offset).ok_or_else(|| {
            ChartError::InvalidData("grid width overflows".to_owned())
        })?;
        let cells = rows
            .checked_add(1)
            .and_then(|height| height.checked_mul(total_width))
            .filter(|cells| *cells <= MAX_GRID_CELLS);
        if cells.is_none() {
            return Err(ChartError::InvalidData(format!(
                "grid of {rows} rows by {total_width} columns exceeds {MAX_GRID_CELLS} cells"
            )));
        }

        Ok(Self {
            min: extents.min,
            max: extents.max,
            width: extents.width,
            range,
            ratio,
            min2,
            max2,
            rows,
            offset,
            total_width,
        })
    }

    /// Vertical coordinate of `value` relative to `min2`; 0 is the bottom row.
    #[must_use]
    pub fn scaled(&self, value: f64) -> i64 {
        scale_value(value, self.ratio) - self.min2
    }

    /// Grid row (0 = top) for a scaled coordinate, if it lies inside the grid.
    #[must_use]
    pub fn row_of(&self, scaled: i64) -> Option<usize> {
        let row = i64::try_from(self.rows).ok()? - scaled;
        usize::try_from(row).ok().filter(|row| *row <= self.rows)
    }

    /// Data value printed on the axis at grid `row`.
    #[must_use]
    pub fn label_value(&self, row: usize) -> f64 {
        self.max - row as f64 * self.range / self.rows as f64
    }

    /// Column of data position `x`.
    #[must_use]
    pub fn column_of(&self, x: usize) -> usize {
        x + self.offset
    }
}

fn scale_value(value: f64, ratio: f64) -> i64 {
    (value * ratio).round() as i64
}

fn checked_scale_value(value: f64, ratio: f64) -> ChartResult<i64> {
    let scaled = (value * ratio).round();
    if !scaled.is_finite() || scaled.abs() > MAX_SCALED {
        return Err(ChartError::InvalidData(format!(
            "value {value} scales outside the representable row range"
        )));
    }
    Ok(scaled as i64)
}

#[cfg(test)]
mod tests {
    use super::{Extents, MAX_GRID_CELLS, ScaleState};
    use crate::core::{Appearance, Series};
    use crate::error::ChartError;
    use crate::render::ColorList;

    fn markers(values: &[(i64, f64)]) -> Series {
        Series::markers(
            values.iter().map(|(x, y)| (*x, Some(*y))),
            ColorList::new(),
            None,
        )
    }

    #[test]
    fn extents_cover_all_series() {
        let series = vec![
            markers(&[(0, 1.0), (1, 3.0)]),
            markers(&[(4, -2.0)]),
            Series::line(7.5, ColorList::new(), Appearance::FullLine),
        ];
        let extents = Extents::scan(&series).expect("extents");
        assert_eq!(extents.min, -2.0);
        assert_eq!(extents.max, 7.5);
        assert_eq!(extents.width, 5);
    }

    #[test]
    fn empty_series_set_is_reported() {
        let series = vec![Series::markers(
            vec![(0, None), (1, None)],
            ColorList::new(),
            None,
        )];
        assert!(matches!(
            Extents::scan(&series),
            Err(ChartError::EmptySeriesSet)
        ));
        assert!(matches!(
            Extents::scan(&Vec::<Series>::new()),
            Err(ChartError::EmptySeriesSet)
        ));
    }

    #[test]
    fn degenerate_range_is_clamped_to_one_row() {
        let extents = Extents {
            min: 5.0,
            max: 5.0,
            width: 1,
        };
        let scale = ScaleState::new(extents, 1.0, 3).expect("scale");
        assert_eq!(scale.range, 1.0);
        assert_eq!(scale.rows, 1);
        assert_eq!(scale.total_width, 4);
    }

    #[test]
    fn scaled_values_map_to_top_down_rows() {
        let extents = Extents {
            min: 1.0,
            max: 3.0,
            width: 3,
        };
        let scale = ScaleState::new(extents, 4.0, 2).expect("scale");
        assert_eq!(scale.ratio, 2.0);
        assert_eq!((scale.min2, scale.max2, scale.rows), (2, 6, 4));
        assert_eq!(scale.row_of(scale.scaled(3.0)), Some(0));
        assert_eq!(scale.row_of(scale.scaled(1.0)), Some(4));
        assert_eq!(scale.row_of(scale.scaled(10.0)), None);
        assert_eq!(scale.label_value(0), 3.0);
        assert_eq!(scale.label_value(4), 1.0);
    }

    #[test]
    fn invalid_height_and_offset_are_rejected() {
        let extents = Extents {
            min: 0.0,
            max: 1.0,
            width: 1,
        };
        assert!(ScaleState::new(extents, 0.0, 2).is_err());
        assert!(ScaleState::new(extents, f64::NAN, 2).is_err());
        assert!(ScaleState::new(extents, 4.0, 0).is_err());
    }

    #[test]
    fn oversized_grids_are_rejected() {
        let saturating = Extents {
            min: -1e19,
            max: 1e19,
            width: 2,
        };
        assert!(matches!(
            ScaleState::new(saturating, saturating.max - saturating.min, 10),
            Err(ChartError::InvalidData(_))
        ));

        let tall = Extents {
            min: 0.0,
            max: 1e7,
            width: 2,
        };
        assert!(matches!(
            ScaleState::new(tall, 1e7, 10),
            Err(ChartError::InvalidData(_))
        ));
        assert!(ScaleState::new(tall, 40.0, 10).is_ok());

        let wide = Extents {
            min: 0.0,
            max: 1.0,
            width: MAX_GRID_CELLS,
        };
        assert!(matches!(
            ScaleState::new(wide, 1.0, 10),
            Err(ChartError::InvalidData(_))
        ));
    }

    #[test]
    fn unrepresentable_range_is_rejected() {
        let extents = Extents {
            min: -f64::MAX,
            max: f64::MAX,
            width: 1,
        };
        assert!(matches!(
            ScaleState::new(extents, 10.0, 2),
            Err(ChartError::InvalidData(_))
        ));
    }
}
