pub mod scale;
pub mod series;

pub use scale::{Extents, MAX_GRID_CELLS, ScaleState};
pub use series::{Appearance, Series, SeriesStore};
