//! ascii-linechart: colorized character-grid line charts for terminals.
//!
//! Series are registered on a [`LineChart`], scaled together, rasterized one
//! grid per series with box-drawing glyphs, and composited on a [`Canvas`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartSettings, LineChart};
pub use crate::core::Appearance;
pub use error::{ChartError, ChartResult};
pub use render::{Canvas, ColorList, ColorToken, Colorizer, TermColor};
