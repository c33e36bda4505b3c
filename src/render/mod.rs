mod canvas;
mod colorizer;
mod grid;
pub mod rasterizer;

pub use canvas::{Canvas, CanvasSnapshot};
pub use colorizer::{
    AnsiColorizer, ColorList, ColorToken, Colorizer, HtmlColorizer, PlainColorizer, TermColor,
};
pub use grid::{BLANK, Cell, Grid};
pub use rasterizer::{axis_labels, glyphs, rasterize_all, rasterize_series, reference_row};
