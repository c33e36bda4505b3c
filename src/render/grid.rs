use serde::{Deserialize, Serialize};

use crate::render::{ColorList, ColorToken};

pub const BLANK: char = ' ';

/// One character cell and the color context it was drawn with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub glyph: char,
    pub colors: ColorList,
}

impl Cell {
    #[must_use]
    pub fn blank() -> Self {
        Self {
            glyph: BLANK,
            colors: ColorList::new(),
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.glyph == BLANK
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

/// Fixed-size character buffer addressed by `(row, column)`, row 0 on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    #[must_use]
    pub fn blank(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::blank(); height * width],
        }
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.index(row, column).map(|index| &self.cells[index])
    }

    /// Glyph at `(row, column)`, blank when out of bounds.
    #[must_use]
    pub fn glyph(&self, row: usize, column: usize) -> char {
        self.cell(row, column).map_or(BLANK, |cell| cell.glyph)
    }

    /// Writes one glyph. Writes outside the buffer are ignored and reported as `false`.
    pub fn put(&mut self, row: usize, column: usize, glyph: char, colors: &[ColorToken]) -> bool {
        let Some(index) = self.index(row, column) else {
            return false;
        };
        let cell = &mut self.cells[index];
        cell.glyph = glyph;
        cell.colors = ColorList::from_slice(colors);
        true
    }

    /// Copies every non-blank cell of `other` on top of this grid.
    pub fn overlay(&mut self, other: &Grid) {
        for row in 0..other.height.min(self.height) {
            for column in 0..other.width.min(self.width) {
                let Some(cell) = other.cell(row, column) else {
                    continue;
                };
                if !cell.is_blank() {
                    let index = row * self.width + column;
                    self.cells[index] = cell.clone();
                }
            }
        }
    }

    /// Cells of one row, left to right.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Cell] {
        if row >= self.height {
            return &[];
        }
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Row glyphs without styling.
    #[must_use]
    pub fn row_text(&self, row: usize) -> String {
        self.row(row).iter().map(|cell| cell.glyph).collect()
    }

    /// All rows as plain text, top to bottom.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|row| self.row_text(row)).collect()
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.height && column < self.width).then(|| row * self.width + column)
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use crate::render::{ColorToken, TermColor};

    #[test]
    fn put_outside_bounds_is_ignored() {
        let mut grid = Grid::blank(2, 3);
        assert!(grid.put(1, 2, 'o', &[]));
        assert!(!grid.put(2, 0, 'o', &[]));
        assert!(!grid.put(0, 3, 'o', &[]));
        assert_eq!(grid.lines(), vec!["   ".to_owned(), "  o".to_owned()]);
    }

    #[test]
    fn overlay_skips_blank_cells() {
        let red = [ColorToken::Foreground(TermColor::Red)];
        let mut base = Grid::blank(1, 3);
        base.put(0, 0, '─', &red);
        base.put(0, 1, '─', &red);

        let mut top = Grid::blank(1, 3);
        top.put(0, 1, 'o', &[]);
        top.put(0, 2, 'o', &[]);

        base.overlay(&top);
        assert_eq!(base.row_text(0), "─oo");
        assert_eq!(base.cell(0, 0).map(|cell| cell.colors.len()), Some(1));
        assert_eq!(base.cell(0, 1).map(|cell| cell.colors.len()), Some(0));
    }
}
