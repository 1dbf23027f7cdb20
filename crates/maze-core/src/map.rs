//! The explored map: a rectangular grid of cells anchored at an origin offset
//! so that coordinates on either side of the start position fit.
//!
//! The grid only grows. Cells created by growth start as [`MapCell::Wall`],
//! except the cell that triggered the growth, which is left
//! [`MapCell::Unknown`] until it is marked visited.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::orientation::{Orientation, Position};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapCell {
    #[default]
    Unknown,
    Wall,
    Floor,
}

impl MapCell {
    pub fn glyph(self) -> char {
        match self {
            Self::Unknown => ' ',
            Self::Wall => '#',
            Self::Floor => '.',
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploredMap {
    /// Coordinate of `rows[0][0]`.
    origin: Position,
    rows: Vec<Vec<MapCell>>,
}

impl ExploredMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Inclusive top-left and bottom-right corners, or `None` when empty.
    pub fn bounds(&self) -> Option<(Position, Position)> {
        if self.is_empty() {
            return None;
        }
        let max = Position::new(
            self.origin.x + self.width() as i64 - 1,
            self.origin.y + self.height() as i64 - 1,
        );
        Some((self.origin, max))
    }

    pub fn contains(&self, position: Position) -> bool {
        self.index_of(position).is_some()
    }

    /// Cell state at `position`; anything outside the grid is unexplored.
    pub fn cell(&self, position: Position) -> MapCell {
        self.index_of(position)
            .map_or(MapCell::Unknown, |(col, row)| self.rows[row][col])
    }

    pub fn rows(&self) -> &[Vec<MapCell>] {
        &self.rows
    }

    pub fn floor_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|c| **c == MapCell::Floor)
            .count()
    }

    fn index_of(&self, position: Position) -> Option<(usize, usize)> {
        let col = usize::try_from(position.x - self.origin.x).ok()?;
        let row = usize::try_from(position.y - self.origin.y).ok()?;
        (row < self.height() && col < self.width()).then_some((col, row))
    }

    /// Grow the grid until it covers `position`. Existing cells keep their
    /// state and coordinates.
    pub fn ensure_bounds(&mut self, position: Position) {
        if self.contains(position) {
            return;
        }
        if self.is_empty() {
            self.origin = position;
            self.rows = vec![vec![MapCell::Unknown]];
            return;
        }

        let (min, max) = self.bounds().unwrap_or((position, position));
        let new_min = Position::new(min.x.min(position.x), min.y.min(position.y));
        let new_max = Position::new(max.x.max(position.x), max.y.max(position.y));
        let width = (new_max.x - new_min.x + 1) as usize;
        let height = (new_max.y - new_min.y + 1) as usize;

        let mut grown = vec![vec![MapCell::Wall; width]; height];
        let col_shift = (self.origin.x - new_min.x) as usize;
        let row_shift = (self.origin.y - new_min.y) as usize;
        for (r, row) in self.rows.iter().enumerate() {
            grown[r + row_shift][col_shift..col_shift + row.len()].copy_from_slice(row);
        }
        grown[(position.y - new_min.y) as usize][(position.x - new_min.x) as usize] = MapCell::Unknown;

        self.origin = new_min;
        self.rows = grown;
    }

    /// Record that the agent occupied `position`. Idempotent.
    pub fn mark_visited(&mut self, position: Position) {
        self.ensure_bounds(position);
        if let Some((col, row)) = self.index_of(position) {
            self.rows[row][col] = MapCell::Floor;
        }
    }

    /// Read-only projection with the agent drawn at `position`.
    pub fn render_with_agent(&self, position: Position, orientation: Orientation) -> RenderedMap {
        let agent = self.index_of(position);
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(|(c, cell)| {
                        if agent == Some((c, r)) {
                            RenderedCell::Agent(orientation)
                        } else {
                            RenderedCell::Cell(*cell)
                        }
                    })
                    .collect()
            })
            .collect();
        RenderedMap {
            origin: self.origin,
            rows,
        }
    }
}

impl fmt::Display for ExploredMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().map(|c| c.glyph()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderedCell {
    Cell(MapCell),
    Agent(Orientation),
}

impl RenderedCell {
    pub fn glyph(self) -> char {
        match self {
            Self::Cell(cell) => cell.glyph(),
            Self::Agent(orientation) => orientation.glyph(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedMap {
    pub origin: Position,
    pub rows: Vec<Vec<RenderedCell>>,
}

impl RenderedMap {
    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.glyph()).collect())
            .collect()
    }
}

impl fmt::Display for RenderedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
