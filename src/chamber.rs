use std::fmt;

use itertools::Itertools;

use crate::error::TowerError;
use crate::shapes::{Mask, ShapeKind};
use crate::CHAMBER_WIDTH;

const WIDTH: i64 = CHAMBER_WIDTH as i64;
const SPAWN_COLUMN: i64 = 2;
const SPAWN_CLEARANCE: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Rock,
}

/// A shape that is still moving. Anchored at its bottom-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallingShape {
    pub(crate) kind: ShapeKind,
    pub(crate) mask: Mask,
    pub(crate) row: i64,
    pub(crate) column: i64,
}

impl FallingShape {
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn row(&self) -> i64 {
        self.row
    }

    pub fn column(&self) -> i64 {
        self.column
    }

    pub fn top_row(&self) -> i64 {
        self.row + self.mask.height() - 1
    }

    pub fn occupies(&self, (row, column): (i64, i64)) -> bool {
        self.cells().any(|p| p == (row, column))
    }

    /// Absolute `(row, column)` of every rock cell.
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.mask
            .rock_cells()
            .map(move |(dx, dy)| (self.row + dy, self.column + dx))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthProfile(pub [u32; CHAMBER_WIDTH]);

#[derive(Debug, Clone)]
pub struct Chamber {
    row_data: Vec<[Cell; CHAMBER_WIDTH]>,
    tallest_row: i64,
}

impl Default for Chamber {
    fn default() -> Self {
        Chamber::new()
    }
}

impl Chamber {
    pub fn new() -> Chamber {
        Chamber {
            row_data: Vec::new(),
            tallest_row: -1,
        }
    }

    pub fn tallest_row(&self) -> i64 {
        self.tallest_row
    }

    pub fn height(&self) -> u64 {
        (self.tallest_row + 1) as u64
    }

    pub fn number_of_rows(&self) -> usize {
        self.row_data.len()
    }

    pub fn ensure_capacity(&mut self, top_row: i64) {
        if top_row < 0 {
            return;
        }
        let needed = (top_row + 1) as usize;
        if needed > self.row_data.len() {
            self.row_data.resize(needed, [Cell::Empty; CHAMBER_WIDTH]);
        }
    }

    pub fn spawn(&self, kind: ShapeKind, mask: Mask) -> FallingShape {
        let top_row = self.tallest_row + SPAWN_CLEARANCE + mask.height();
        FallingShape {
            kind,
            row: top_row - mask.height() + 1,
            column: SPAWN_COLUMN,
            mask,
        }
    }

    fn at(&self, (row, column): (i64, i64)) -> Option<Cell> {
        if row < 0 || column < 0 || column >= WIDTH {
            return None;
        }
        Some(
            self.row_data
                .get(row as usize)
                .map_or(Cell::Empty, |cells| cells[column as usize]),
        )
    }

    /// Walls and the floor are never rock.
    pub fn occupied_by_rock(&self, row: i64, column: i64) -> bool {
        self.at((row, column)) == Some(Cell::Rock)
    }

    /// Walls and the floor block, as does settled rock.
    pub fn is_blocked(&self, row: i64, column: i64) -> bool {
        match self.at((row, column)) {
            Some(Cell::Empty) => false,
            Some(Cell::Rock) | None => true,
        }
    }

    pub fn settle(&mut self, shape: FallingShape) -> Result<(), TowerError> {
        if let Some((row, column)) = shape
            .cells()
            .find(|&(row, column)| self.is_blocked(row, column))
        {
            return Err(TowerError::OccupancyConflict { row, column });
        }

        self.ensure_capacity(shape.top_row());
        let mut top = self.tallest_row;
        for (row, column) in shape.cells() {
            self.row_data[row as usize][column as usize] = Cell::Rock;
            top = top.max(row);
        }
        self.tallest_row = top;

        Ok(())
    }

    pub fn depth_profile(&self) -> DepthProfile {
        let mut rv = [0; CHAMBER_WIDTH];

        for (column, depth) in rv.iter_mut().enumerate() {
            let mut row = self.tallest_row;
            while row >= 0 && !self.occupied_by_rock(row, column as i64) {
                row -= 1;
            }
            *depth = (self.tallest_row - row) as u32;
        }

        DepthProfile(rv)
    }

    pub fn render(&self, max_rows: usize, falling: Option<&FallingShape>) -> String {
        let top = falling.map_or(self.tallest_row, |shape| {
            shape.top_row().max(self.tallest_row)
        });
        let bottom = (top + 1 - max_rows as i64).max(0);

        let mut lines: Vec<String> = (bottom..=top)
            .rev()
            .map(|row| {
                let cells: String = (0..WIDTH)
                    .map(|column| {
                        if falling.map_or(false, |shape| shape.occupies((row, column))) {
                            '@'
                        } else if self.occupied_by_rock(row, column) {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect();
                format!("|{}|", cells)
            })
            .collect();

        if bottom == 0 {
            lines.push(format!("+{}+", "-".repeat(CHAMBER_WIDTH)));
        }

        lines.iter().join("\n")
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(self.row_data.len(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeCatalog;

    fn spawn(chamber: &Chamber, kind: ShapeKind) -> FallingShape {
        let catalog = ShapeCatalog::new().unwrap();
        chamber.spawn(kind, catalog.instantiate(kind))
    }

    #[test]
    fn walls_and_floor_block_but_are_not_rock() {
        let chamber = Chamber::new();
        for row in -1..10 {
            assert!(!chamber.occupied_by_rock(row, -1));
            assert!(!chamber.occupied_by_rock(row, 7));
            assert!(chamber.is_blocked(row, -1));
            assert!(chamber.is_blocked(row, 7));
        }
        for column in 0..7 {
            assert!(!chamber.occupied_by_rock(-1, column));
            assert!(chamber.is_blocked(-1, column));
            assert!(!chamber.is_blocked(0, column));
        }
    }

    #[test]
    fn spawn_leaves_three_rows_of_clearance() {
        let mut chamber = Chamber::new();
        let bar = spawn(&chamber, ShapeKind::HorizontalBar);
        assert_eq!((bar.row(), bar.column()), (3, 2));

        let mut bar = bar;
        bar.row = 0;
        chamber.settle(bar).unwrap();
        let plus = spawn(&chamber, ShapeKind::Plus);
        assert_eq!((plus.row(), plus.top_row(), plus.column()), (4, 6, 2));
        assert_eq!(chamber.number_of_rows(), 1);
    }

    #[test]
    fn settle_writes_rock_and_raises_tallest_row() {
        let mut chamber = Chamber::new();
        assert_eq!(chamber.tallest_row(), -1);

        let mut bar = spawn(&chamber, ShapeKind::VerticalBar);
        bar.row = 0;
        bar.column = 6;
        chamber.settle(bar).unwrap();
        assert_eq!(chamber.tallest_row(), 3);
        assert_eq!(chamber.height(), 4);
        assert!(chamber.occupied_by_rock(3, 6));

        // A lower shape leaves the tallest row alone.
        let mut square = spawn(&chamber, ShapeKind::Square);
        square.row = 0;
        square.column = 0;
        chamber.settle(square).unwrap();
        assert_eq!(chamber.tallest_row(), 3);
    }

    #[test]
    fn settle_refuses_to_overwrite_rock() {
        let mut chamber = Chamber::new();
        let mut square = spawn(&chamber, ShapeKind::Square);
        square.row = 0;
        chamber.settle(square.clone()).unwrap();
        assert_eq!(
            chamber.settle(square),
            Err(TowerError::OccupancyConflict { row: 0, column: 2 })
        );
    }

    #[test]
    fn ensure_capacity_never_shrinks() {
        let mut chamber = Chamber::new();
        chamber.ensure_capacity(9);
        assert_eq!(chamber.number_of_rows(), 10);
        chamber.ensure_capacity(2);
        assert_eq!(chamber.number_of_rows(), 10);
    }

    #[test]
    fn depth_profile_counts_down_to_rock_or_floor() {
        let mut chamber = Chamber::new();
        assert_eq!(chamber.depth_profile(), DepthProfile([0; 7]));

        let mut bar = spawn(&chamber, ShapeKind::HorizontalBar);
        bar.row = 0;
        bar.column = 0;
        chamber.settle(bar).unwrap();
        let mut pillar = spawn(&chamber, ShapeKind::VerticalBar);
        pillar.row = 0;
        pillar.column = 5;
        chamber.settle(pillar).unwrap();

        let profile = chamber.depth_profile();
        assert_eq!(profile, DepthProfile([3, 3, 3, 3, 4, 0, 4]));
        assert_eq!(chamber.depth_profile(), profile);
    }

    #[test]
    fn renders_falling_and_settled_rock() {
        let mut chamber = Chamber::new();
        let mut bar = spawn(&chamber, ShapeKind::HorizontalBar);
        bar.row = 0;
        chamber.settle(bar).unwrap();
        let square = spawn(&chamber, ShapeKind::Square);

        let expected = [
            "|..@@...|",
            "|..@@...|",
            "|.......|",
            "|.......|",
            "|.......|",
            "|..####.|",
            "+-------+",
        ]
        .join("\n");
        assert_eq!(chamber.render(100, Some(&square)), expected);
        assert_eq!(chamber.render(2, Some(&square)), "|..@@...|\n|..@@...|");
        assert_eq!(chamber.to_string(), "|..####.|\n+-------+");
    }
}
