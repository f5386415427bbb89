use crate::chamber::Cell;
use crate::error::TowerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    HorizontalBar,
    Plus,
    Corner,
    VerticalBar,
    Square,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::HorizontalBar,
        ShapeKind::Plus,
        ShapeKind::Corner,
        ShapeKind::VerticalBar,
        ShapeKind::Square,
    ];

    pub fn for_drop(drop_index: u64) -> ShapeKind {
        ShapeKind::ALL[(drop_index % ShapeKind::ALL.len() as u64) as usize]
    }

    pub fn index(&self) -> usize {
        match self {
            ShapeKind::HorizontalBar => 0,
            ShapeKind::Plus => 1,
            ShapeKind::Corner => 2,
            ShapeKind::VerticalBar => 3,
            ShapeKind::Square => 4,
        }
    }

    fn picture(&self) -> &'static str {
        match self {
            ShapeKind::HorizontalBar => "####",
            ShapeKind::Plus => ".#.\n###\n.#.",
            ShapeKind::Corner => "..#\n..#\n###",
            ShapeKind::VerticalBar => "#\n#\n#\n#",
            ShapeKind::Square => "##\n##",
        }
    }
}

/// Occupancy of a single shape. Rows are stored top to bottom, as drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: i64,
    height: i64,
    row_data: Vec<Vec<Cell>>,
}

impl Mask {
    pub fn from_string(s: &str) -> Result<Mask, TowerError> {
        let rows: Vec<&str> = s.trim().split('\n').map(|row| row.trim()).collect();
        let width = rows[0].len();

        if width == 0 {
            return Err(TowerError::InvalidMask("empty row".to_string()));
        }
        if !rows.iter().all(|row| row.len() == width) {
            return Err(TowerError::InvalidMask(
                "rows are not all the same length".to_string(),
            ));
        }

        let row_data = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        '#' => Ok(Cell::Rock),
                        '.' => Ok(Cell::Empty),
                        _ => Err(TowerError::InvalidMask(format!("bad cell {:?}", c))),
                    })
                    .collect()
            })
            .collect::<Result<Vec<Vec<Cell>>, TowerError>>()?;

        Ok(Mask {
            width: width as i64,
            height: rows.len() as i64,
            row_data,
        })
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    /// Offsets `(dx, dy)` of every rock cell, measured from the bottom-left corner.
    pub fn rock_cells(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        itertools::iproduct!(0..self.height, 0..self.width).filter_map(move |(dy, dx)| {
            let row = &self.row_data[(self.height - 1 - dy) as usize];
            match row[dx as usize] {
                Cell::Rock => Some((dx, dy)),
                Cell::Empty => None,
            }
        })
    }
}

pub struct ShapeCatalog {
    masks: Vec<Mask>,
}

impl ShapeCatalog {
    pub fn new() -> Result<ShapeCatalog, TowerError> {
        let masks = ShapeKind::ALL
            .iter()
            .map(|kind| Mask::from_string(kind.picture()))
            .collect::<Result<Vec<Mask>, TowerError>>()?;
        Ok(ShapeCatalog { masks })
    }

    pub fn next_shape_kind(&self, drop_index: u64) -> ShapeKind {
        ShapeKind::for_drop(drop_index)
    }

    pub fn instantiate(&self, kind: ShapeKind) -> Mask {
        self.masks[kind.index()].clone()
    }
}
