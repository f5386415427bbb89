use log::trace;

use crate::chamber::{Chamber, FallingShape};
use crate::error::TowerError;
use crate::jets::Jet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fall {
    Moved,
    Settled,
}

fn fits(chamber: &Chamber, shape: &FallingShape, ddx: i64, ddy: i64) -> bool {
    !shape
        .cells()
        .any(|(row, column)| chamber.is_blocked(row + ddy, column + ddx))
}

/// Moves the active shape one column with the jet if nothing is in the way.
/// Returns whether it moved.
pub fn try_push(
    chamber: &Chamber,
    active: &mut Option<FallingShape>,
    jet: Jet,
) -> Result<bool, TowerError> {
    let shape = active.as_mut().ok_or(TowerError::NoFallingShape)?;

    let ddx = jet.offset();
    if !fits(chamber, shape, ddx, 0) {
        trace!("{:?} blocked at column {}", jet, shape.column);
        return Ok(false);
    }

    shape.column += ddx;
    trace!("{:?} to column {}", jet, shape.column);
    Ok(true)
}

/// Moves the active shape down one row, or settles it in place when it cannot fall.
pub fn try_fall(
    chamber: &mut Chamber,
    active: &mut Option<FallingShape>,
) -> Result<Fall, TowerError> {
    let shape = active.as_mut().ok_or(TowerError::NoFallingShape)?;

    if fits(chamber, shape, 0, -1) {
        shape.row -= 1;
        trace!("fell to row {}", shape.row);
        return Ok(Fall::Moved);
    }

    // freeze
    if let Some(shape) = active.take() {
        trace!(
            "{:?} settled at row {}, column {}",
            shape.kind,
            shape.row,
            shape.column
        );
        chamber.settle(shape)?;
    }
    Ok(Fall::Settled)
}
