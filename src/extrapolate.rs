use crate::cycle::Cycle;
use crate::error::TowerError;

/// Stack height after each number of settled shapes, starting with 0 for none.
#[derive(Debug, Clone)]
pub struct HeightHistory {
    heights: Vec<u64>,
}

impl Default for HeightHistory {
    fn default() -> Self {
        HeightHistory::new()
    }
}

impl HeightHistory {
    pub fn new() -> HeightHistory {
        HeightHistory { heights: vec![0] }
    }

    pub fn record(&mut self, height: u64) {
        self.heights.push(height);
    }

    pub fn at(&self, shapes_settled: u64) -> Option<u64> {
        usize::try_from(shapes_settled)
            .ok()
            .and_then(|i| self.heights.get(i))
            .copied()
    }

    pub fn latest(&self) -> u64 {
        self.heights.last().copied().unwrap_or(0)
    }

    /// Number of recorded entries, one more than the shapes recorded.
    pub fn len(&self) -> u64 {
        self.heights.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    fn require(&self, shapes_settled: u64) -> Result<u64, TowerError> {
        self.at(shapes_settled).ok_or(TowerError::HistoryTooShort {
            needed: shapes_settled,
            recorded: self.len(),
        })
    }
}

pub fn extrapolate(cycle: &Cycle, target: u64, history: &HeightHistory) -> Result<u64, TowerError> {
    let (n0, h0) = (cycle.first.shapes_settled, cycle.first.height);
    let n1 = cycle.second.shapes_settled;

    if target < n0 {
        return history.require(target);
    }

    let remaining = target - n0;
    let full_cycles = remaining / cycle.shapes();
    let tail_shapes = remaining % cycle.shapes();
    let tail_height = history.require(n1 + tail_shapes)? - history.require(n1)?;

    Ok(h0 + full_cycles * cycle.height() + tail_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::Observation;

    // Two shapes of prefix adding 5, then a repeating 3-shape pattern of +1 +2 +4.
    fn synthetic() -> (HeightHistory, Cycle) {
        let mut history = HeightHistory::new();
        let mut height = 0;
        let gains = [2, 3, 1, 2, 4, 1, 2, 4, 1, 2, 4];
        for gain in gains {
            height += gain;
            history.record(height);
        }
        let cycle = Cycle {
            first: Observation {
                shapes_settled: 2,
                height: 5,
            },
            second: Observation {
                shapes_settled: 5,
                height: 12,
            },
        };
        (history, cycle)
    }

    #[test]
    fn matches_recorded_history() {
        let (history, cycle) = synthetic();
        for target in 0..history.len() {
            assert_eq!(
                extrapolate(&cycle, target, &history),
                Ok(history.at(target).unwrap()),
                "target {}",
                target
            );
        }
    }

    #[test]
    fn extends_past_the_recorded_history() {
        let (history, cycle) = synthetic();
        assert_eq!(extrapolate(&cycle, 302, &history), Ok(5 + 100 * 7));
        assert_eq!(extrapolate(&cycle, 303, &history), Ok(5 + 100 * 7 + 1));
        assert_eq!(extrapolate(&cycle, 304, &history), Ok(5 + 100 * 7 + 3));
    }

    #[test]
    fn reports_missing_lookahead() {
        let mut history = HeightHistory::new();
        for h in 1..=5 {
            history.record(h);
        }
        let cycle = Cycle {
            first: Observation {
                shapes_settled: 1,
                height: 1,
            },
            second: Observation {
                shapes_settled: 5,
                height: 5,
            },
        };
        assert_eq!(
            extrapolate(&cycle, 7, &history),
            Err(TowerError::HistoryTooShort {
                needed: 7,
                recorded: 6
            })
        );
        assert_eq!(extrapolate(&cycle, 9, &history), Ok(9));
    }
}
