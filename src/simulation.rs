use log::{debug, info};

use crate::chamber::{Chamber, FallingShape};
use crate::cycle::{Cycle, CycleDetector, FingerprintKey, Observation};
use crate::engine::{self, Fall};
use crate::error::TowerError;
use crate::extrapolate::{extrapolate, HeightHistory};
use crate::jets::JetPattern;
use crate::shapes::{ShapeCatalog, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Hard limit on the number of shapes dropped.
    pub cutoff: u64,
    /// Keep dropping until at least this many shapes have settled.
    pub min_shapes: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            cutoff: 10_000,
            min_shapes: 0,
        }
    }
}

pub struct Simulation {
    chamber: Chamber,
    catalog: ShapeCatalog,
    jets: JetPattern,
    falling: Option<FallingShape>,
    shapes_settled: u64,
    history: HeightHistory,
    detector: CycleDetector,
}

impl Simulation {
    pub fn new(jets: JetPattern) -> Result<Simulation, TowerError> {
        Ok(Simulation {
            chamber: Chamber::new(),
            catalog: ShapeCatalog::new()?,
            jets,
            falling: None,
            shapes_settled: 0,
            history: HeightHistory::new(),
            detector: CycleDetector::new(),
        })
    }

    pub fn chamber(&self) -> &Chamber {
        &self.chamber
    }

    pub fn falling(&self) -> Option<&FallingShape> {
        self.falling.as_ref()
    }

    pub fn shapes_settled(&self) -> u64 {
        self.shapes_settled
    }

    pub fn history(&self) -> &HeightHistory {
        &self.history
    }

    pub fn cycle(&self) -> Option<Cycle> {
        self.detector.cycle()
    }

    pub fn spawn_next(&mut self) -> Result<Option<Cycle>, TowerError> {
        if self.falling.is_some() {
            return Err(TowerError::ShapeAlreadyFalling);
        }

        let kind = self.catalog.next_shape_kind(self.shapes_settled);
        let shape = self.chamber.spawn(kind, self.catalog.instantiate(kind));
        debug!(
            "spawning {:?} #{} at row {} (height {})",
            kind,
            self.shapes_settled,
            shape.row(),
            self.chamber.height()
        );
        self.falling = Some(shape);

        if self.detector.cycle().is_some() {
            return Ok(None);
        }

        let key = FingerprintKey {
            profile: self.chamber.depth_profile(),
            jet_phase: self.jets.phase(),
            shape_phase: (self.shapes_settled % ShapeKind::ALL.len() as u64) as usize,
        };
        let observation = Observation {
            shapes_settled: self.shapes_settled,
            height: self.chamber.height(),
        };
        Ok(self.detector.record(key, observation))
    }

    pub fn push(&mut self) -> Result<bool, TowerError> {
        if self.falling.is_none() {
            return Err(TowerError::NoFallingShape);
        }
        let jet = self.jets.next_jet();
        engine::try_push(&self.chamber, &mut self.falling, jet)
    }

    pub fn fall(&mut self) -> Result<Fall, TowerError> {
        let fall = engine::try_fall(&mut self.chamber, &mut self.falling)?;
        if fall == Fall::Settled {
            self.shapes_settled += 1;
            self.history.record(self.chamber.height());
        }
        Ok(fall)
    }

    pub fn drop_shape(&mut self) -> Result<Option<Cycle>, TowerError> {
        let cycle = self.spawn_next()?;
        loop {
            // Move by jet if possible
            self.push()?;

            // Move down if possible
            if self.fall()? == Fall::Settled {
                break;
            }
        }
        Ok(cycle)
    }

    fn finished(&self, config: &SimulationConfig) -> Option<Cycle> {
        let cycle = self.detector.cycle()?;
        let lookahead = cycle.second.shapes_settled + cycle.shapes();
        if self.shapes_settled >= lookahead && self.shapes_settled >= config.min_shapes {
            Some(cycle)
        } else {
            None
        }
    }

    /// Drops shapes until a cycle is known and one further full cycle has been
    /// recorded past it.
    pub fn run(&mut self, config: &SimulationConfig) -> Result<Cycle, TowerError> {
        while self.shapes_settled < config.cutoff {
            if self.finished(config).is_some() {
                break;
            }
            if let Some(cycle) = self.drop_shape()? {
                info!(
                    "cycle of {} shapes adding {} rows, first seen after {} shapes",
                    cycle.shapes(),
                    cycle.height(),
                    cycle.first.shapes_settled
                );
            }
        }

        if let Some(cycle) = self.finished(config) {
            return Ok(cycle);
        }

        match self.detector.cycle() {
            None => Err(TowerError::CycleNotFound {
                cutoff: config.cutoff,
            }),
            Some(cycle) => {
                let lookahead = cycle.second.shapes_settled + cycle.shapes();
                if self.shapes_settled >= lookahead {
                    // Only min_shapes was out of reach.
                    Ok(cycle)
                } else {
                    Err(TowerError::HistoryTooShort {
                        needed: lookahead,
                        recorded: self.history.len(),
                    })
                }
            }
        }
    }

    pub fn height_after(&self, target: u64, cycle: &Cycle) -> Result<u64, TowerError> {
        match self.history.at(target) {
            Some(height) => Ok(height),
            None => extrapolate(cycle, target, &self.history),
        }
    }
}
