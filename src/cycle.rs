use std::collections::HashMap;

use log::debug;

use crate::chamber::DepthProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FingerprintKey {
    pub profile: DepthProfile,
    pub jet_phase: usize,
    pub shape_phase: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub shapes_settled: u64,
    pub height: u64,
}

/// Two observations of the same fingerprint, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub first: Observation,
    pub second: Observation,
}

impl Cycle {
    pub fn shapes(&self) -> u64 {
        self.second.shapes_settled - self.first.shapes_settled
    }

    pub fn height(&self) -> u64 {
        self.second.height - self.first.height
    }
}

#[derive(Debug, Default)]
pub struct CycleDetector {
    observations: HashMap<FingerprintKey, Vec<Observation>>,
    found: Option<Cycle>,
}

impl CycleDetector {
    pub fn new() -> CycleDetector {
        CycleDetector::default()
    }

    /// Records an observation. Returns the cycle on the first repeat only; once
    /// found, later observations are ignored.
    pub fn record(&mut self, key: FingerprintKey, observation: Observation) -> Option<Cycle> {
        if self.found.is_some() {
            return None;
        }

        let seen = self.observations.entry(key).or_default();
        seen.push(observation);
        if seen.len() < 2 {
            return None;
        }

        let cycle = Cycle {
            first: seen[0],
            second: seen[1],
        };
        debug!(
            "fingerprint {:?} repeats: shapes {}->{} height {}->{}",
            key,
            cycle.first.shapes_settled,
            cycle.second.shapes_settled,
            cycle.first.height,
            cycle.second.height
        );
        self.found = Some(cycle);
        self.found
    }

    pub fn cycle(&self) -> Option<Cycle> {
        self.found
    }

    pub fn distinct_fingerprints(&self) -> usize {
        self.observations.len()
    }
}
