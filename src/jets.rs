use std::str::FromStr;

use crate::error::TowerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jet {
    Left,
    Right,
}

impl Jet {
    pub fn from_char(c: char) -> Option<Jet> {
        match c {
            '<' => Some(Jet::Left),
            '>' => Some(Jet::Right),
            _ => None,
        }
    }

    pub fn offset(&self) -> i64 {
        match self {
            Jet::Left => -1,
            Jet::Right => 1,
        }
    }
}

pub fn parse_jets(s: &str) -> Result<Vec<Jet>, TowerError> {
    let jets = s
        .chars()
        .enumerate()
        .filter(|(_, c)| *c != '\n' && *c != '\r')
        .map(|(position, character)| {
            Jet::from_char(character).ok_or(TowerError::InvalidJet {
                character,
                position,
            })
        })
        .collect::<Result<Vec<Jet>, TowerError>>()?;

    if jets.is_empty() {
        return Err(TowerError::EmptyJets);
    }

    Ok(jets)
}

/// The jet sequence replayed cyclically. The index carries over between shapes.
#[derive(Debug, Clone)]
pub struct JetPattern {
    jets: Vec<Jet>,
    index: usize,
}

impl JetPattern {
    pub fn new(jets: Vec<Jet>) -> Result<JetPattern, TowerError> {
        if jets.is_empty() {
            return Err(TowerError::EmptyJets);
        }
        Ok(JetPattern { jets, index: 0 })
    }

    pub fn next_jet(&mut self) -> Jet {
        let jet = self.jets[self.index];
        self.index = (self.index + 1) % self.jets.len();
        jet
    }

    pub fn phase(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.jets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jets.is_empty()
    }
}

impl FromStr for JetPattern {
    type Err = TowerError;

    fn from_str(s: &str) -> Result<JetPattern, TowerError> {
        JetPattern::new(parse_jets(s)?)
    }
}
