use crate::roster::{Formation, PlayerId, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a player sits within one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Field(Position),
    Bench,
    Jersey,
}

impl Slot {
    pub fn is_sitting(self) -> bool {
        matches!(self, Slot::Bench | Slot::Jersey)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodAssignment {
    pub(crate) positions: BTreeMap<Position, Option<PlayerId>>,
    pub(crate) bench: Vec<PlayerId>,
    pub(crate) jersey: Vec<PlayerId>,
}

impl PeriodAssignment {
    pub fn new(formation: &Formation) -> Self {
        PeriodAssignment {
            positions: formation.positions().iter().map(|p| (*p, None)).collect(),
            bench: Vec::new(),
            jersey: Vec::new(),
        }
    }

    pub fn positions(&self) -> &BTreeMap<Position, Option<PlayerId>> {
        &self.positions
    }

    pub fn bench(&self) -> &[PlayerId] {
        &self.bench
    }

    pub fn jersey(&self) -> &[PlayerId] {
        &self.jersey
    }

    pub fn player_at(&self, position: Position) -> Option<&PlayerId> {
        self.positions.get(&position).and_then(|p| p.as_ref())
    }

    pub fn goalkeeper(&self) -> Option<&PlayerId> {
        self.player_at(Position::Goalkeeper)
    }

    pub fn slot_of(&self, player: &PlayerId) -> Option<Slot> {
        if let Some((position, _)) = self
            .positions
            .iter()
            .find(|(_, occupant)| occupant.as_ref() == Some(player))
        {
            return Some(Slot::Field(*position));
        }

        if self.bench.contains(player) {
            Some(Slot::Bench)
        } else if self.jersey.contains(player) {
            Some(Slot::Jersey)
        } else {
            None
        }
    }

    pub fn is_sitting(&self, player: &PlayerId) -> bool {
        self.slot_of(player).is_some_and(Slot::is_sitting)
    }

    pub fn sitting_count(&self) -> usize {
        self.bench.len() + self.jersey.len()
    }

    pub fn filled_count(&self) -> usize {
        self.positions.values().filter(|p| p.is_some()).count()
    }

    pub fn open_positions(&self) -> Vec<Position> {
        self.positions
            .iter()
            .filter(|(_, occupant)| occupant.is_none())
            .map(|(position, _)| *position)
            .collect()
    }

    pub fn field_players(&self) -> impl Iterator<Item = (Position, &PlayerId)> {
        self.positions
            .iter()
            .filter_map(|(position, occupant)| occupant.as_ref().map(|p| (*position, p)))
    }

    /// Every player id mentioned in this period, duplicates included.
    pub fn occupants(&self) -> Vec<&PlayerId> {
        self.positions
            .values()
            .flatten()
            .chain(self.bench.iter())
            .chain(self.jersey.iter())
            .collect()
    }

    pub(crate) fn remove(&mut self, player: &PlayerId) -> Option<Slot> {
        let slot = self.slot_of(player)?;

        match slot {
            Slot::Field(position) => {
                self.positions.insert(position, None);
            }
            Slot::Bench => self.bench.retain(|p| p != player),
            Slot::Jersey => self.jersey.retain(|p| p != player),
        }

        Some(slot)
    }

    pub(crate) fn clear(&mut self) {
        self.positions.values_mut().for_each(|occupant| *occupant = None);
        self.bench.clear();
        self.jersey.clear();
    }
}
