use crate::roster::{PlayerId, Position, PositionCategory};
use std::collections::{BTreeSet, HashMap};

/// Per-player bookkeeping for a single build. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct PlayerTracking {
    pub bench_periods: Vec<u32>,
    pub jersey_periods: Vec<u32>,
    pub gk_periods: Vec<u32>,
    /// Sits fixed ahead of time by the goalkeeper plan (jersey and reserved bench).
    pub planned_sits: BTreeSet<u32>,
    pub categories_played: BTreeSet<PositionCategory>,
    pub positions_played: BTreeSet<Position>,
    pub playing_time: f32,
}

impl PlayerTracking {
    fn sits(&self) -> BTreeSet<u32> {
        self.bench_periods
            .iter()
            .chain(self.jersey_periods.iter())
            .chain(self.planned_sits.iter())
            .copied()
            .collect()
    }

    /// Sits taken so far plus those already planned for later periods.
    pub fn total_sits(&self) -> usize {
        self.sits().len()
    }

    pub fn sits_in(&self, period: u32) -> bool {
        self.bench_periods.contains(&period)
            || self.jersey_periods.contains(&period)
            || self.planned_sits.contains(&period)
    }

    /// True if sitting in `period` would touch a neighbouring sit.
    pub fn adjacent_to_sit(&self, period: u32) -> bool {
        (period > 1 && self.sits_in(period - 1)) || self.sits_in(period + 1)
    }

    pub fn needs_variety(&self, min_categories: usize) -> bool {
        self.categories_played.len() < min_categories
    }

    pub fn record_position(&mut self, position: Position, minutes: f32) {
        self.categories_played.insert(position.category());
        self.positions_played.insert(position);
        self.playing_time += minutes;
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrackingBook {
    records: HashMap<PlayerId, PlayerTracking>,
}

impl TrackingBook {
    pub fn new<'a>(players: impl IntoIterator<Item = &'a PlayerId>) -> Self {
        TrackingBook {
            records: players
                .into_iter()
                .map(|id| (id.clone(), PlayerTracking::default()))
                .collect(),
        }
    }

    pub fn get(&self, player: &PlayerId) -> Option<&PlayerTracking> {
        self.records.get(player)
    }

    pub fn entry(&mut self, player: &PlayerId) -> &mut PlayerTracking {
        self.records.entry(player.clone()).or_default()
    }
}
