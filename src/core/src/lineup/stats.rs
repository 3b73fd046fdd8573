use crate::lineup::LineupGrid;
use crate::roster::{PlayerId, Position, PositionCategory, RosterProvider};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    pub player: PlayerId,
    pub total_minutes: f32,
    pub bench_periods: Vec<u32>,
    pub jersey_periods: Vec<u32>,
    pub positions: BTreeMap<Position, u32>,
}

impl PlayerStats {
    fn new(player: PlayerId) -> Self {
        PlayerStats {
            player,
            total_minutes: 0.0,
            bench_periods: Vec::new(),
            jersey_periods: Vec::new(),
            positions: BTreeMap::new(),
        }
    }

    /// Bench and jersey periods merged in period order.
    pub fn sit_periods(&self) -> Vec<u32> {
        let mut periods: Vec<u32> = self
            .bench_periods
            .iter()
            .chain(self.jersey_periods.iter())
            .copied()
            .collect();
        periods.sort_unstable();
        periods
    }

    pub fn sit_count(&self) -> usize {
        self.bench_periods.len() + self.jersey_periods.len()
    }

    pub fn goalkeeper_periods(&self) -> u32 {
        self.positions.get(&Position::Goalkeeper).copied().unwrap_or(0)
    }

    pub fn categories(&self) -> BTreeSet<PositionCategory> {
        self.positions.keys().map(|p| p.category()).collect()
    }
}

/// Per-player aggregate read straight from the grid, in roster order.
/// Players found on the grid but missing from the roster are appended.
pub fn player_stats<R: RosterProvider + ?Sized>(
    grid: &LineupGrid,
    roster: &R,
    period_minutes: f32,
) -> Vec<PlayerStats> {
    let mut stats: Vec<PlayerStats> = roster
        .player_names()
        .into_iter()
        .map(PlayerStats::new)
        .collect();

    for (period, assignment) in grid.periods() {
        for (position, player) in assignment.field_players() {
            let entry = entry_for(&mut stats, player);
            entry.total_minutes += period_minutes;
            *entry.positions.entry(position).or_insert(0) += 1;
        }

        for player in assignment.bench() {
            entry_for(&mut stats, player).bench_periods.push(period);
        }

        for player in assignment.jersey() {
            entry_for(&mut stats, player).jersey_periods.push(period);
        }
    }

    stats
}

fn entry_for<'s>(stats: &'s mut Vec<PlayerStats>, player: &PlayerId) -> &'s mut PlayerStats {
    let idx = match stats.iter().position(|s| &s.player == player) {
        Some(idx) => idx,
        None => {
            stats.push(PlayerStats::new(player.clone()));
            stats.len() - 1
        }
    };

    &mut stats[idx]
}
