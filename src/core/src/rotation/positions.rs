use crate::roster::{Formation, PlayerId, Position, RosterProvider};
use crate::rotation::{PlayerTracking, TrackingBook};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAssignment {
    /// Filled outfield slots in formation order.
    pub assignments: Vec<(Position, PlayerId)>,
    pub unfilled: Vec<Position>,
    pub unplaced: Vec<PlayerId>,
    /// How many of the assignments came from the players' preferred lists.
    pub preferred_matches: usize,
}

/// Two-phase outfield assignment: preferred positions first, scarcest slot
/// first, then any eligible slot.
pub struct FieldPositionAssigner<'a, R: RosterProvider + ?Sized> {
    roster: &'a R,
    tracking: &'a TrackingBook,
    min_categories: usize,
}

impl<'a, R: RosterProvider + ?Sized> FieldPositionAssigner<'a, R> {
    pub fn new(roster: &'a R, tracking: &'a TrackingBook, min_categories: usize) -> Self {
        FieldPositionAssigner {
            roster,
            tracking,
            min_categories,
        }
    }

    /// The order of `field_players` is the last tie-break; when there are more
    /// players than slots, the ones listed last are the first to miss out.
    pub fn assign(&self, period: u32, field_players: &[PlayerId], formation: &Formation) -> FieldAssignment {
        let outfield: Vec<Position> = formation.outfield().collect();
        let preferred: HashMap<&PlayerId, Vec<Position>> = field_players
            .iter()
            .map(|p| (p, self.roster.preferred_positions(p)))
            .collect();

        let mut slots: HashMap<Position, PlayerId> = HashMap::new();

        self.match_preferred(period, field_players, &outfield, &preferred, &mut slots);
        self.fill_remaining(period, field_players, &outfield, &mut slots);

        let mut result = FieldAssignment::default();

        for position in &outfield {
            match slots.get(position) {
                Some(player) => {
                    if preferred.get(player).is_some_and(|p| p.contains(position)) {
                        result.preferred_matches += 1;
                    }
                    result.assignments.push((*position, player.clone()));
                }
                None => result.unfilled.push(*position),
            }
        }

        result.unplaced = field_players
            .iter()
            .filter(|p| !slots.values().any(|held| held == *p))
            .cloned()
            .collect();

        for position in &result.unfilled {
            warn!("period {}: no eligible player left for {}", period, position);
        }
        for player in &result.unplaced {
            if result.unfilled.is_empty() {
                debug!("period {}: outfield is full, {} rests", period, player);
            } else {
                warn!("period {}: no open position {} can play", period, player);
            }
        }

        result
    }

    fn match_preferred(
        &self,
        period: u32,
        field_players: &[PlayerId],
        outfield: &[Position],
        preferred: &HashMap<&PlayerId, Vec<Position>>,
        slots: &mut HashMap<Position, PlayerId>,
    ) {
        let candidates: Vec<(Position, Vec<(usize, &PlayerId)>)> = outfield
            .iter()
            .map(|position| {
                let pool = field_players
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| {
                        preferred.get(p).is_some_and(|list| list.contains(position))
                            && self.roster.can_play_position(p, *position)
                    })
                    .collect();
                (*position, pool)
            })
            .collect();

        // Scarcest position first; the sort is stable so formation order breaks ties.
        let mut order: Vec<&(Position, Vec<(usize, &PlayerId)>)> = candidates.iter().collect();
        order.sort_by_key(|(_, pool)| pool.len());

        let mut used: HashSet<&PlayerId> = HashSet::new();
        let empty = PlayerTracking::default();

        for (position, pool) in order {
            let best = pool
                .iter()
                .filter(|(_, p)| !used.contains(*p))
                .min_by_key(|(roster_idx, p)| {
                    let record = self.tracking.get(p).unwrap_or(&empty);
                    (
                        !record.needs_variety(self.min_categories),
                        record.positions_played.len(),
                        record.categories_played.contains(&position.category()),
                        *roster_idx,
                    )
                });

            if let Some((_, player)) = best {
                debug!("period {}: {} takes preferred {}", period, player, position);
                used.insert(player);
                slots.insert(*position, (*player).clone());
            }
        }
    }

    fn fill_remaining(
        &self,
        period: u32,
        field_players: &[PlayerId],
        outfield: &[Position],
        slots: &mut HashMap<Position, PlayerId>,
    ) {
        let empty = PlayerTracking::default();

        for player in field_players {
            if slots.values().any(|held| held == player) {
                continue;
            }

            let record = self.tracking.get(player).unwrap_or(&empty);
            let open = outfield
                .iter()
                .enumerate()
                .filter(|(_, position)| !slots.contains_key(*position))
                .filter(|(_, position)| self.roster.can_play_position(player, **position))
                .min_by_key(|(idx, position)| {
                    (record.categories_played.contains(&position.category()), *idx)
                })
                .map(|(_, position)| *position);

            if let Some(position) = open {
                debug!("period {}: {} fills {}", period, player, position);
                slots.insert(position, player.clone());
                continue;
            }

            let mut visited = HashSet::new();
            if self.reroute(player, outfield, slots, &mut visited) {
                debug!("period {}: rerouted assignments to fit {}", period, player);
            }
        }
    }

    /// Augmenting path: give `player` a slot, moving its holder on if needed.
    fn reroute(
        &self,
        player: &PlayerId,
        outfield: &[Position],
        slots: &mut HashMap<Position, PlayerId>,
        visited: &mut HashSet<Position>,
    ) -> bool {
        for position in outfield {
            if visited.contains(position) || !self.roster.can_play_position(player, *position) {
                continue;
            }
            visited.insert(*position);

            let moved = match slots.get(position).cloned() {
                None => true,
                Some(holder) => self.reroute(&holder, outfield, slots, visited),
            };

            if moved {
                slots.insert(*position, player.clone());
                return true;
            }
        }

        false
    }
}
