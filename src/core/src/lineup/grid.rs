use crate::lineup::{GridEvent, GridObserver, PeriodAssignment, Slot};
use crate::roster::{Formation, PlayerId, Position, RosterProvider};
use log::debug;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};

/// Period-by-period lineup state. Periods are numbered from 1.
///
/// Every mutation keeps a player in at most one slot per period and is
/// reported to the registered observers.
pub struct LineupGrid {
    formation: Formation,
    periods: Vec<PeriodAssignment>,
    observers: Vec<Box<dyn GridObserver>>,
}

impl LineupGrid {
    pub fn new(formation: Formation, period_count: u32) -> Self {
        let periods = (0..period_count)
            .map(|_| PeriodAssignment::new(&formation))
            .collect();

        LineupGrid {
            formation,
            periods,
            observers: Vec::new(),
        }
    }

    pub(crate) fn from_periods(formation: Formation, periods: Vec<PeriodAssignment>) -> Self {
        LineupGrid {
            formation,
            periods,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn GridObserver>) {
        self.observers.push(observer);
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn period_count(&self) -> u32 {
        self.periods.len() as u32
    }

    pub fn period(&self, period: u32) -> Option<&PeriodAssignment> {
        let idx = (period as usize).checked_sub(1)?;
        self.periods.get(idx)
    }

    pub fn periods(&self) -> impl Iterator<Item = (u32, &PeriodAssignment)> {
        self.periods
            .iter()
            .enumerate()
            .map(|(idx, assignment)| (idx as u32 + 1, assignment))
    }

    pub fn positions(&self, period: u32) -> Option<&BTreeMap<Position, Option<PlayerId>>> {
        self.period(period).map(|p| p.positions())
    }

    pub fn bench(&self, period: u32) -> &[PlayerId] {
        self.period(period).map(|p| p.bench()).unwrap_or(&[])
    }

    pub fn jersey(&self, period: u32) -> &[PlayerId] {
        self.period(period).map(|p| p.jersey()).unwrap_or(&[])
    }

    pub fn player_at(&self, period: u32, position: Position) -> Option<&PlayerId> {
        self.period(period).and_then(|p| p.player_at(position))
    }

    pub fn slot_of(&self, period: u32, player: &PlayerId) -> Option<Slot> {
        self.period(period).and_then(|p| p.slot_of(player))
    }

    pub fn is_empty(&self) -> bool {
        self.periods
            .iter()
            .all(|p| p.filled_count() == 0 && p.sitting_count() == 0)
    }

    pub fn clear_all_periods(&mut self) {
        self.periods.iter_mut().for_each(PeriodAssignment::clear);
        self.emit(GridEvent::Cleared);
    }

    /// Puts `player` in `position` for `period`. Returns false, leaving the
    /// grid unchanged, if the player is not eligible for the position.
    pub fn assign_to_position<R: RosterProvider + ?Sized>(
        &mut self,
        period: u32,
        player: &PlayerId,
        position: Position,
        roster: &R,
    ) -> bool {
        if !roster.can_play_position(player, position) {
            debug!(
                "rejected assignment: {} cannot play {} (period {})",
                player, position, period
            );
            return false;
        }

        self.place(period, player, position)
    }

    /// Same as `assign_to_position` without the eligibility check.
    pub(crate) fn place(&mut self, period: u32, player: &PlayerId, position: Position) -> bool {
        if !self.formation.contains(position) || self.period(period).is_none() {
            return false;
        }

        self.release(period, player);

        let displaced = self.period(period).and_then(|p| p.player_at(position)).cloned();
        if let Some(displaced) = displaced {
            self.release(period, &displaced);
        }

        if let Some(assignment) = self.period_mut(period) {
            assignment.positions.insert(position, Some(player.clone()));
        }

        self.emit(GridEvent::Assigned {
            period,
            player: player.clone(),
            position,
        });

        true
    }

    pub fn add_to_bench(&mut self, period: u32, player: &PlayerId) -> bool {
        if self.period(period).is_none() {
            return false;
        }

        self.release(period, player);

        if let Some(assignment) = self.period_mut(period) {
            assignment.bench.push(player.clone());
        }

        self.emit(GridEvent::Benched {
            period,
            player: player.clone(),
        });

        true
    }

    pub fn add_to_jersey(&mut self, period: u32, player: &PlayerId) -> bool {
        if self.period(period).is_none() {
            return false;
        }

        self.release(period, player);

        if let Some(assignment) = self.period_mut(period) {
            assignment.jersey.push(player.clone());
        }

        self.emit(GridEvent::JerseyPrep {
            period,
            player: player.clone(),
        });

        true
    }

    /// Removes the player from whatever slot they hold in `period`.
    pub fn unassign(&mut self, period: u32, player: &PlayerId) -> bool {
        self.release(period, player).is_some()
    }

    fn release(&mut self, period: u32, player: &PlayerId) -> Option<Slot> {
        let from = self.period_mut(period)?.remove(player)?;

        self.emit(GridEvent::Removed {
            period,
            player: player.clone(),
            from,
        });

        Some(from)
    }

    fn period_mut(&mut self, period: u32) -> Option<&mut PeriodAssignment> {
        let idx = (period as usize).checked_sub(1)?;
        self.periods.get_mut(idx)
    }

    fn emit(&mut self, event: GridEvent) {
        for observer in self.observers.iter_mut() {
            observer.on_event(&event);
        }
    }
}

impl Debug for LineupGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("LineupGrid")
            .field("formation", &self.formation)
            .field("periods", &self.periods)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::EditHistory;
    use crate::roster::{Categories, Player, Roster};

    fn create_test_roster() -> Roster {
        Roster::new(vec![
            Player::builder()
                .id("Ava")
                .categories(Categories::ANY)
                .build()
                .unwrap(),
            Player::builder()
                .id("Ben")
                .categories(Categories::WING | Categories::STRIKER)
                .build()
                .unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_assign_moves_player_out_of_previous_slot() {
        let roster = create_test_roster();
        let mut grid = LineupGrid::new(Formation::default(), 8);
        let ava = PlayerId::from("Ava");

        assert!(grid.add_to_bench(1, &ava));
        assert!(grid.assign_to_position(1, &ava, Position::CenterBack, &roster));

        assert!(grid.bench(1).is_empty());
        assert_eq!(grid.player_at(1, Position::CenterBack), Some(&ava));

        assert!(grid.assign_to_position(1, &ava, Position::Goalkeeper, &roster));
        assert_eq!(grid.player_at(1, Position::CenterBack), None);
        assert_eq!(grid.slot_of(1, &ava), Some(Slot::Field(Position::Goalkeeper)));
        assert_eq!(grid.positions(1).map(|p| p.len()), Some(9));
        assert!(grid.positions(9).is_none());
    }

    #[test]
    fn test_ineligible_assignment_leaves_grid_unchanged() {
        let roster = create_test_roster();
        let mut grid = LineupGrid::new(Formation::default(), 8);
        let ben = PlayerId::from("Ben");

        assert!(grid.add_to_jersey(2, &ben));
        assert!(!grid.assign_to_position(2, &ben, Position::Goalkeeper, &roster));

        assert_eq!(grid.jersey(2), &[ben.clone()]);
        assert_eq!(grid.player_at(2, Position::Goalkeeper), None);
    }

    #[test]
    fn test_assigning_occupied_slot_displaces_occupant() {
        let roster = create_test_roster();
        let mut grid = LineupGrid::new(Formation::default(), 2);
        let ava = PlayerId::from("Ava");
        let ben = PlayerId::from("Ben");

        assert!(grid.assign_to_position(1, &ava, Position::LeftWing, &roster));
        assert!(grid.assign_to_position(1, &ben, Position::LeftWing, &roster));

        assert_eq!(grid.player_at(1, Position::LeftWing), Some(&ben));
        assert_eq!(grid.slot_of(1, &ava), None);
    }

    #[test]
    fn test_unknown_period_or_position_is_rejected() {
        let roster = create_test_roster();
        let mut grid = LineupGrid::new(Formation::default(), 2);
        let ava = PlayerId::from("Ava");

        assert!(!grid.add_to_bench(0, &ava));
        assert!(!grid.add_to_jersey(3, &ava));
        assert!(!grid.assign_to_position(1, &ava, Position::LeftCenterBack, &roster));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_clear_all_periods() {
        let mut grid = LineupGrid::new(Formation::default(), 3);
        let ava = PlayerId::from("Ava");

        grid.add_to_bench(1, &ava);
        grid.add_to_jersey(3, &ava);
        grid.clear_all_periods();

        assert!(grid.is_empty());
        assert_eq!(grid.period(3).unwrap().positions().len(), 9);
    }

    #[test]
    fn test_observers_see_every_mutation() {
        let roster = create_test_roster();
        let history = EditHistory::shared();
        let mut grid = LineupGrid::new(Formation::default(), 2);
        grid.subscribe(Box::new(history.clone()));

        let ava = PlayerId::from("Ava");
        grid.add_to_bench(1, &ava);
        grid.assign_to_position(1, &ava, Position::Striker, &roster);
        grid.assign_to_position(1, &ava, Position::LeftStriker, &roster);
        grid.clear_all_periods();

        let events: Vec<GridEvent> = history.borrow().events().cloned().collect();
        assert_eq!(
            events,
            vec![
                GridEvent::Benched {
                    period: 1,
                    player: ava.clone()
                },
                GridEvent::Removed {
                    period: 1,
                    player: ava.clone(),
                    from: Slot::Bench
                },
                GridEvent::Assigned {
                    period: 1,
                    player: ava.clone(),
                    position: Position::LeftStriker
                },
                GridEvent::Cleared,
            ]
        );
    }
}
