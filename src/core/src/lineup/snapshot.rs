use crate::error::{RotationError, RotationResult};
use crate::lineup::{LineupGrid, PeriodAssignment};
use crate::roster::{Formation, PlayerId};
use std::collections::{BTreeMap, HashSet};

/// Plain nested form of the grid: period → {positions, bench, jersey}.
pub type LineupSnapshot = BTreeMap<u32, PeriodAssignment>;

impl LineupGrid {
    pub fn export(&self) -> LineupSnapshot {
        self.periods()
            .map(|(period, assignment)| (period, assignment.clone()))
            .collect()
    }

    pub fn import(formation: Formation, snapshot: LineupSnapshot) -> RotationResult<LineupGrid> {
        let mut periods = Vec::with_capacity(snapshot.len());

        for (expected, (period, stored)) in (1u32..).zip(snapshot) {
            if period != expected {
                return Err(RotationError::InvalidSnapshot(format!(
                    "expected period {}, found {}",
                    expected, period
                )));
            }

            let mut assignment = PeriodAssignment::new(&formation);

            for (position, occupant) in stored.positions {
                if !formation.contains(position) {
                    return Err(RotationError::InvalidSnapshot(format!(
                        "period {}: {} is not part of the formation",
                        period, position
                    )));
                }
                assignment.positions.insert(position, occupant);
            }
            assignment.bench = stored.bench;
            assignment.jersey = stored.jersey;

            let duplicate = {
                let mut seen: HashSet<&PlayerId> = HashSet::new();
                assignment
                    .occupants()
                    .into_iter()
                    .find(|p| !seen.insert(*p))
                    .cloned()
            };

            if let Some(duplicate) = duplicate {
                return Err(RotationError::InvalidSnapshot(format!(
                    "period {}: {} holds more than one slot",
                    period, duplicate
                )));
            }

            periods.push(assignment);
        }

        Ok(LineupGrid::from_periods(formation, periods))
    }

    pub fn to_json(&self) -> RotationResult<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    pub fn from_json(formation: Formation, json: &str) -> RotationResult<LineupGrid> {
        let snapshot: LineupSnapshot = serde_json::from_str(json)?;
        LineupGrid::import(formation, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Categories, Player, Position, Roster};

    fn create_test_grid() -> LineupGrid {
        let roster = Roster::new(vec![
            Player::builder()
                .id("Ava")
                .categories(Categories::ANY)
                .build()
                .unwrap(),
        ])
        .unwrap();

        let mut grid = LineupGrid::new(Formation::default(), 3);
        let ava = PlayerId::from("Ava");
        let ben = PlayerId::from("Ben");

        grid.assign_to_position(1, &ava, Position::Goalkeeper, &roster);
        grid.add_to_bench(1, &ben);
        grid.add_to_jersey(2, &ava);
        grid
    }

    #[test]
    fn test_export_import_reproduces_grid() {
        let grid = create_test_grid();

        let restored = LineupGrid::import(Formation::default(), grid.export()).unwrap();

        assert_eq!(restored.export(), grid.export());
    }

    #[test]
    fn test_json_round_trip() {
        let grid = create_test_grid();
        let json = grid.to_json().unwrap();

        assert!(json.contains("\"goalkeeper\": \"Ava\""));
        assert!(json.contains("\"left-back\": null"));

        let restored = LineupGrid::from_json(Formation::default(), &json).unwrap();
        assert_eq!(restored.export(), grid.export());
    }

    #[test]
    fn test_import_rejects_double_occupancy() {
        let mut snapshot = create_test_grid().export();
        if let Some(first) = snapshot.get_mut(&1) {
            first.jersey.push(PlayerId::from("Ava"));
        }

        let result = LineupGrid::import(Formation::default(), snapshot);
        assert!(matches!(result, Err(RotationError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_import_rejects_gaps_in_periods() {
        let mut snapshot = create_test_grid().export();
        snapshot.remove(&2);

        assert!(LineupGrid::import(Formation::default(), snapshot).is_err());
    }

    #[test]
    fn test_import_rejects_foreign_positions() {
        let grid = create_test_grid();
        let seven = Formation::for_squad(crate::roster::SquadSize::SevenVSeven);

        assert!(LineupGrid::import(seven, grid.export()).is_err());
    }
}
