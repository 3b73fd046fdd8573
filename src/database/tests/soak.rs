use database::RosterGenerator;
use lineup_core::{
    AvailabilityProvider, BuildReport, LineupBuilder, LineupGrid, PlayerId, Roster,
    RosterProvider, RotationConfig,
};
use std::collections::BTreeSet;

const SEEDS: u64 = 25;

fn build_random(seed: u64, size: usize) -> (Roster, LineupGrid, BuildReport, usize) {
    let (roster, availability) = RosterGenerator::random(seed, size).unwrap();
    let config = RotationConfig::default();
    let mut grid = LineupGrid::new(config.formation(), config.periods);

    let report = LineupBuilder::build(&mut grid, &roster, &availability, &config)
        .unwrap_or_else(|e| panic!("seed {} size {}: {}", seed, size, e));

    let schedulable = roster
        .players()
        .iter()
        .filter(|p| availability.availability(&p.id).is_schedulable())
        .count();

    (roster, grid, report, schedulable)
}

#[test]
fn test_random_squads_hold_every_hard_rule() {
    let config = RotationConfig::default();
    let formation = config.formation();

    for size in 9..=16 {
        for seed in 0..SEEDS {
            let (roster, grid, report, schedulable) = build_random(seed, size);

            for (period, assignment) in grid.periods() {
                let context = format!("seed {} size {} period {}", seed, size, period);

                let occupants = assignment.occupants();
                let unique: BTreeSet<&PlayerId> = occupants.iter().copied().collect();
                assert_eq!(occupants.len(), unique.len(), "{}", context);

                let resting: Vec<&PlayerId> = report
                    .unplaced
                    .iter()
                    .filter(|(p, _)| *p == period)
                    .map(|(_, id)| id)
                    .collect();
                assert!(resting.iter().all(|id| !unique.contains(id)), "{}", context);
                assert_eq!(occupants.len() + resting.len(), size, "{}", context);

                let expected_sitting = config
                    .sitting_quota
                    .min(schedulable - formation.len())
                    .max(assignment.jersey().len());
                assert_eq!(assignment.sitting_count(), expected_sitting, "{}", context);

                for (_, position) in report.unfilled.iter().filter(|(p, _)| *p == period) {
                    assert!(
                        resting
                            .iter()
                            .all(|id| !roster.can_play_position(id, *position)),
                        "{}: {} left open while an eligible player rests",
                        context,
                        position
                    );
                }

                assert!(assignment.goalkeeper().is_some(), "{}", context);
            }
        }
    }
}

#[test]
fn test_twelve_or_more_players_keep_the_quota() {
    for size in 12..=16 {
        for seed in 0..SEEDS {
            let (_, grid, _, _) = build_random(seed, size);

            assert!(
                grid.periods()
                    .all(|(_, assignment)| assignment.sitting_count() == 3),
                "seed {} size {}",
                seed,
                size
            );
        }
    }
}

#[test]
fn test_random_squads_rebuild_identically() {
    for size in 9..=16 {
        for seed in 0..SEEDS {
            let (roster, availability) = RosterGenerator::random(seed, size).unwrap();
            let config = RotationConfig::default();
            let mut grid = LineupGrid::new(config.formation(), config.periods);

            LineupBuilder::build(&mut grid, &roster, &availability, &config).unwrap();
            let first = grid.export();

            LineupBuilder::build(&mut grid, &roster, &availability, &config).unwrap();

            assert_eq!(grid.export(), first, "seed {} size {}", seed, size);
        }
    }
}
