use crate::lineup::{player_stats, LineupGrid};
use crate::roster::{AvailabilityProvider, PlayerId, RosterProvider};
use crate::rotation::RotationConfig;
use crate::validation::Violation;
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
    pub outfield_assignments: usize,
    pub preferred_assignments: usize,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Share of outfield assignments that landed on a preferred position, in percent.
    pub fn preferred_compliance(&self) -> f32 {
        if self.outfield_assignments == 0 {
            return 100.0;
        }

        self.preferred_assignments as f32 * 100.0 / self.outfield_assignments as f32
    }

    pub fn violations_for(&self, player: &PlayerId) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| match v {
                Violation::TooFewSits { player: p, .. }
                | Violation::TooManySits { player: p, .. }
                | Violation::ConsecutiveSits { player: p, .. }
                | Violation::NarrowPositions { player: p, .. } => p == player,
                Violation::MissingJerseyPrep { keeper, .. } => keeper == player,
                _ => false,
            })
            .collect()
    }
}

pub struct RuleValidator;

impl RuleValidator {
    /// Checks a grid against the rotation rules. Never mutates anything, so it
    /// works on hand-edited grids as well as built ones.
    pub fn validate<R, A>(
        grid: &LineupGrid,
        roster: &R,
        availability: &A,
        config: &RotationConfig,
    ) -> ValidationReport
    where
        R: RosterProvider + ?Sized,
        A: AvailabilityProvider + ?Sized,
    {
        let mut report = ValidationReport::default();

        Self::check_players(grid, roster, availability, config, &mut report);
        Self::check_jersey_prep(grid, &mut report);
        Self::check_periods(grid, config, &mut report);
        Self::count_preferred(grid, roster, &mut report);

        debug!(
            "validation: {} violation(s), {:.1}% preferred positions",
            report.violations.len(),
            report.preferred_compliance()
        );

        report
    }

    fn check_players<R, A>(
        grid: &LineupGrid,
        roster: &R,
        availability: &A,
        config: &RotationConfig,
        report: &mut ValidationReport,
    ) where
        R: RosterProvider + ?Sized,
        A: AvailabilityProvider + ?Sized,
    {
        for stats in player_stats(grid, roster, config.period_minutes) {
            let player = stats.player.clone();
            if !availability.availability(&player).is_schedulable() {
                continue;
            }

            let sits = stats.sit_periods();

            if sits.len() < config.min_sits {
                report.violations.push(Violation::TooFewSits {
                    player: player.clone(),
                    sits: sits.len(),
                    min: config.min_sits,
                });
            } else if sits.len() > config.max_sits {
                report.violations.push(Violation::TooManySits {
                    player: player.clone(),
                    sits: sits.len(),
                    max: config.max_sits,
                });
            }

            for pair in sits.windows(2).filter(|w| w[1] == w[0] + 1) {
                report.violations.push(Violation::ConsecutiveSits {
                    player: player.clone(),
                    first_period: pair[0],
                });
            }

            let eligible = roster.categories(&player).count();
            let played = stats.categories().len();

            if !stats.positions.is_empty()
                && eligible >= config.min_position_categories
                && played < config.min_position_categories
            {
                report.violations.push(Violation::NarrowPositions {
                    player,
                    categories: played,
                    required: config.min_position_categories,
                });
            }
        }
    }

    /// Every keeper change after the first period needs the incoming keeper
    /// on jersey duty in the period before.
    fn check_jersey_prep(grid: &LineupGrid, report: &mut ValidationReport) {
        let keepers: Vec<(u32, Option<&PlayerId>)> = grid
            .periods()
            .map(|(period, assignment)| (period, assignment.goalkeeper()))
            .collect();

        for pair in keepers.windows(2) {
            let (_, previous) = pair[0];
            let (period, current) = pair[1];

            let Some(keeper) = current else {
                continue;
            };

            if previous == Some(keeper) {
                continue;
            }

            if !grid.jersey(period - 1).contains(keeper) {
                report.violations.push(Violation::MissingJerseyPrep {
                    keeper: keeper.clone(),
                    block_start: period,
                });
            }
        }
    }

    fn check_periods(grid: &LineupGrid, config: &RotationConfig, report: &mut ValidationReport) {
        for (period, assignment) in grid.periods() {
            let sitting = assignment.sitting_count();
            if sitting != config.sitting_quota {
                report.violations.push(Violation::SittingQuota {
                    period,
                    sitting,
                    quota: config.sitting_quota,
                });
            }

            for position in assignment.open_positions() {
                report
                    .violations
                    .push(Violation::UnfilledPosition { period, position });
            }
        }
    }

    fn count_preferred<R: RosterProvider + ?Sized>(
        grid: &LineupGrid,
        roster: &R,
        report: &mut ValidationReport,
    ) {
        for (_, assignment) in grid.periods() {
            for (position, player) in assignment.field_players() {
                if position.is_goalkeeper() {
                    continue;
                }

                report.outfield_assignments += 1;
                if roster.preferred_positions(player).contains(&position) {
                    report.preferred_assignments += 1;
                }
            }
        }
    }
}

/// Read-only diagnostics for the current grid: unfilled positions, wrong
/// sitting counts and sit bounds, as display strings.
pub fn validate_lineup_quality<R, A>(
    grid: &LineupGrid,
    roster: &R,
    availability: &A,
    config: &RotationConfig,
) -> Vec<String>
where
    R: RosterProvider + ?Sized,
    A: AvailabilityProvider + ?Sized,
{
    RuleValidator::validate(grid, roster, availability, config)
        .violations
        .into_iter()
        .filter(Violation::is_quality_issue)
        .map(|v| v.to_string())
        .collect()
}
