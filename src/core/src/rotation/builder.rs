use crate::error::{RotationError, RotationResult};
use crate::lineup::LineupGrid;
use crate::roster::{
    split_by_availability, AvailabilityProvider, Player, PlayerId, Position, Roster,
};
use crate::rotation::{
    BenchSelector, FieldPositionAssigner, GoalkeeperPlan, GoalkeeperPlanner, Relaxation,
    RotationConfig, TrackingBook,
};
use crate::utils::Logging;
use crate::validation::{RuleValidator, ValidationReport};
use log::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub plan: GoalkeeperPlan,
    pub relaxations: Vec<Relaxation>,
    pub unfilled: Vec<(u32, Position)>,
    pub unplaced: Vec<(u32, PlayerId)>,
    pub validation: ValidationReport,
}

struct Squad<'r> {
    schedulable: Vec<&'r Player>,
    forced: Vec<&'r Player>,
}

pub struct LineupBuilder;

impl LineupBuilder {
    /// Clears the grid and fills every period from scratch.
    ///
    /// Preconditions are checked first; when one fails the grid is left as it
    /// was. A `BenchSelectionFailed` error leaves the grid partially filled.
    pub fn build<A: AvailabilityProvider + ?Sized>(
        grid: &mut LineupGrid,
        roster: &Roster,
        availability: &A,
        config: &RotationConfig,
    ) -> RotationResult<BuildReport> {
        let squad = Self::check_preconditions(grid, roster, availability, config)?;

        info!(
            "building lineup: {} periods, {} available, {} forced to the bench",
            config.periods,
            squad.schedulable.len(),
            squad.forced.len()
        );

        Logging::estimate_result(
            || Self::fill(grid, roster, availability, config, &squad),
            "lineup built",
        )
    }

    fn check_preconditions<'r, A: AvailabilityProvider + ?Sized>(
        grid: &LineupGrid,
        roster: &'r Roster,
        availability: &A,
        config: &RotationConfig,
    ) -> RotationResult<Squad<'r>> {
        if roster.is_empty() {
            return Err(RotationError::EmptyRoster);
        }

        config.validate()?;

        if grid.period_count() != config.periods {
            return Err(RotationError::GridMismatch {
                expected_periods: config.periods,
                actual_periods: grid.period_count(),
            });
        }

        if grid.formation() != &config.formation() {
            return Err(RotationError::InvalidConfig(format!(
                "grid formation has {} slots, {:?} expects {}",
                grid.formation().len(),
                config.squad_size,
                config.formation().len()
            )));
        }

        let (schedulable, forced) = split_by_availability(roster, availability);
        let required = grid.formation().len();

        if schedulable.len() < required {
            return Err(RotationError::NotEnoughPlayers {
                available: schedulable.len(),
                required,
            });
        }

        Ok(Squad { schedulable, forced })
    }

    fn fill<A: AvailabilityProvider + ?Sized>(
        grid: &mut LineupGrid,
        roster: &Roster,
        availability: &A,
        config: &RotationConfig,
        squad: &Squad<'_>,
    ) -> RotationResult<BuildReport> {
        grid.clear_all_periods();

        let plan = GoalkeeperPlanner::plan(&squad.schedulable, squad.forced.len(), config);

        let mut tracking = TrackingBook::new(squad.schedulable.iter().map(|p| &p.id));
        for player in &squad.schedulable {
            tracking.entry(&player.id).planned_sits = plan.planned_sits(&player.id);
        }

        let mut report = BuildReport::default();

        for period in 1..=config.periods {
            Self::fill_period(period, grid, roster, squad, &plan, &mut tracking, config, &mut report)?;
        }

        report.plan = plan;
        report.validation = RuleValidator::validate(grid, roster, availability, config);

        info!(
            "lineup ready: {} relaxation(s), {} violation(s), {:.1}% preferred positions",
            report.relaxations.len(),
            report.validation.violations.len(),
            report.validation.preferred_compliance()
        );

        Ok(report)
    }

    fn fill_period(
        period: u32,
        grid: &mut LineupGrid,
        roster: &Roster,
        squad: &Squad<'_>,
        plan: &GoalkeeperPlan,
        tracking: &mut TrackingBook,
        config: &RotationConfig,
        report: &mut BuildReport,
    ) -> RotationResult<()> {
        let keeper = plan.block_for(period).map(|block| {
            let placed = if block.eligible {
                grid.assign_to_position(period, &block.keeper, Position::Goalkeeper, roster)
            } else {
                warn!(
                    "period {}: {} keeps goal without goalkeeper eligibility",
                    period, block.keeper
                );
                grid.place(period, &block.keeper, Position::Goalkeeper)
            };

            if placed {
                let record = tracking.entry(&block.keeper);
                record.gk_periods.push(period);
                record.record_position(Position::Goalkeeper, config.period_minutes);
            }

            &block.keeper
        });

        let jersey = plan.jersey_for(period);
        for player in jersey {
            grid.add_to_jersey(period, player);
            tracking.entry(player).jersey_periods.push(period);
        }

        for player in &squad.forced {
            grid.add_to_bench(period, &player.id);
        }

        let pool: Vec<PlayerId> = squad
            .schedulable
            .iter()
            .map(|p| &p.id)
            .filter(|id| Some(*id) != keeper && !jersey.contains(id))
            .cloned()
            .collect();

        let target = BenchSelector::bench_target(
            period,
            config.sitting_quota,
            jersey.len(),
            squad.forced.len(),
            pool.len(),
            grid.formation().outfield_count(),
        );

        let selection = BenchSelector::select(
            period,
            &pool,
            plan.reserved_for(period),
            target,
            tracking,
            config,
        )?;

        for player in &selection.bench {
            grid.add_to_bench(period, player);
            tracking.entry(player).bench_periods.push(period);
        }
        for player in plan.reserved_for(period) {
            if !selection.bench.contains(player) {
                tracking.entry(player).planned_sits.remove(&period);
            }
        }
        report.relaxations.extend(selection.relaxations);

        let formation = grid.formation().clone();

        let mut field: Vec<PlayerId> = pool
            .into_iter()
            .filter(|p| !selection.bench.contains(p))
            .collect();

        if field.len() > formation.outfield_count() {
            field = BenchSelector::rest_last(period, field, tracking, config.max_sits);
        }

        let assignment = FieldPositionAssigner::new(roster, tracking, config.min_position_categories)
            .assign(period, &field, &formation);

        for (position, player) in &assignment.assignments {
            if grid.assign_to_position(period, player, *position, roster) {
                tracking
                    .entry(player)
                    .record_position(*position, config.period_minutes);
            }
        }

        debug!(
            "period {}: {} of {} outfield slots filled, {} preferred",
            period,
            assignment.assignments.len(),
            formation.outfield_count(),
            assignment.preferred_matches
        );

        report
            .unfilled
            .extend(assignment.unfilled.into_iter().map(|position| (period, position)));
        report
            .unplaced
            .extend(assignment.unplaced.into_iter().map(|player| (period, player)));

        Ok(())
    }
}
